use std::error::Error;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use keycode_lib::{KeycodeMetadata, Protocol, SecretKey, factory};

#[derive(Parser)]
#[command(about = "Generate offline device authorization keycodes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode an add-credit keycode
    AddCredit {
        /// Keycode protocol, SMALL or FULL (case-insensitive)
        #[arg(short, long)]
        protocol: Protocol,
        /// Message ID in [0, 65534]
        #[arg(short, long)]
        id: u16,
        /// Device secret key as 32 hex characters
        #[arg(short, long)]
        key: String,
        /// Credit duration in seconds; rounded up to whole days (SMALL)
        /// or whole hours (FULL)
        #[arg(short, long)]
        seconds: u64,
        /// Time the device currently disables at (RFC 3339, default: now)
        #[arg(long)]
        base_time: Option<DateTime<Utc>>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Encode an unlock keycode
    Unlock {
        /// Keycode protocol, SMALL or FULL (case-insensitive)
        #[arg(short, long)]
        protocol: Protocol,
        /// Message ID in [0, 65534]
        #[arg(short, long)]
        id: u16,
        /// Device secret key as 32 hex characters
        #[arg(short, long)]
        key: String,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::AddCredit {
            protocol,
            id,
            key,
            seconds,
            base_time,
            json,
        } => {
            let secret_key = parse_secret_key(&key)?;
            let base = base_time.unwrap_or_else(Utc::now);
            let output = factory::add_credit(base, id, &secret_key, protocol, seconds)?;
            print_output(&output, json)?;
        }
        Command::Unlock {
            protocol,
            id,
            key,
            json,
        } => {
            let secret_key = parse_secret_key(&key)?;
            let output = factory::unlock(id, &secret_key, protocol)?;
            print_output(&output, json)?;
        }
    }
    Ok(())
}

fn print_output(output: &KeycodeMetadata, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    println!("{}", output.data.keycode);
    if let Some(disabled_at) = output.new_disabled_at {
        println!("Credit granted: {} seconds", output.data.seconds);
        println!("New disabled time: {}", disabled_at.to_rfc3339());
    }
    Ok(())
}

fn parse_secret_key(hex_key: &str) -> Result<SecretKey, Box<dyn Error>> {
    let bytes = hex::decode(hex_key)?;
    SecretKey::try_from(bytes).map_err(|_| "secret key must be 16 bytes (32 hex characters)".into())
}
