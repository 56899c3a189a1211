//! Protocol selection and credit orchestration over the message codecs.

use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use strum_macros::Display;
use tracing::debug;

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};
use crate::error::KeycodeError;
use crate::full::FullMessage;
use crate::message::{Message, SecretKey};
use crate::small::SmallMessage;

/// The two supported keycode wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Protocol {
    Small,
    Full,
}

impl FromStr for Protocol {
    type Err = KeycodeError;

    /// Protocol names are matched case-insensitively; anything but
    /// `SMALL` or `FULL` is rejected before any codec runs.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_uppercase().as_str() {
            "SMALL" => Ok(Self::Small),
            "FULL" => Ok(Self::Full),
            _ => Err(KeycodeError::UnsupportedProtocol(name.to_string())),
        }
    }
}

/// What a keycode instructs the device to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditAction {
    Add,
    Unlock,
}

/// A rendered keycode together with what it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeycodeData {
    pub action: CreditAction,
    pub keycode: String,
    pub message_id: u16,
    /// Seconds of credit actually granted, after protocol rounding.
    pub seconds: u64,
}

/// Result of one orchestration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeycodeMetadata {
    /// When the device will disable again; `None` for unlock keycodes.
    pub new_disabled_at: Option<DateTime<Utc>>,
    pub data: KeycodeData,
}

/// Encodes an add-credit keycode, rounding `seconds` up to the protocol's
/// native unit (whole days for [`Protocol::Small`], whole hours for
/// [`Protocol::Full`]) and advancing `clamped_time` by the duration
/// actually granted.
///
/// `clamped_time` is the caller's `max(now, current disabled-at)`; credit
/// extends from whichever is later.
pub fn add_credit(
    clamped_time: DateTime<Utc>,
    message_id: u16,
    secret_key: &SecretKey,
    protocol: Protocol,
    seconds: u64,
) -> Result<KeycodeMetadata, KeycodeError> {
    let (keycode, seconds_sent, new_disabled_at) = match protocol {
        Protocol::Small => {
            let days = seconds.div_ceil(SECONDS_PER_DAY);
            debug!(message_id, days, "encoding small add-credit keycode");
            let keycode = SmallMessage::add_credit(message_id, days, secret_key)?.to_keycode()?;
            (
                keycode,
                days * SECONDS_PER_DAY,
                clamped_time + TimeDelta::days(days as i64),
            )
        }
        Protocol::Full => {
            let hours = seconds.div_ceil(SECONDS_PER_HOUR);
            debug!(message_id, hours, "encoding full add-credit keycode");
            let keycode = FullMessage::add_credit(message_id, hours, secret_key)?.to_keycode()?;
            (
                keycode,
                hours * SECONDS_PER_HOUR,
                clamped_time + TimeDelta::hours(hours as i64),
            )
        }
    };
    Ok(KeycodeMetadata {
        new_disabled_at: Some(new_disabled_at),
        data: KeycodeData {
            action: CreditAction::Add,
            keycode,
            message_id,
            seconds: seconds_sent,
        },
    })
}

/// Encodes an unlock keycode. Unlocks grant no timed credit, so the result
/// carries no new disabled time.
pub fn unlock(
    message_id: u16,
    secret_key: &SecretKey,
    protocol: Protocol,
) -> Result<KeycodeMetadata, KeycodeError> {
    debug!(message_id, %protocol, "encoding unlock keycode");
    let keycode = match protocol {
        Protocol::Small => SmallMessage::unlock(message_id, secret_key)?.to_keycode()?,
        Protocol::Full => FullMessage::unlock(message_id, secret_key)?.to_keycode()?,
    };
    Ok(KeycodeMetadata {
        new_disabled_at: None,
        data: KeycodeData {
            action: CreditAction::Unlock,
            keycode,
            message_id,
            seconds: 0,
        },
    })
}
