//! Orchestration-layer behavior: protocol selection, unit rounding, and
//! keycode metadata

mod common;

use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use common::*;
use keycode_lib::factory::{self, CreditAction, Protocol};

fn base_time(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).expect("Valid timestamp")
}

#[test]
fn protocol_names_parse_case_insensitively() {
    assert_eq!(Protocol::from_str("SMALL").unwrap(), Protocol::Small);
    assert_eq!(Protocol::from_str("small").unwrap(), Protocol::Small);
    assert_eq!(Protocol::from_str("Full").unwrap(), Protocol::Full);
    assert_eq!(
        Protocol::from_str("TINY").unwrap_err(),
        KeycodeError::UnsupportedProtocol("TINY".to_string())
    );
}

#[test]
fn protocol_displays_canonical_names() {
    assert_eq!(Protocol::Small.to_string(), "SMALL");
    assert_eq!(Protocol::Full.to_string(), "FULL");
}

#[test]
fn small_add_credit_rounds_seconds_up_to_days() {
    let key = secret_from_hex(AB_KEY_HEX);
    let output = factory::add_credit(base_time(2), 2, &key, Protocol::Small, 100)
        .expect("Failed to encode");

    assert_eq!(
        output.new_disabled_at,
        Some(base_time(2) + TimeDelta::days(1))
    );
    assert_eq!(output.data.action, CreditAction::Add);
    assert_eq!(output.data.message_id, 2);
    assert_eq!(output.data.seconds, 24 * 60 * 60);
    assert_eq!(
        output.data.keycode,
        SmallMessage::add_credit(2, 1, &key)
            .expect("Failed to build message")
            .to_keycode()
            .expect("Failed to render")
    );
}

#[test]
fn full_add_credit_rounds_seconds_up_to_hours() {
    let key = secret_from_hex(AB_KEY_HEX);
    let output = factory::add_credit(base_time(200), 3, &key, Protocol::Full, 3602)
        .expect("Failed to encode");

    assert_eq!(
        output.new_disabled_at,
        Some(base_time(200) + TimeDelta::hours(2))
    );
    assert_eq!(output.data.action, CreditAction::Add);
    assert_eq!(output.data.message_id, 3);
    assert_eq!(output.data.seconds, 2 * 60 * 60);
    assert_eq!(
        output.data.keycode,
        FullMessage::add_credit(3, 2, &key)
            .expect("Failed to build message")
            .to_keycode()
            .expect("Failed to render")
    );
}

#[test]
fn unlock_grants_no_timed_credit() {
    let key = secret_from_hex(AB_KEY_HEX);
    let output = factory::unlock(0, &key, Protocol::Small).expect("Failed to encode");

    assert_eq!(output.new_disabled_at, None);
    assert_eq!(output.data.action, CreditAction::Unlock);
    assert_eq!(output.data.message_id, 0);
    assert_eq!(output.data.seconds, 0);
}

#[test]
fn quick_start_vectors() {
    let key = secret_from_hex(README_KEY_HEX);
    let week = 7 * 24 * 60 * 60;

    let output = factory::add_credit(Utc::now(), 42, &key, Protocol::Full, week)
        .expect("Failed to encode");
    assert_eq!(output.data.keycode, "*599 791 493 194 43#");

    let keycode = FullMessage::set_credit(43, 14 * 24, &key)
        .expect("Failed to build message")
        .to_keycode()
        .expect("Failed to render");
    assert_eq!(keycode, "*272 511 292 039 01#");

    let output = factory::unlock(44, &key, Protocol::Full).expect("Failed to encode");
    assert_eq!(output.data.keycode, "*578 396 697 305 45#");

    let output = factory::add_credit(Utc::now(), 31, &key, Protocol::Small, week)
        .expect("Failed to encode");
    assert_eq!(output.data.keycode, "154 535 324 353 534");

    let output = factory::unlock(32, &key, Protocol::Small).expect("Failed to encode");
    assert_eq!(output.data.keycode, "153 233 555 553 342");
}

#[test]
fn metadata_serializes_with_wire_friendly_names() {
    let key = secret_from_hex(AB_KEY_HEX);
    let output = factory::unlock(5, &key, Protocol::Full).expect("Failed to encode");
    let json = serde_json::to_value(&output).expect("Failed to serialize");

    assert_eq!(json["data"]["action"], "UNLOCK");
    assert_eq!(json["data"]["message_id"], 5);
    assert_eq!(json["new_disabled_at"], serde_json::Value::Null);
}
