//! The full keycode protocol, sized for numeric keypads.

use bytes::{BufMut, BytesMut};
use num_enum::IntoPrimitive;

use crate::bits::repack_to_buffer_bottom;
use crate::constants::{
    FULL_BODY_DIGITS, FULL_KEYCODE_DIGITS, FULL_MAC_DIGITS, MAX_MESSAGE_ID, UNLOCK_HOURS,
};
use crate::error::KeycodeError;
use crate::message::{Message, SecretKey};
use crate::prng::{pseudorandom_bits, sip_digest};

/// Message type codes occupying the leading keycode digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum FullTypeCode {
    AddCredit = 0,
    SetCredit = 1,
}

/// A full-protocol keycode message; immutable once constructed.
///
/// Renders as 14 decimal digits: 1-digit type code, 2-digit truncated
/// message ID, 5-digit body, 6-digit truncated MAC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullMessage {
    header: String,
    body: String,
    mac: String,
}

impl FullMessage {
    /// Creates a message over a body of exactly five decimal digits.
    pub fn new(
        full_id: u16,
        type_code: FullTypeCode,
        body: &str,
        secret_key: &SecretKey,
    ) -> Result<Self, KeycodeError> {
        if full_id > MAX_MESSAGE_ID {
            return Err(KeycodeError::UnsupportedMessageId(full_id));
        }
        if body.len() != FULL_BODY_DIGITS || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeycodeError::UnsupportedBody(body.to_string()));
        }
        let body_value = body
            .parse::<u32>()
            .map_err(|_| KeycodeError::UnsupportedBody(body.to_string()))?;
        let mac = generate_mac(full_id, type_code, body_value, secret_key);
        let header = format!("{}{:02}", u8::from(type_code), full_id & 0x3F);
        Ok(Self {
            header,
            body: body.to_string(),
            mac,
        })
    }

    /// Increases the device's enabled credit by `hours`.
    pub fn add_credit(
        full_id: u16,
        hours: u64,
        secret_key: &SecretKey,
    ) -> Result<Self, KeycodeError> {
        Self::new(
            full_id,
            FullTypeCode::AddCredit,
            &format!("{hours:05}"),
            secret_key,
        )
    }

    /// Sets the device's enabled credit to exactly `hours`.
    pub fn set_credit(
        full_id: u16,
        hours: u64,
        secret_key: &SecretKey,
    ) -> Result<Self, KeycodeError> {
        Self::new(
            full_id,
            FullTypeCode::SetCredit,
            &format!("{hours:05}"),
            secret_key,
        )
    }

    /// Unlocks the device: a set-credit carrying the reserved hour sentinel.
    pub fn unlock(full_id: u16, secret_key: &SecretKey) -> Result<Self, KeycodeError> {
        Self::set_credit(full_id, UNLOCK_HOURS, secret_key)
    }

    /// Type digit plus the 2-digit truncated message ID.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Five zero-padded body digits.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Six truncated MAC digits.
    pub fn mac(&self) -> &str {
        &self.mac
    }

    /// Renders the keycode with explicit formatting: digits grouped from
    /// the left by `group_len`, joined with `separator`, wrapped in
    /// `prefix` and `suffix`.
    pub fn to_keycode_with(
        &self,
        prefix: &str,
        suffix: &str,
        separator: &str,
        group_len: usize,
    ) -> Result<String, KeycodeError> {
        debug_assert!(group_len > 0);
        let raw = format!("{}{}{}", self.header, self.body, self.mac);
        let keycode = obscure(&raw, 1)?;

        let mut formatted = String::new();
        let mut index = 0;
        while index < keycode.len() {
            let end = keycode.len().min(index + group_len);
            formatted.push_str(&keycode[index..end]);
            if index < keycode.len().saturating_sub(group_len) {
                formatted.push_str(separator);
            }
            index += group_len;
        }
        Ok(format!("{prefix}{formatted}{suffix}"))
    }
}

impl Message for FullMessage {
    fn to_keycode(&self) -> Result<String, KeycodeError> {
        self.to_keycode_with("*", "#", " ", 3)
    }
}

/// Truncated MAC digits: the keyed hash of
/// `[full_id LE u32][type_code][body value LE u32]` reduced to 32 bits,
/// rendered as zero-padded decimal, last six characters kept.
fn generate_mac(
    full_id: u16,
    type_code: FullTypeCode,
    body_value: u32,
    secret_key: &SecretKey,
) -> String {
    let mut buffer = BytesMut::with_capacity(9);
    buffer.put_u32_le(u32::from(full_id));
    buffer.put_u8(type_code.into());
    buffer.put_u32_le(body_value);
    let reduced = sip_digest(secret_key, &buffer) as u32;
    let decimal = format!("{reduced:06}");
    decimal[decimal.len() - FULL_MAC_DIGITS..].to_string()
}

/// Applies (`sign = 1`) or removes (`sign = -1`) the digit-wise obscuring
/// transform on a raw 14-digit message string.
///
/// The last six digits (the MAC) seed the transform and pass through
/// unchanged, so both directions derive the identical pseudorandom stream.
/// Each of the first eight digits has `sign` times its pseudorandom addend
/// applied modulo 10, Euclidean, so every output digit stays in `0..=9`.
pub fn obscure(digits: &str, sign: i32) -> Result<String, KeycodeError> {
    if digits.len() != FULL_KEYCODE_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(KeycodeError::InvalidDigitString(digits.to_string()));
    }
    let mac_digits = &digits[digits.len() - FULL_MAC_DIGITS..];
    let seed = mac_digits
        .parse::<u32>()
        .map_err(|_| KeycodeError::InvalidDigitString(digits.to_string()))?;
    let seed_bytes = seed.to_be_bytes();

    // One addend in [0, 255] per obscured digit.
    let obscured_digits = FULL_KEYCODE_DIGITS - FULL_MAC_DIGITS;
    let reversed = pseudorandom_bits(&seed_bytes, obscured_digits * 8);
    let addends = repack_to_buffer_bottom(&reversed, obscured_digits * 8);

    let mut obscured = String::with_capacity(FULL_KEYCODE_DIGITS);
    for (index, byte) in digits.bytes().take(obscured_digits).enumerate() {
        let digit = i32::from(byte - b'0');
        let shifted = (digit + sign * i32::from(addends[index])).rem_euclid(10);
        obscured.push(char::from(b'0' + shifted as u8));
    }
    obscured.push_str(mac_digits);
    Ok(obscured)
}
