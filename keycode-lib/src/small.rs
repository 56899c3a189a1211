//! The small keycode protocol, sized for 4-key keypads.

use bytes::{BufMut, BytesMut};
use modular_bitfield::prelude::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::constants::{MAX_MESSAGE_ID, SMALL_KEYCODE_DIGITS, UNLOCK_DAYS};
use crate::credit::days_to_increment;
use crate::error::KeycodeError;
use crate::message::{Message, SecretKey};
use crate::prng::{pseudorandom_bits, sip_digest};

/// Key legends on the physical 4-key keypad, indexed by 2-bit digit value.
const DEFAULT_KEY_MAPPING: [&str; 4] = ["2", "3", "4", "5"];

/// Message type codes transmitted in the small protocol's 2-bit field.
///
/// Credit messages use codes 0 and 2 and may be applied at most once per
/// device; maintenance/test messages (code 3) are unrestricted. Code 1 is
/// reserved and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SmallTypeCode {
    AddCredit = 0,
    AddCreditAlt = 2,
    Maintenance = 3,
}

/// Packed 16-bit wire word: 8-bit body, 2-bit type code, 6-bit truncated
/// message ID.
#[bitfield(bytes = 2)]
#[derive(Debug, Clone, Copy, PartialEq)]
struct MessageWord {
    body: u8,
    type_code: B2,
    short_id: B6,
}

/// The 12-bit truncated MAC in its 2-byte wire field.
#[bitfield(bytes = 2)]
#[derive(Debug, Clone, Copy, PartialEq)]
struct MacField {
    value: B12,
    #[skip]
    unused: B4,
}

/// A small-protocol keycode message; immutable once constructed.
///
/// Transmits 28 significant bits: 6-bit truncated message ID, 2-bit type
/// code, 8-bit body, 12-bit truncated MAC. The receiver expands the
/// truncated ID back to the full value out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmallMessage {
    message_id: u16,
    type_code: SmallTypeCode,
    body: u8,
    mac: u16,
}

impl SmallMessage {
    /// Creates a message, validating the message ID and type code. The body
    /// byte is protocol-specific and carried unchecked.
    pub fn new(
        message_id: u16,
        type_code: u8,
        body: u8,
        secret_key: &SecretKey,
    ) -> Result<Self, KeycodeError> {
        if message_id > MAX_MESSAGE_ID {
            return Err(KeycodeError::UnsupportedMessageId(message_id));
        }
        let type_code = SmallTypeCode::try_from(type_code)
            .map_err(|_| KeycodeError::UnsupportedTypeCode(type_code))?;
        let mac = generate_mac(message_id, type_code, body, secret_key);
        Ok(Self {
            message_id,
            type_code,
            body,
            mac,
        })
    }

    /// Add-credit message for a whole number of days.
    pub fn add_credit(
        message_id: u16,
        days: u64,
        secret_key: &SecretKey,
    ) -> Result<Self, KeycodeError> {
        Self::new(
            message_id,
            SmallTypeCode::AddCredit.into(),
            days_to_increment(days)?,
            secret_key,
        )
    }

    /// Unlock message, carrying the reserved increment code as its body.
    pub fn unlock(message_id: u16, secret_key: &SecretKey) -> Result<Self, KeycodeError> {
        Self::new(
            message_id,
            SmallTypeCode::AddCredit.into(),
            days_to_increment(UNLOCK_DAYS)?,
            secret_key,
        )
    }

    /// The packed id/type/body wire word, body byte first.
    pub fn message_and_body_bytes(&self) -> [u8; 2] {
        MessageWord::new()
            .with_body(self.body)
            .with_type_code(self.type_code.into())
            .with_short_id((self.message_id & 0x3F) as u8)
            .into_bytes()
    }

    /// The truncated MAC in wire order, low byte first.
    pub fn mac_bytes(&self) -> [u8; 2] {
        MacField::new().with_value(self.mac).into_bytes()
    }

    /// Renders the keycode with explicit formatting.
    ///
    /// `key_mapping` maps the four 2-bit digit values to key legends; `None`
    /// selects the physical default `["2", "3", "4", "5"]`. A supplied
    /// mapping must have exactly four entries. A separator is inserted
    /// whenever the rendered length, separators excluded, reaches a multiple
    /// of `group_len`; prefix characters count toward the first group.
    pub fn to_keycode_with(
        &self,
        prefix: &str,
        separator: &str,
        group_len: usize,
        key_mapping: Option<&[&str]>,
    ) -> Result<String, KeycodeError> {
        debug_assert!(group_len > 0);
        let mapping: &[&str] = match key_mapping {
            None => &DEFAULT_KEY_MAPPING,
            Some(entries) if entries.len() == 4 => entries,
            Some(entries) => return Err(KeycodeError::UnsupportedKeyMapping(entries.len())),
        };

        let obscured = obscure(self.message_and_body_bytes(), self.mac_bytes());

        // Expand the 28 significant bits into base-4 digits, low-order bit
        // pairs first, so the transmission order is the reverse of the
        // array order.
        let mut digits = Vec::with_capacity(SMALL_KEYCODE_DIGITS);
        for &byte in &obscured[..3] {
            digits.push(byte & 0x3);
            digits.push((byte >> 2) & 0x3);
            digits.push((byte >> 4) & 0x3);
            digits.push((byte >> 6) & 0x3);
        }
        digits.push(obscured[3] & 0x3);
        digits.push((obscured[3] >> 2) & 0x3);

        let mut rendered = String::from(prefix);
        let mut separators_added = 0i64;
        for &digit in digits.iter().rev() {
            if (rendered.len() as i64 - separators_added) % group_len as i64 == 0 {
                rendered.push_str(separator);
                separators_added += 1;
            }
            rendered.push_str(mapping[usize::from(digit)]);
        }
        Ok(rendered)
    }
}

impl Message for SmallMessage {
    fn to_keycode(&self) -> Result<String, KeycodeError> {
        self.to_keycode_with("1", " ", 3, None)
    }
}

/// Truncated MAC over the message's binary fields: the top 12 bits of the
/// keyed hash of `[message_id LE u32][type_code][body]`.
fn generate_mac(
    message_id: u16,
    type_code: SmallTypeCode,
    body: u8,
    secret_key: &SecretKey,
) -> u16 {
    let mut buffer = BytesMut::with_capacity(6);
    buffer.put_u32_le(u32::from(message_id));
    buffer.put_u8(type_code.into());
    buffer.put_u8(body);
    (sip_digest(secret_key, &buffer) >> 52) as u16
}

/// Obscures the 16-bit wire word with pseudorandom bits seeded by the MAC
/// bytes, then nibble-interleaves the result around the MAC into the
/// 4-byte, 28-significant-bit transmission buffer. Applying the same
/// operation to an obscured buffer recovers the original word; the MAC
/// bytes themselves pass through unchanged.
fn obscure(word: [u8; 2], mac: [u8; 2]) -> [u8; 4] {
    let prng = pseudorandom_bits(&mac, 16);
    let xored = [word[0] ^ prng[0], word[1] ^ prng[1]];
    [
        mac[0],
        (mac[1] & 0x0F) | (xored[0] << 4),
        (xored[0] >> 4) | (xored[1] << 4),
        xored[1] >> 4,
    ]
}
