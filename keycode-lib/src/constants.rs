// Shared constants for both keycode protocols

/// Length of a device secret key in bytes
pub const SECRET_KEY_LEN: usize = 16;

/// Largest valid message ID; 65535 is reserved
pub const MAX_MESSAGE_ID: u16 = 65534;

/// Transmitted size of a small-protocol message (6 + 2 + 8 + 12 bits)
pub const SMALL_MESSAGE_BITS: usize = 28;

/// Truncated MAC width in the small protocol
pub const SMALL_MAC_BITS: usize = 12;

/// Rendered digit count of a small-protocol keycode
pub const SMALL_KEYCODE_DIGITS: usize = 14;

/// Rendered digit count of a full-protocol keycode (1 type + 2 id + 5 body + 6 MAC)
pub const FULL_KEYCODE_DIGITS: usize = 14;

/// Decimal digits in a full-protocol message body
pub const FULL_BODY_DIGITS: usize = 5;

/// Decimal digits kept from the full-protocol MAC
pub const FULL_MAC_DIGITS: usize = 6;

/// Hour value reserved to mean "unlock" in the full protocol
pub const UNLOCK_HOURS: u64 = 99_999;

/// Increment code reserved to mean "unlock" in the small protocol
pub const UNLOCK_INCREMENT: u8 = 255;

/// Day-count sentinel requesting the unlock increment
pub const UNLOCK_DAYS: u64 = u64::MAX;

/// Days covered by one increment step in the coarse credit tier
pub const COARSE_DAYS_PER_INCREMENT: u64 = 3;

/// Seconds per hour, for full-protocol credit rounding
pub const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Seconds per day, for small-protocol credit rounding
pub const SECONDS_PER_DAY: u64 = SECONDS_PER_HOUR * 24;
