use thiserror::Error;

/// The primary error type for the keycode library.
///
/// Every variant is an input-validation failure detected synchronously at
/// construction or at the point the bad value is used; nothing is retryable
/// at this layer and no partial keycode is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeycodeError {
    #[error("unsupported message ID: {0}")]
    UnsupportedMessageId(u16),

    #[error("unsupported message type code: {0}")]
    UnsupportedTypeCode(u8),

    #[error("unsupported number of days: {0}")]
    UnsupportedDays(u64),

    #[error("key mapping must have exactly 4 entries, got {0}")]
    UnsupportedKeyMapping(usize),

    #[error("unsupported keycode protocol: {0:?}")]
    UnsupportedProtocol(String),

    #[error("message body must be exactly 5 decimal digits, got {0:?}")]
    UnsupportedBody(String),

    #[error("expected 14 decimal digits, got {0:?}")]
    InvalidDigitString(String),
}
