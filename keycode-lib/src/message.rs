use crate::constants::SECRET_KEY_LEN;
use crate::error::KeycodeError;

/// Per-device secret hash key, supplied by the caller and never persisted.
pub type SecretKey = [u8; SECRET_KEY_LEN];

/// Anything that can be rendered as a human-transcribable keycode.
pub trait Message {
    /// Renders with the protocol's default prefix, separator, and grouping.
    fn to_keycode(&self) -> Result<String, KeycodeError>;
}
