//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use keycode_lib::error::KeycodeError;
#[allow(unused_imports)]
pub use keycode_lib::full::{FullMessage, FullTypeCode};
#[allow(unused_imports)]
pub use keycode_lib::message::{Message, SecretKey};
#[allow(unused_imports)]
pub use keycode_lib::small::{SmallMessage, SmallTypeCode};

/// Secret key of sixteen 0xAB bytes used by most fixed vectors
#[allow(dead_code)]
pub const AB_KEY_HEX: &str = "abababababababababababababababab";

/// Secret key used by the quick-start vectors
#[allow(dead_code)]
pub const README_KEY_HEX: &str = "deadbeefdeadbeefdeadbeefdeadbeef";

/// Decode a 32-hex-character secret key for testing
pub fn secret_from_hex(hex_key: &str) -> SecretKey {
    let bytes = hex::decode(hex_key).expect("Failed to decode hex key");
    bytes.try_into().expect("Secret key must be 16 bytes")
}
