pub mod bits;
pub mod constants;
pub mod credit;
pub mod error;
pub mod factory;
pub mod full;
pub mod message;
pub mod prng;
pub mod small;

// Re-export the high-level surface for easy access
pub use error::KeycodeError;
pub use factory::{CreditAction, KeycodeData, KeycodeMetadata, Protocol, add_credit, unlock};
pub use full::FullMessage;
pub use message::{Message, SecretKey};
pub use small::SmallMessage;
