//! Day-count to increment-code mapping for the small protocol.

use crate::constants::{COARSE_DAYS_PER_INCREMENT, UNLOCK_DAYS, UNLOCK_INCREMENT};
use crate::error::KeycodeError;

/// Maps a credit duration in days to the small protocol's 8-bit increment
/// code.
///
/// Days 1 through 180 map one-to-one starting at zero. Days 181 through 405
/// fall into a coarse tier where one increment covers three days.
/// [`UNLOCK_DAYS`] selects the reserved unlock increment; every other value
/// is rejected.
pub fn days_to_increment(days: u64) -> Result<u8, KeycodeError> {
    match days {
        1..=180 => Ok((days - 1) as u8),
        181..=405 => Ok((180 + (days - 181) / COARSE_DAYS_PER_INCREMENT) as u8),
        UNLOCK_DAYS => Ok(UNLOCK_INCREMENT),
        _ => Err(KeycodeError::UnsupportedDays(days)),
    }
}
