//! Random slug suffixes.

use crate::error::AppError;
use serde_json::json;

/// Random bytes per suffix, hex encoded to twice as many characters.
const SUFFIX_BYTES: usize = 1;

/// Generates a random two-character lowercase hex suffix.
///
/// Uses `getrandom` for entropy.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn random_suffix() -> Result<String, AppError> {
    let mut buffer = [0u8; SUFFIX_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Random number generator failed",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(hex::encode(buffer))
}
