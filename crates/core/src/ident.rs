//! Client-identifier normalization.

use crate::DirectoryError;

/// Normalize an externally supplied client identifier.
///
/// All whitespace is stripped before uniqueness comparison, so `"ABC 123"`
/// and `"ABC123"` name the same client. An identifier that is empty after
/// stripping is rejected.
pub fn normalize_client_key(raw: &str) -> Result<String, DirectoryError> {
    let key: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if key.is_empty() {
        return Err(DirectoryError::validation("client id is required"));
    }
    Ok(key)
}
