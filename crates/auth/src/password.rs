//! Secret hashing and verification using argon2id.
//!
//! Used for both user passwords and optional per-client access secrets; the
//! two are never interchangeable because each record stores its own hash.

use std::sync::OnceLock;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Hash a plaintext secret with argon2id and a fresh random salt.
pub fn hash_secret(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plain.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext against a stored argon2id hash.
///
/// A malformed stored hash verifies as `false` rather than erroring, so a
/// caller cannot distinguish a corrupt record from a wrong password.
pub fn verify_secret(plain: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Run a throwaway verification against a fixed hash.
///
/// Called when a username lookup misses, so that "unknown user" and "wrong
/// password" take comparable time and responses stay indistinguishable.
pub fn equalize_verify_timing(plain: &str) {
    static DECOY: OnceLock<String> = OnceLock::new();
    let decoy = DECOY.get_or_init(|| {
        hash_secret("deskbook-decoy-credential").unwrap_or_default()
    });
    let _ = verify_secret(plain, decoy);
}
