//! Domain error taxonomy.

use thiserror::Error;

/// Result type used across the directory domain.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory-level error.
///
/// `InvalidCredentials` and `Unauthenticated` are deliberately surfaced
/// identically to callers; the distinction exists only for internal logging.
/// Infrastructure failures are folded into `Internal` at the layer boundary
/// and never leak detail to clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Login failed: unknown username or wrong password (indistinguishable).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, tampered, or expired bearer token.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Role or grant check failed for an authenticated user.
    #[error("forbidden")]
    Forbidden,

    /// A client or user record was not found.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated (duplicate identifier).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Malformed input (empty identifier, unknown enum value, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Storage or crypto failure; surfaced to clients as a generic error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DirectoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
