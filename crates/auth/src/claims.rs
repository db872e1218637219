//! JWT claims embedded in identity tokens.

use serde::{Deserialize, Serialize};

/// Claims carried by an issued identity token.
///
/// The subject is the username; tokens carry no role or grant data so that
/// permission changes take effect on the next request rather than at the next
/// token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Unique token id.
    pub jti: String,
    /// Subject (username).
    pub sub: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}
