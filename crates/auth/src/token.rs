//! Signed, time-bound identity tokens (HS256 JWT).
//!
//! The service is stateless: there is no revocation list, and a token stays
//! valid until its embedded expiry even if the account's role or password
//! changes in the meantime. This is a documented simplicity/security
//! trade-off; stronger session control would need a server-side deny-list or
//! a short-TTL-plus-refresh scheme.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::Claims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Tampered, wrongly signed, malformed, or expired token.
    ///
    /// All failure modes collapse into one variant so nothing about the
    /// token's contents leaks to the caller.
    #[error("invalid token")]
    Invalid,
}

/// Issues and verifies signed identity tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service signing with `secret`, issuing tokens that
    /// expire `ttl` after issuance.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for `username`, expiring at now + TTL.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now())
    }

    fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            jti: uuid::Uuid::new_v4().to_string(),
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verify signature and expiry, returning the embedded username.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret-key", Duration::days(7))
    }

    #[test]
    fn round_trip_returns_subject() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn expired_token_is_invalid() {
        let tokens = service();
        // Issue as if 30 days ago; the 7-day TTL puts expiry well in the past.
        let token = tokens
            .issue_at("alice", Utc::now() - Duration::days(30))
            .unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let tokens = service();
        let mut token = tokens.issue("alice").unwrap();
        // Flip a character in the payload segment.
        let mid = token.len() / 2;
        let original = token.remove(mid);
        let replacement = if original == 'A' { 'B' } else { 'A' };
        token.insert(mid, replacement);
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let issuer = service();
        let verifier = TokenService::new(b"different-secret", Duration::days(7));
        let token = issuer.issue("alice").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(service().verify("not-a-jwt").is_err());
    }
}
