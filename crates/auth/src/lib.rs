//! `deskbook-auth` — authentication/authorization boundary.
//!
//! Credential hashing, signed token issuance/verification, and the pure
//! permission resolver. This crate is intentionally decoupled from HTTP and
//! storage.

pub mod claims;
pub mod password;
pub mod resolve;
pub mod token;

pub use claims::Claims;
pub use password::{equalize_verify_timing, hash_secret, verify_secret};
pub use resolve::allowed;
pub use token::{TokenError, TokenService};
