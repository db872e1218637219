//! `deskbook-core` — domain foundation for the directory service.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! roles, access levels, the error taxonomy, and client-identifier
//! normalization.

pub mod access;
pub mod error;
pub mod ident;
pub mod role;

pub use access::AccessLevel;
pub use error::{DirectoryError, DirectoryResult};
pub use ident::normalize_client_key;
pub use role::Role;
