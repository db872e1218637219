//! `deskbook-directory` — the directory use-case layer.
//!
//! Implements the operations the HTTP surface exposes: listing, adding,
//! updating, and deleting clients, granting access, and account management.
//! Every mutation consults the permission resolver first; the creator of a
//! new client receives the system's only automatic grant.

mod accounts;
mod fields;
mod ops;

#[cfg(test)]
mod tests;

pub use accounts::NewUser;
pub use fields::ClientPatch;
pub use ops::{Directory, Page, PeerPage, require_role};
