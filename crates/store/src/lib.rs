//! `deskbook-store` — SQLite persistence for the directory service.
//!
//! Owns the three entity tables (users, clients, grants) and every query that
//! touches them. Multi-row writes that must be atomic — client creation plus
//! the creator's grant, and delete-with-cascade — live here as transactional
//! composites so callers cannot observe a half-written state.

mod db;
mod models;
mod queries_clients;
mod queries_grants;
mod queries_users;

#[cfg(test)]
mod tests;

pub use db::{DatabaseError, DirectoryDb};
pub use models::{ClientRow, GrantForClient, GrantRow, NewClient, UserRow};
pub use queries_clients::ClientChanges;
