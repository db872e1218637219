//! The permission resolver.
//!
//! A single pure function decides every access question in the system. There
//! is deliberately no other rule: no group membership, no inheritance between
//! clients, no negative grants.

use deskbook_core::{AccessLevel, Role};

/// Decide whether an account may act on a client at `requested` level.
///
/// 1. The `admin` role is a global override: always allowed.
/// 2. Without an explicit grant, nothing is allowed.
/// 3. Otherwise the held grant must be at or above the requested level under
///    `read < write < admin`.
///
/// - No IO
/// - No panics
pub fn allowed(role: Role, grant: Option<AccessLevel>, requested: AccessLevel) -> bool {
    if role.is_admin() {
        return true;
    }
    match grant {
        Some(held) => held >= requested,
        None => false,
    }
}
