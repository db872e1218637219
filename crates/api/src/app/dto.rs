//! Request bodies, query parameters, and JSON response builders.
//!
//! Field names and response shapes follow the address-book wire protocol the
//! desktop clients speak; builders keep the handlers free of ad-hoc JSON.

use serde::Deserialize;
use serde_json::{Value, json};

use deskbook_core::{AccessLevel, Role};
use deskbook_directory::ClientPatch;
use deskbook_store::{ClientRow, GrantForClient, UserRow};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PeersQuery {
    #[serde(default = "default_page", alias = "page")]
    pub current: u32,
    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct PeerUpsertRequest {
    pub id: String,
    #[serde(flatten)]
    pub fields: ClientPatch,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    pub user_id: i64,
    pub client_id: i64,
    #[serde(default, alias = "permission_type")]
    pub level: AccessLevel,
}

/// Peer entry as the desktop client expects it: the alias falls back to the
/// identifier, absent text fields read as empty strings. The session fields
/// are not tracked by this service and stay empty.
pub fn peer_json(client: &ClientRow) -> Value {
    json!({
        "id": client.client_key,
        "alias": client.alias.as_deref().unwrap_or(&client.client_key),
        "tags": client.tag_list(),
        "note": client.notes.as_deref().unwrap_or(""),
        "username": "",
        "hostname": "",
        "platform": "",
    })
}

pub fn account_json(user: &UserRow) -> Value {
    json!({
        "name": user.username,
        "email": user.email,
        "role": user.role,
    })
}

pub fn user_json(user: &UserRow) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "role": user.role,
        "created_at": rfc3339(user.created_at),
    })
}

pub fn client_json(client: &ClientRow) -> Value {
    json!({
        "id": client.id,
        "client_id": client.client_key,
        "alias": client.alias,
        "tags": client.tag_list(),
        "notes": client.notes,
        "created_by": client.created_by,
        "created_at": rfc3339(client.created_at),
    })
}

pub fn grant_json(grant: &GrantForClient) -> Value {
    // `permission_type` is the key the admin tooling parses; `level` matches
    // the grant request body. Both carry the same value.
    json!({
        "user_id": grant.user_id,
        "user": grant.username,
        "permission_type": grant.level,
        "level": grant.level,
        "granted_by": grant.granted_by,
        "granted_at": rfc3339(grant.granted_at),
    })
}

fn rfc3339(ts: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(ts, 0).map(|t| t.to_rfc3339())
}
