//! Row models for the directory store.

use serde::{Deserialize, Serialize};

use deskbook_core::{AccessLevel, Role};

/// A user identity record. `username` is unique and immutable once set.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A directory entry for one remote endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientRow {
    pub id: i64,
    /// External identifier, whitespace-stripped, globally unique.
    pub client_key: String,
    pub alias: Option<String>,
    pub notes: Option<String>,
    /// JSON array text; see [`ClientRow::tag_list`].
    pub tags: String,
    pub access_hash: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ClientRow {
    /// Decode the stored tag set. Unparseable text reads as no tags.
    pub fn tag_list(&self) -> Vec<String> {
        serde_json::from_str(&self.tags).unwrap_or_default()
    }
}

/// One explicit (user, client, level) access record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GrantRow {
    pub id: i64,
    pub user_id: i64,
    pub client_id: i64,
    #[sqlx(try_from = "String")]
    pub level: AccessLevel,
    pub granted_by: Option<i64>,
    pub granted_at: i64,
}

/// Grant joined with the grantee's username, for admin inspection.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GrantForClient {
    pub user_id: i64,
    pub username: String,
    #[sqlx(try_from = "String")]
    pub level: AccessLevel,
    pub granted_by: Option<i64>,
    pub granted_at: i64,
}

/// Field values for a client insert.
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub alias: Option<String>,
    pub notes: Option<String>,
    /// JSON array text.
    pub tags: String,
    pub access_hash: Option<String>,
}
