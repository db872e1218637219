//! Grant queries.

use deskbook_core::AccessLevel;

use super::db::{DatabaseError, DirectoryDb, unix_timestamp};
use super::models::{GrantForClient, GrantRow};

impl DirectoryDb {
    /// Level of the explicit grant for `(user, client)`, if one exists.
    pub async fn get_grant_level(
        &self,
        user_id: i64,
        client_id: i64,
    ) -> Result<Option<AccessLevel>, DatabaseError> {
        let grant = sqlx::query_as::<_, GrantRow>(
            "SELECT * FROM grants WHERE user_id = ? AND client_id = ?",
        )
        .bind(user_id)
        .bind(client_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(grant.map(|g| g.level))
    }

    /// Create or overwrite the grant for `(user, client)`.
    ///
    /// The `(user_id, client_id)` uniqueness constraint guarantees at most
    /// one row per pair; a second grant replaces level and grantor rather
    /// than duplicating.
    pub async fn upsert_grant(
        &self,
        user_id: i64,
        client_id: i64,
        level: AccessLevel,
        granted_by: i64,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO grants (user_id, client_id, level, granted_by, granted_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, client_id) DO UPDATE SET \
               level = excluded.level, \
               granted_by = excluded.granted_by, \
               granted_at = excluded.granted_at",
        )
        .bind(user_id)
        .bind(client_id)
        .bind(level.as_str())
        .bind(granted_by)
        .bind(unix_timestamp())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// All grants on a client, joined with grantee usernames.
    pub async fn list_grants_for_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<GrantForClient>, DatabaseError> {
        let grants = sqlx::query_as::<_, GrantForClient>(
            "SELECT g.user_id, u.username, g.level, g.granted_by, g.granted_at \
             FROM grants g JOIN users u ON u.id = g.user_id \
             WHERE g.client_id = ? ORDER BY g.id",
        )
        .bind(client_id)
        .fetch_all(self.pool())
        .await?;
        Ok(grants)
    }
}
