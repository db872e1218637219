//! Client queries, including the transactional create-with-owner-grant.

use deskbook_core::AccessLevel;

use super::db::{DatabaseError, DirectoryDb, unix_timestamp};
use super::models::{ClientRow, NewClient};

/// Full column set for a client update, computed by the caller from the
/// existing row plus the requested patch.
#[derive(Debug, Clone)]
pub struct ClientChanges {
    pub alias: Option<String>,
    pub notes: Option<String>,
    /// JSON array text.
    pub tags: String,
    pub access_hash: Option<String>,
}

impl DirectoryDb {
    pub async fn find_client_by_key(
        &self,
        client_key: &str,
    ) -> Result<Option<ClientRow>, DatabaseError> {
        let client = sqlx::query_as::<_, ClientRow>("SELECT * FROM clients WHERE client_key = ?")
            .bind(client_key)
            .fetch_optional(self.pool())
            .await?;
        Ok(client)
    }

    pub async fn get_client(&self, id: i64) -> Result<ClientRow, DatabaseError> {
        sqlx::query_as::<_, ClientRow>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("client {id}")))
    }

    /// Create a client and the creator's `admin` grant in one transaction,
    /// so a client can never exist ownerless. A concurrent insert of the same
    /// key surfaces as [`DatabaseError::Conflict`] with nothing written.
    pub async fn create_client_with_owner(
        &self,
        client_key: &str,
        fields: &NewClient,
        created_by: i64,
    ) -> Result<ClientRow, DatabaseError> {
        let now = unix_timestamp();
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO clients (client_key, alias, notes, tags, access_hash, created_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(client_key)
        .bind(fields.alias.as_deref())
        .bind(fields.notes.as_deref())
        .bind(&fields.tags)
        .bind(fields.access_hash.as_deref())
        .bind(created_by)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let client_id = result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO grants (user_id, client_id, level, granted_by, granted_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(created_by)
        .bind(client_id)
        .bind(AccessLevel::Admin.as_str())
        .bind(created_by)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_client(client_id).await
    }

    pub async fn update_client(
        &self,
        id: i64,
        changes: &ClientChanges,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE clients SET alias = ?, notes = ?, tags = ?, access_hash = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(changes.alias.as_deref())
        .bind(changes.notes.as_deref())
        .bind(&changes.tags)
        .bind(changes.access_hash.as_deref())
        .bind(unix_timestamp())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("client {id}")));
        }
        Ok(())
    }

    /// Delete a client; the `ON DELETE CASCADE` constraint removes every
    /// grant referencing it in the same statement.
    pub async fn delete_client(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("client {id}")));
        }
        Ok(())
    }

    pub async fn list_all_clients(&self) -> Result<Vec<ClientRow>, DatabaseError> {
        let clients = sqlx::query_as::<_, ClientRow>("SELECT * FROM clients ORDER BY id")
            .fetch_all(self.pool())
            .await?;
        Ok(clients)
    }

    pub async fn count_clients(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(self.pool())
            .await?;
        Ok(count.0)
    }

    /// Page of all clients in insertion (rowid) order.
    pub async fn list_clients_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ClientRow>, DatabaseError> {
        let clients =
            sqlx::query_as::<_, ClientRow>("SELECT * FROM clients ORDER BY id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool())
                .await?;
        Ok(clients)
    }

    pub async fn count_clients_for_user(&self, user_id: i64) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM clients c \
             JOIN grants g ON g.client_id = c.id WHERE g.user_id = ?",
        )
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;
        Ok(count.0)
    }

    /// Page of clients the user holds any grant on, insertion order.
    pub async fn list_clients_for_user_page(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ClientRow>, DatabaseError> {
        let clients = sqlx::query_as::<_, ClientRow>(
            "SELECT c.* FROM clients c \
             JOIN grants g ON g.client_id = c.id \
             WHERE g.user_id = ? ORDER BY c.id LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;
        Ok(clients)
    }
}
