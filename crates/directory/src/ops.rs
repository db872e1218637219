//! Directory operations: list/add/update/delete clients, grant access.

use deskbook_auth::{allowed, hash_secret};
use deskbook_core::{AccessLevel, DirectoryError, Role, normalize_client_key};
use deskbook_store::{
    ClientChanges, ClientRow, DirectoryDb, GrantForClient, NewClient, UserRow,
};

use crate::fields::{ClientPatch, tags_to_json};

/// 1-indexed page request.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

/// One page of clients plus the total across all pages.
#[derive(Debug, Clone)]
pub struct PeerPage {
    pub total: i64,
    pub clients: Vec<ClientRow>,
}

/// System-role gate, applied uniformly to admin-only operations.
pub fn require_role(actor: &UserRow, role: Role) -> Result<(), DirectoryError> {
    if actor.role == role {
        Ok(())
    } else {
        Err(DirectoryError::Forbidden)
    }
}

/// The directory service: all use-case operations over one storage handle.
#[derive(Clone)]
pub struct Directory {
    db: DirectoryDb,
}

impl Directory {
    pub fn new(db: DirectoryDb) -> Self {
        Self { db }
    }

    /// Clients visible to `actor`: all of them for the admin role, otherwise
    /// exactly those with a grant at any level. Stable insertion order.
    pub async fn list_peers(&self, actor: &UserRow, page: Page) -> Result<PeerPage, DirectoryError> {
        let number = i64::from(page.number.max(1));
        let size = i64::from(page.size);
        // Saturate rather than overflow on absurd page parameters; a
        // past-the-end offset just yields an empty slice.
        let offset = (number - 1).saturating_mul(size);

        let (total, clients) = if actor.role.is_admin() {
            (
                self.db.count_clients().await?,
                self.db.list_clients_page(size, offset).await?,
            )
        } else {
            (
                self.db.count_clients_for_user(actor.id).await?,
                self.db
                    .list_clients_for_user_page(actor.id, size, offset)
                    .await?,
            )
        };

        Ok(PeerPage { total, clients })
    }

    /// Upsert a client. An existing record becomes a partial update gated on
    /// `write`; an absent one is created together with the creator's `admin`
    /// grant. Two calls racing on the same new identifier resolve
    /// deterministically: the loser's insert hits the uniqueness constraint
    /// and retries as an update.
    pub async fn add_peer(
        &self,
        actor: &UserRow,
        raw_id: &str,
        patch: ClientPatch,
    ) -> Result<(), DirectoryError> {
        let key = normalize_client_key(raw_id)?;

        for _ in 0..2 {
            if let Some(existing) = self.db.find_client_by_key(&key).await? {
                self.check(actor, &existing, AccessLevel::Write).await?;
                return self.apply_patch(&existing, &patch).await;
            }

            match self
                .db
                .create_client_with_owner(&key, &new_client_fields(&patch)?, actor.id)
                .await
            {
                Ok(client) => {
                    tracing::info!(client = %client.client_key, user = %actor.username, "client created");
                    return Ok(());
                }
                // Lost a create race; the winner's row now exists.
                Err(deskbook_store::DatabaseError::Conflict(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(DirectoryError::conflict("client id already exists"))
    }

    /// Update-only variant of [`Directory::add_peer`]: fails with `NotFound`
    /// instead of creating.
    pub async fn update_peer(
        &self,
        actor: &UserRow,
        raw_id: &str,
        patch: ClientPatch,
    ) -> Result<(), DirectoryError> {
        let key = normalize_client_key(raw_id)?;

        let Some(existing) = self.db.find_client_by_key(&key).await? else {
            return Err(DirectoryError::NotFound);
        };
        self.check(actor, &existing, AccessLevel::Write).await?;
        self.apply_patch(&existing, &patch).await
    }

    /// Delete a client and every grant referencing it. Requires `admin`
    /// level on that client.
    pub async fn delete_peer(&self, actor: &UserRow, raw_id: &str) -> Result<(), DirectoryError> {
        let key = normalize_client_key(raw_id)?;

        let Some(existing) = self.db.find_client_by_key(&key).await? else {
            return Err(DirectoryError::NotFound);
        };
        self.check(actor, &existing, AccessLevel::Admin).await?;

        self.db.delete_client(existing.id).await?;
        tracing::info!(client = %key, user = %actor.username, "client deleted");
        Ok(())
    }

    /// Upsert the grant `(target_user, client) -> level`, recording `actor`
    /// as grantor. Admin-role only; this is a system-role check, independent
    /// of per-client grants.
    pub async fn grant(
        &self,
        actor: &UserRow,
        target_user_id: i64,
        client_id: i64,
        level: AccessLevel,
    ) -> Result<(), DirectoryError> {
        require_role(actor, Role::Admin)?;

        let target = self.db.get_user(target_user_id).await?;
        let client = self.db.get_client(client_id).await?;

        self.db
            .upsert_grant(target.id, client.id, level, actor.id)
            .await?;
        tracing::info!(
            user = %target.username,
            client = %client.client_key,
            level = %level,
            granted_by = %actor.username,
            "grant recorded"
        );
        Ok(())
    }

    /// All grants on a client with grantee/grantor detail. Admin-role only.
    pub async fn list_grants(
        &self,
        actor: &UserRow,
        client_id: i64,
    ) -> Result<Vec<GrantForClient>, DirectoryError> {
        require_role(actor, Role::Admin)?;
        Ok(self.db.list_grants_for_client(client_id).await?)
    }

    /// Every client record, regardless of grants. Admin-role only.
    pub async fn list_all_clients(&self, actor: &UserRow) -> Result<Vec<ClientRow>, DirectoryError> {
        require_role(actor, Role::Admin)?;
        Ok(self.db.list_all_clients().await?)
    }

    pub(crate) fn db(&self) -> &DirectoryDb {
        &self.db
    }

    /// Resolve whether `actor` may act on `client` at `level`; the admin
    /// role skips the grant lookup entirely.
    async fn check(
        &self,
        actor: &UserRow,
        client: &ClientRow,
        level: AccessLevel,
    ) -> Result<(), DirectoryError> {
        let grant = if actor.role.is_admin() {
            None
        } else {
            self.db.get_grant_level(actor.id, client.id).await?
        };

        if allowed(actor.role, grant, level) {
            Ok(())
        } else {
            Err(DirectoryError::Forbidden)
        }
    }

    /// Merge a patch over an existing row and persist the full column set.
    /// Omitted fields keep their stored values.
    async fn apply_patch(
        &self,
        existing: &ClientRow,
        patch: &ClientPatch,
    ) -> Result<(), DirectoryError> {
        let changes = ClientChanges {
            alias: match &patch.alias {
                Some(value) => value.clone(),
                None => existing.alias.clone(),
            },
            notes: match &patch.notes {
                Some(value) => value.clone(),
                None => existing.notes.clone(),
            },
            tags: match &patch.tags {
                Some(tags) => tags_to_json(tags.clone()),
                None => existing.tags.clone(),
            },
            access_hash: match patch.secret.as_deref() {
                Some(secret) if !secret.is_empty() => Some(rehash(secret)?),
                _ => existing.access_hash.clone(),
            },
        };

        self.db.update_client(existing.id, &changes).await?;
        Ok(())
    }
}

fn new_client_fields(patch: &ClientPatch) -> Result<NewClient, DirectoryError> {
    Ok(NewClient {
        alias: patch.alias.clone().flatten(),
        notes: patch.notes.clone().flatten(),
        tags: tags_to_json(patch.tags.clone().unwrap_or_default()),
        access_hash: match patch.secret.as_deref() {
            Some(secret) if !secret.is_empty() => Some(rehash(secret)?),
            _ => None,
        },
    })
}

fn rehash(secret: &str) -> Result<String, DirectoryError> {
    hash_secret(secret).map_err(|e| DirectoryError::internal(format!("secret hashing failed: {e}")))
}
