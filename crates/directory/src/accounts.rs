//! Account operations: authentication, user creation, bootstrap.

use deskbook_auth::{equalize_verify_timing, hash_secret, verify_secret};
use deskbook_core::{DirectoryError, Role};
use deskbook_store::UserRow;

use crate::ops::{Directory, require_role};

/// Input for user creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub role: Role,
}

impl Directory {
    /// Verify a username/password pair.
    ///
    /// An unknown username and a wrong password both yield
    /// `InvalidCredentials`; a decoy verification runs on the miss path so
    /// the two cases take comparable time.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRow, DirectoryError> {
        let Some(user) = self.db().find_user_by_username(username).await? else {
            equalize_verify_timing(password);
            return Err(DirectoryError::InvalidCredentials);
        };

        if !verify_secret(password, &user.password_hash) {
            return Err(DirectoryError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Resolve a verified token subject to its account. A username that no
    /// longer exists reads as an invalid token.
    pub async fn user_for_token(&self, username: &str) -> Result<UserRow, DirectoryError> {
        self.db()
            .find_user_by_username(username)
            .await?
            .ok_or(DirectoryError::Unauthenticated)
    }

    /// Create a user account. Admin-role only; a duplicate username is a
    /// `Conflict`.
    pub async fn create_user(
        &self,
        actor: &UserRow,
        new: NewUser,
    ) -> Result<UserRow, DirectoryError> {
        require_role(actor, Role::Admin)?;

        let username = new.username.trim();
        if username.is_empty() {
            return Err(DirectoryError::validation("username is required"));
        }
        if new.password.is_empty() {
            return Err(DirectoryError::validation("password is required"));
        }

        let password_hash = hash_secret(&new.password)
            .map_err(|e| DirectoryError::internal(format!("password hashing failed: {e}")))?;

        let user = self
            .db()
            .create_user(username, &password_hash, new.email.as_deref(), new.role)
            .await?;
        tracing::info!(user = %user.username, role = %user.role, created_by = %actor.username, "user created");
        Ok(user)
    }

    /// All user accounts. Admin-role only.
    pub async fn list_users(&self, actor: &UserRow) -> Result<Vec<UserRow>, DirectoryError> {
        require_role(actor, Role::Admin)?;
        Ok(self.db().list_users().await?)
    }

    /// Out-of-band bootstrap: create the initial admin account unless the
    /// username is already taken. Returns whether an account was created.
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, DirectoryError> {
        if self.db().find_user_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_secret(password)
            .map_err(|e| DirectoryError::internal(format!("password hashing failed: {e}")))?;
        self.db()
            .create_user(username, &password_hash, None, Role::Admin)
            .await?;
        tracing::info!(user = username, "bootstrap admin created");
        Ok(true)
    }
}
