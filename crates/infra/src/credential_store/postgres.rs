//! Postgres-backed credential store (`users` table).

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use bazaar_auth::{CredentialStore, Email, PasswordDigest, StoredCredential};
use bazaar_core::{StoreError, UserId};

use crate::db::map_sqlx_error;

/// Credential store over the `users` table.
///
/// Every method is a single statement; uniqueness of `email` is enforced by
/// the table constraint, not by a read-then-write.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(skip_all)]
    async fn insert_user(
        &self,
        email: &Email,
        password_hash: &PasswordDigest,
    ) -> Result<UserId, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(UserId::from_raw(id))
    }

    #[tracing::instrument(skip_all)]
    async fn find_user_by_email(&self, email: &Email) -> Result<StoredCredential, StoreError> {
        let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;

        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let hash: String = row.try_get("password_hash").map_err(map_sqlx_error)?;
        Ok(StoredCredential {
            user_id: UserId::from_raw(id),
            password_hash: PasswordDigest::from_stored(hash),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT is_admin FROM users WHERE id = $1")
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;

        row.try_get::<bool, _>("is_admin").map_err(map_sqlx_error)
    }
}
