//! Credential Store port.
//!
//! The auth crate stays storage-agnostic; `bazaar-infra` provides in-memory
//! and Postgres implementations.

use async_trait::async_trait;

use bazaar_core::{StoreError, UserId};

use crate::{Email, PasswordDigest};

/// What login needs back from the store for a given email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub user_id: UserId,
    pub password_hash: PasswordDigest,
}

/// Persistence of user credentials and the admin flag.
///
/// Every method is a single-row read or write; implementations provide their
/// own isolation.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user. `StoreError::Duplicate` when the email is taken.
    async fn insert_user(
        &self,
        email: &Email,
        password_hash: &PasswordDigest,
    ) -> Result<UserId, StoreError>;

    async fn find_user_by_email(&self, email: &Email) -> Result<StoredCredential, StoreError>;

    /// Current admin flag. Never cached by callers.
    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StoreError>;
}
