use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use bazaar_auth::{CredentialStore, Email, PasswordDigest, StoredCredential};
use bazaar_core::{StoreError, UserId};

#[derive(Debug, Clone)]
struct UserRecord {
    email: Email,
    password_hash: PasswordDigest,
    is_admin: bool,
}

#[derive(Debug, Default)]
struct Users {
    last_id: i64,
    by_id: HashMap<UserId, UserRecord>,
    by_email: HashMap<Email, UserId>,
}

/// In-memory credential store.
///
/// Intended for tests/dev. Each operation takes the lock once, so inserts
/// are atomic with respect to the email uniqueness check.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Users>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Out-of-band admin provisioning (there is no endpoint for this).
    pub fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<(), StoreError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let record = users.by_id.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        record.is_admin = is_admin;
        Ok(())
    }

    /// Remove a user record. Outstanding tokens stay cryptographically valid.
    pub fn remove_user(&self, user_id: UserId) -> Result<(), StoreError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let record = users.by_id.remove(&user_id).ok_or(StoreError::NotFound)?;
        users.by_email.remove(&record.email);
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert_user(
        &self,
        email: &Email,
        password_hash: &PasswordDigest,
    ) -> Result<UserId, StoreError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        if users.by_email.contains_key(email) {
            return Err(StoreError::Duplicate);
        }

        users.last_id += 1;
        let user_id = UserId::from_raw(users.last_id);
        users.by_email.insert(email.clone(), user_id);
        users.by_id.insert(
            user_id,
            UserRecord {
                email: email.clone(),
                password_hash: password_hash.clone(),
                is_admin: false,
            },
        );
        Ok(user_id)
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<StoredCredential, StoreError> {
        let users = self
            .inner
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        let user_id = *users.by_email.get(email).ok_or(StoreError::NotFound)?;
        let record = users.by_id.get(&user_id).ok_or(StoreError::NotFound)?;
        Ok(StoredCredential {
            user_id,
            password_hash: record.password_hash.clone(),
        })
    }

    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StoreError> {
        let users = self
            .inner
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        users
            .by_id
            .get(&user_id)
            .map(|r| r.is_admin)
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    fn digest() -> PasswordDigest {
        PasswordDigest::from_stored("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA")
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_enforces_unique_email() {
        let store = InMemoryCredentialStore::new();
        let a = store.insert_user(&email("a@example.com"), &digest()).await.unwrap();
        let b = store.insert_user(&email("b@example.com"), &digest()).await.unwrap();
        assert!(b > a);

        assert_eq!(
            store.insert_user(&email("a@example.com"), &digest()).await,
            Err(StoreError::Duplicate)
        );
    }

    #[tokio::test]
    async fn new_users_are_not_admins_until_provisioned() {
        let store = InMemoryCredentialStore::new();
        let id = store.insert_user(&email("a@example.com"), &digest()).await.unwrap();
        assert_eq!(store.find_admin_flag(id).await, Ok(false));

        store.set_admin(id, true).unwrap();
        assert_eq!(store.find_admin_flag(id).await, Ok(true));

        store.set_admin(id, false).unwrap();
        assert_eq!(store.find_admin_flag(id).await, Ok(false));
    }

    #[tokio::test]
    async fn unknown_lookups_are_not_found() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(
            store.find_user_by_email(&email("ghost@example.com")).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(
            store.find_admin_flag(UserId::from_raw(99)).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn removed_users_disappear_from_both_indexes() {
        let store = InMemoryCredentialStore::new();
        let id = store.insert_user(&email("a@example.com"), &digest()).await.unwrap();
        store.remove_user(id).unwrap();

        assert_eq!(store.find_admin_flag(id).await, Err(StoreError::NotFound));
        assert!(store.insert_user(&email("a@example.com"), &digest()).await.is_ok());
    }
}
