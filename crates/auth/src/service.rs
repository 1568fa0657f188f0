//! Registration and login.
//!
//! Both flows are single store round trips plus one password hash/verify.
//! Hashing runs on the blocking pool so it never stalls request tasks.

use std::sync::Arc;

use thiserror::Error;

use bazaar_core::{StoreError, UserId};

use crate::{
    CredentialStore, Email, IssuedToken, PasswordDigest, PasswordError, PasswordHasher,
    TokenError, TokenService,
};

/// Verified against when the email is unknown, so that "no such user" and
/// "wrong password" cost the same.
const DECOY_PASSWORD: &str = "bazaar-decoy-credential";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email already registered")]
    EmailTaken,

    /// Unknown email or wrong password; never says which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("credential store failure: {0}")]
    Dependency(String),

    #[error(transparent)]
    Hashing(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Credential issuance and verification on top of a [`CredentialStore`].
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    decoy: PasswordDigest,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
    ) -> Result<Self, PasswordError> {
        let decoy = hasher.hash(DECOY_PASSWORD)?;
        Ok(Self {
            store,
            hasher,
            tokens,
            decoy,
        })
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    /// Register a new user. No token is issued here.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email =
            Email::parse(email).map_err(|e| AuthError::Validation(e.message().to_string()))?;
        if password.is_empty() {
            return Err(AuthError::Validation("password is required".to_string()));
        }

        let digest = self.hash_off_thread(password).await?;

        match self.store.insert_user(&email, &digest).await {
            Ok(user_id) => {
                tracing::info!(%user_id, "user registered");
                Ok(user_id)
            }
            Err(StoreError::Duplicate) => Err(AuthError::EmailTaken),
            Err(e) => Err(AuthError::Dependency(e.to_string())),
        }
    }

    /// Check credentials and mint a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let email =
            Email::parse(email).map_err(|e| AuthError::Validation(e.message().to_string()))?;

        let stored = match self.store.find_user_by_email(&email).await {
            Ok(stored) => Some(stored),
            Err(StoreError::NotFound) => None,
            Err(e) => return Err(AuthError::Dependency(e.to_string())),
        };

        let digest = stored
            .as_ref()
            .map_or_else(|| self.decoy.clone(), |s| s.password_hash.clone());
        let matches = self.verify_off_thread(password, digest).await?;

        match stored {
            Some(stored) if matches => {
                tracing::debug!(user_id = %stored.user_id, "login succeeded");
                Ok(self.tokens.issue(stored.user_id)?)
            }
            _ => {
                tracing::debug!("login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn hash_off_thread(&self, password: &str) -> Result<PasswordDigest, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|_| PasswordError::Hash)?
            .map_err(AuthError::from)
    }

    async fn verify_off_thread(
        &self,
        password: &str,
        digest: PasswordDigest,
    ) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|_| AuthError::Hashing(PasswordError::Hash))
    }
}
