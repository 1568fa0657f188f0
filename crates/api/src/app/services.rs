//! Service wiring: stores, password hasher and token service.

use std::sync::Arc;

use anyhow::Context as _;

use bazaar_auth::{AuthService, CredentialStore, PasswordError, PasswordHasher, TokenService};
use bazaar_infra::{
    InMemoryCredentialStore, InMemoryOrderStore, InMemoryProductStore, OrderStore,
    PostgresCredentialStore, PostgresOrderStore, PostgresProductStore, ProductStore, db,
};

use crate::config::ApiConfig;
use crate::middleware::AuthState;

#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<dyn CredentialStore>,
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
}

impl AppServices {
    pub fn new(
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
        credentials: Arc<dyn CredentialStore>,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Result<Self, PasswordError> {
        let auth = Arc::new(AuthService::new(credentials.clone(), hasher, tokens.clone())?);
        Ok(Self {
            auth,
            tokens,
            credentials,
            products,
            orders,
        })
    }

    pub fn in_memory(tokens: Arc<TokenService>, hasher: PasswordHasher) -> Result<Self, PasswordError> {
        Self::new(
            tokens,
            hasher,
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemoryProductStore::new()),
            Arc::new(InMemoryOrderStore::new()),
        )
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            tokens: self.tokens.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

/// Build services from configuration: Postgres when `DATABASE_URL` is set,
/// in-memory stores otherwise.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let tokens = Arc::new(TokenService::new(&config.signing_key));
    let hasher = config.password_hasher()?;

    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory stores, data is lost on exit");
        return Ok(AppServices::in_memory(tokens, hasher)?);
    };

    let pool = db::connect(url).await.context("failed to connect to postgres")?;
    db::ensure_schema(&pool)
        .await
        .context("failed to apply database schema")?;
    tracing::info!("using postgres stores");

    Ok(AppServices::new(
        tokens,
        hasher,
        Arc::new(PostgresCredentialStore::new(pool.clone())),
        Arc::new(PostgresProductStore::new(pool.clone())),
        Arc::new(PostgresOrderStore::new(pool)),
    )?)
}
