//! Identity and admin gates.
//!
//! `require_identity` runs on every `/api` route; `require_admin` runs after
//! it on admin-only routes and re-reads the admin flag from the credential
//! store on each request.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use bazaar_auth::{AuthzError, CredentialStore, TokenVerifier, authorize_admin};

use crate::app::errors::{ApiError, INVALID_TOKEN, MISSING_HEADER};
use crate::context::RequestIdentity;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenVerifier>,
    pub credentials: Arc<dyn CredentialStore>,
}

/// Verify the bearer token and bind the caller's identity to the request.
///
/// Never touches the credential store.
pub async fn require_identity(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let user_id = state.tokens.verify_at(token, Utc::now()).map_err(|e| {
        tracing::debug!(reason = %e, "bearer token rejected");
        ApiError::Unauthenticated(INVALID_TOKEN)
    })?;

    req.extensions_mut().insert(RequestIdentity::new(user_id));
    Ok(next.run(req).await)
}

/// Admit only callers whose stored admin flag is currently set.
pub async fn require_admin(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = req
        .extensions()
        .get::<RequestIdentity>()
        .copied()
        .ok_or_else(|| {
            tracing::error!("admin gate reached without an identity");
            ApiError::Internal
        })?;
    let user_id = identity.user_id();

    let flag = state.credentials.find_admin_flag(user_id).await;
    let grant = authorize_admin(user_id, flag).map_err(|e| match e {
        AuthzError::Forbidden => {
            tracing::warn!(%user_id, path = %req.uri().path(), "admin route denied");
            ApiError::Forbidden
        }
        AuthzError::Indeterminate(reason) => {
            tracing::error!(%user_id, %reason, "admin flag lookup failed");
            ApiError::Dependency
        }
    })?;

    req.extensions_mut().insert(grant);
    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization`. The `Bearer` scheme is optional
/// and matched case-insensitively; a bare token is accepted as-is.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthenticated(MISSING_HEADER))?;

    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthenticated(INVALID_TOKEN))?
        .trim();
    if header.is_empty() {
        return Err(ApiError::Unauthenticated(MISSING_HEADER));
    }
    if header.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::Unauthenticated(INVALID_TOKEN));
    }

    let token = match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => header,
    };
    if token.is_empty() {
        return Err(ApiError::Unauthenticated(INVALID_TOKEN));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{self, HeaderValue, StatusCode},
        middleware::{from_fn, from_fn_with_state},
        routing::get,
    };
    use tower::ServiceExt;

    use bazaar_auth::{Email, PasswordDigest, SigningKey, StoredCredential, TokenService};
    use bazaar_core::{StoreError, UserId};

    use super::*;

    /// Answers every admin lookup with `is_admin` and counts the calls.
    struct CountingStore {
        is_admin: bool,
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn new(is_admin: bool) -> Arc<Self> {
            Arc::new(Self {
                is_admin,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CredentialStore for CountingStore {
        async fn insert_user(
            &self,
            _email: &Email,
            _password_hash: &PasswordDigest,
        ) -> Result<UserId, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::unavailable("read-only"))
        }

        async fn find_user_by_email(&self, _email: &Email) -> Result<StoredCredential, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::NotFound)
        }

        async fn find_admin_flag(&self, _user_id: UserId) -> Result<bool, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.is_admin)
        }
    }

    fn auth_state(store: Arc<CountingStore>) -> AuthState {
        AuthState {
            tokens: Arc::new(TokenService::new(&SigningKey::new("unit-secret").unwrap())),
            credentials: store,
        }
    }

    /// `/admin` behind the admin gate only; `reached` flips when the handler runs.
    fn admin_only_router(state: AuthState, reached: Arc<AtomicBool>) -> Router {
        Router::new()
            .route(
                "/admin",
                get(move || async move {
                    reached.store(true, Ordering::SeqCst);
                    "ok"
                }),
            )
            .route_layer(from_fn_with_state(state, require_admin))
    }

    async fn call(app: Router) -> (StatusCode, serde_json::Value) {
        let req = http::Request::builder()
            .uri("/admin")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn admin_gate_without_identity_fails_closed() {
        let store = CountingStore::new(true);
        let reached = Arc::new(AtomicBool::new(false));
        let app = admin_only_router(auth_state(store.clone()), reached.clone());

        let (status, body) = call(app).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert!(!reached.load(Ordering::SeqCst));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn admin_gate_consults_the_store_once_identity_is_bound() {
        for (is_admin, expected) in [(true, StatusCode::OK), (false, StatusCode::FORBIDDEN)] {
            let store = CountingStore::new(is_admin);
            let reached = Arc::new(AtomicBool::new(false));
            let app = admin_only_router(auth_state(store.clone()), reached.clone()).route_layer(
                from_fn(|mut req: Request, next: Next| async move {
                    req.extensions_mut()
                        .insert(RequestIdentity::new(UserId::from_raw(7)));
                    next.run(req).await
                }),
            );

            let (status, _) = call(app).await;

            assert_eq!(status, expected);
            assert_eq!(reached.load(Ordering::SeqCst), is_admin);
            assert_eq!(store.calls(), 1);
        }
    }

    #[tokio::test]
    async fn context_extractors_without_their_layers_are_internal_errors() {
        use crate::context::AdminContext;

        let app = Router::new()
            .route("/admin", get(|_identity: RequestIdentity| async { "ok" }));
        let (status, body) = call(app).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");

        let app = Router::new().route("/admin", get(|_admin: AdminContext| async { "ok" }));
        let (status, body) = call(app).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_or_blank_header_is_missing() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(ApiError::Unauthenticated(MISSING_HEADER))
        );
        assert_eq!(
            extract_bearer(&headers("   ")),
            Err(ApiError::Unauthenticated(MISSING_HEADER))
        );
    }

    #[test]
    fn bearer_scheme_is_optional_and_case_insensitive() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn scheme_without_token_is_invalid() {
        assert_eq!(
            extract_bearer(&headers("Bearer ")),
            Err(ApiError::Unauthenticated(INVALID_TOKEN))
        );
        assert_eq!(extract_bearer(&headers("Bearer    x")), Ok("x"));
    }
}
