use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bazaar_auth::{AdminGrant, OwnershipScope};
use bazaar_core::UserId;

use crate::app::errors::ApiError;

/// Authenticated identity for a request.
///
/// Inserted by the identity middleware; handlers on protected routes take it
/// as an extractor. Carries no role.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    user_id: UserId,
}

impl RequestIdentity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Scope for resource lookups made on this user's own behalf.
    pub fn scope(&self) -> OwnershipScope {
        OwnershipScope::owner(self.user_id)
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RequestIdentity>().copied().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "handler reached without an identity");
            ApiError::Internal
        })
    }
}

/// Proof that the admin gate passed for this request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AdminContext {
    grant: AdminGrant,
}

impl AdminContext {
    pub fn user_id(&self) -> UserId {
        self.grant.user_id()
    }

    /// Elevated scope: resource lookups skip the owner constraint.
    pub fn scope(&self) -> OwnershipScope {
        OwnershipScope::elevated(self.grant)
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let grant = parts.extensions.get::<AdminGrant>().copied().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "admin handler reached without a grant");
            ApiError::Internal
        })?;
        Ok(Self { grant })
    }
}
