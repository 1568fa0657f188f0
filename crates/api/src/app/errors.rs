use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use bazaar_auth::AuthError;
use bazaar_core::{DomainError, StoreError};

pub const MISSING_HEADER: &str = "authorization header missing";
pub const INVALID_TOKEN: &str = "invalid token";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Every failure a handler or middleware can surface.
///
/// Messages are safe to show to clients: no internals, no stored secrets, no
/// hint of whether a hidden resource exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("not authorized for this action")]
    Forbidden,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("a backing service is unavailable")]
    Dependency,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Dependency | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Unauthenticated(_) => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Dependency => "dependency_error",
            Self::Internal => "internal_error",
        }
    }

    /// Map a store failure; `not_found` names the missing thing.
    pub fn from_store(err: StoreError, not_found: &'static str) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound(not_found),
            StoreError::Duplicate => Self::Conflict("resource already exists"),
            StoreError::Unavailable(reason) => {
                tracing::error!(%reason, "store unavailable");
                Self::Dependency
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_error(self.status(), self.code(), self.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => Self::Validation(msg),
            AuthError::EmailTaken => Self::Conflict("email already registered"),
            AuthError::InvalidCredentials => Self::Unauthenticated(INVALID_CREDENTIALS),
            AuthError::Dependency(reason) => {
                tracing::error!(%reason, "credential store unavailable");
                Self::Dependency
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "password hashing failed");
                Self::Internal
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "token issuance failed");
                Self::Internal
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.message().to_string())
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
