use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::context::RequestIdentity;

pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn ping() -> impl IntoResponse {
    Json(json!({ "status": "success", "message": "pong" }))
}

/// Echo the identity bound by the token (no store lookup).
pub async fn whoami(identity: RequestIdentity) -> impl IntoResponse {
    Json(json!({ "user_id": identity.user_id() }))
}
