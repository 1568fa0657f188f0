use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::dto::{self, CredentialsRequest, LoginResponse, RegisteredResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Create an account. Issues no token; the client logs in afterwards.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = dto::json_body(payload)?;
    let user_id = services.auth.register(&body.email, &body.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            message: "user registered",
            user_id,
        }),
    ))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = dto::json_body(payload)?;
    let issued = services.auth.login(&body.email, &body.password).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
