use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{ProductId, UserId};
use bazaar_products::ProductDraft;

use super::errors::ApiError;

/// Register/login body. No `Debug`: it holds a plaintext password.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub message: &'static str,
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
}

impl ProductRequest {
    pub fn into_draft(self) -> Result<ProductDraft, ApiError> {
        Ok(ProductDraft::new(self.name, self.description, self.price)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

/// Unwrap a JSON body, turning axum's rejection into a validation error.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::validation(rejection.body_text()))
}

/// Parse a path identifier (positive integer).
pub fn parse_id<T: FromStr>(raw: &str, what: &'static str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("invalid {what} id")))
}
