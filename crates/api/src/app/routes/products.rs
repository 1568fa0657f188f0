use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use bazaar_core::ProductId;

use crate::app::dto::{self, ProductRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::AdminContext;

const NOT_FOUND: &str = "product not found";

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = services
        .products
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(Json(json!({ "products": products })))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ProductId = dto::parse_id(&id, "product")?;
    let product = services
        .products
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(Json(product))
}

pub async fn create_product(
    admin: AdminContext,
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = dto::json_body(payload)?.into_draft()?;
    let product = services
        .products
        .create(draft)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    tracing::info!(product_id = %product.id, admin = %admin.user_id(), "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    admin: AdminContext,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ProductId = dto::parse_id(&id, "product")?;
    let draft = dto::json_body(payload)?.into_draft()?;
    let product = services
        .products
        .update(id, draft)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    tracing::info!(product_id = %id, admin = %admin.user_id(), "product updated");
    Ok(Json(product))
}

pub async fn delete_product(
    admin: AdminContext,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ProductId = dto::parse_id(&id, "product")?;
    services
        .products
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    tracing::info!(product_id = %id, admin = %admin.user_id(), "product deleted");
    Ok(Json(json!({ "message": "product deleted" })))
}
