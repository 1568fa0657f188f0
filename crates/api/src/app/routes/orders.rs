//! Order routes.
//!
//! Single-order lookups go through the store with the caller's
//! [`OwnershipScope`](bazaar_auth::OwnershipScope). Someone else's order and
//! a nonexistent one produce the same 404.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use bazaar_core::OrderId;
use bazaar_sales::OrderStatus;

use crate::app::dto::{self, PlaceOrderRequest, UpdateOrderStatusRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::{AdminContext, RequestIdentity};

const NOT_FOUND: &str = "order not found";

pub async fn place_order(
    identity: RequestIdentity,
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = dto::json_body(payload)?;

    services
        .products
        .get(body.product_id)
        .await
        .map_err(|e| ApiError::from_store(e, "product not found"))?;

    let order = services
        .orders
        .place(identity.user_id(), body.product_id)
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    tracing::info!(order_id = %order.id, user_id = %identity.user_id(), "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_orders(
    identity: RequestIdentity,
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = services
        .orders
        .list_for_owner(identity.user_id())
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(Json(json!({ "orders": orders })))
}

pub async fn get_order(
    identity: RequestIdentity,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: OrderId = dto::parse_id(&id, "order")?;
    let order = services
        .orders
        .find(id, identity.scope())
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(Json(order))
}

pub async fn cancel_order(
    identity: RequestIdentity,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: OrderId = dto::parse_id(&id, "order")?;
    let order = services
        .orders
        .cancel(id, identity.scope())
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    tracing::info!(order_id = %id, user_id = %identity.user_id(), "order cancelled");
    Ok(Json(json!({ "message": "order cancelled", "order": order })))
}

/// Admin-only; operates on any user's order.
pub async fn update_order_status(
    admin: AdminContext,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOrderStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: OrderId = dto::parse_id(&id, "order")?;
    let status: OrderStatus = dto::json_body(payload)?.status.parse()?;

    let order = services
        .orders
        .update_status(id, status, admin.scope())
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    tracing::info!(order_id = %id, %status, admin = %admin.user_id(), "order status updated");
    Ok(Json(order))
}
