use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::middleware::{self, AuthState};

pub mod auth;
pub mod orders;
pub mod products;
pub mod system;

/// Routes under `/api`. All of them require an identity; catalog mutations
/// and order status changes additionally pass the admin gate.
pub fn api_router(auth: AuthState) -> Router {
    let admin = from_fn_with_state(auth.clone(), middleware::require_admin);

    Router::new()
        .route("/whoami", get(system::whoami))
        .route(
            "/products",
            get(products::list_products)
                .merge(post(products::create_product).route_layer(admin.clone())),
        )
        .route(
            "/products/:id",
            get(products::get_product).merge(
                put(products::update_product)
                    .delete(products::delete_product)
                    .route_layer(admin.clone()),
            ),
        )
        .route(
            "/orders",
            post(orders::place_order).get(orders::list_orders),
        )
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/cancel", put(orders::cancel_order))
        .route(
            "/orders/:id/status",
            put(orders::update_order_status).route_layer(admin),
        )
        .route_layer(from_fn_with_state(auth, middleware::require_identity))
}
