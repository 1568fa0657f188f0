//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store and auth service wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: the error taxonomy and its JSON shape

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: AppServices) -> Router {
    let auth_state = services.auth_state();
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/ping", get(routes::system::ping))
        .nest("/auth", routes::auth::router())
        .nest("/api", routes::api_router(auth_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
