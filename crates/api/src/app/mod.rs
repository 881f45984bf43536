//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store access and the inventory computations behind each endpoint
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use uniformops_infra::{AppConfig, SchoolRepository, StoreError, seed};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, StoreError> {
    let store = seed::seeded_store(config.data_path.as_deref()).await?;
    Ok(router_with_store(Arc::new(store)))
}

/// Build the router over an already-populated store.
pub fn router_with_store(store: Arc<dyn SchoolRepository>) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
}
