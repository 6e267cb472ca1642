//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: ledgers, fulfillment engine and reporting over one store
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: response envelopes
//! - `errors.rs`: domain error → status code and JSON body

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(services)),
    )
}

pub use services::AppServices;
