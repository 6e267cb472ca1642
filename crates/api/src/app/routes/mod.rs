use axum::{Router, routing::get};

pub mod inventory;
pub mod menu;
pub mod orders;
pub mod reports;
pub mod system;

/// Router for every café endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/inventory", inventory::router())
        .nest("/menu", menu::router())
        .nest("/orders", orders::router())
        .nest("/reports", reports::router())
}
