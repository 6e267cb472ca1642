use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/total-sales", get(total_sales))
        .route("/popular-items", get(popular_items))
}

pub async fn total_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.reporting.total_sales() {
        Ok(total_sales) => Json(dto::TotalSalesResponse { total_sales }).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn popular_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.reporting.most_popular_item() {
        Ok(popular_item) => Json(dto::PopularItemResponse { popular_item }).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
