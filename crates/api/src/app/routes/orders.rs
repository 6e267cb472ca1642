use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use cafe_core::OrderId;
use cafe_orders::OrderRequest;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
        .route("/:id/close", post(close_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.engine.create(body) {
        Ok(order) => (
            StatusCode::CREATED,
            Json(dto::OrderCreatedResponse {
                message: "order created".to_string(),
                order_id: order.order_id,
            }),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.engine.get_all() {
        Ok(orders) => Json(dto::OrderListResponse { orders }).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.engine.get_by_id(&OrderId::new(id)) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.engine.update(&OrderId::new(id), body) {
        Ok(_) => Json(dto::MessageResponse::new("order updated")).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.engine.delete(&OrderId::new(id)) {
        Ok(()) => Json(dto::MessageResponse::new("order deleted")).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn close_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.engine.close(&OrderId::new(id)) {
        Ok(()) => Json(dto::MessageResponse::new("order closed")).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
