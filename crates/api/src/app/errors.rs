use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use cafe_core::DomainError;

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) | DomainError::EmptyCollection(_) => StatusCode::NOT_FOUND,
        DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::DuplicateId(_)
        | DomainError::DuplicateName(_)
        | DomainError::MalformedRequest(_)
        | DomainError::QuantityInvalid(_)
        | DomainError::PriceInvalid(_)
        | DomainError::IdentityMismatch(_)
        | DomainError::InsufficientIngredients(_)
        | DomainError::AlreadyClosed(_)
        | DomainError::CannotDeleteClosed(_)
        | DomainError::CustomerNameImmutable(_) => StatusCode::BAD_REQUEST,
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::warn!(status = status.as_u16(), error = %err, "request rejected");
    }
    json_error(status, err.code(), err.to_string())
}

/// Unreadable or mistyped JSON bodies are malformed requests.
pub fn rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    tracing::warn!(error = %rejection.body_text(), "rejected request body");
    json_error(
        StatusCode::BAD_REQUEST,
        "malformed_request",
        rejection.body_text(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
