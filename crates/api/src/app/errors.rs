use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockpilot_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InsufficientStock { available, unit } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": format!("Insufficient stock. Available: {available} {unit}"),
                "available": available,
                "unit": unit,
            })),
        )
            .into_response(),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized"),
        DomainError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error serving request");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
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
