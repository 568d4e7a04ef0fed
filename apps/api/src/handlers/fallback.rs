use axum::Json;
use axum::http::StatusCode;
use casting_core::AppError;

use crate::error::{ApiError, ErrorResponse};

pub async fn not_found_handler() -> ApiError {
    ApiError(AppError::NotFound(
        "no route matches the requested path".to_owned(),
    ))
}

pub async fn method_not_allowed_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("method NOT allowed!")),
    )
}
