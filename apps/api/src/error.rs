mod types;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use casting_core::{AppError, AuthError, AuthErrorKind};
use tracing::error;

pub use types::ErrorResponse;

/// Message returned for backend failures; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        Self(AppError::Unauthorized(value))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(auth_error) if auth_error.is_bad_request() => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(auth_error) => match auth_error.kind() {
                AuthErrorKind::Forbidden => StatusCode::FORBIDDEN,
                _ => StatusCode::UNAUTHORIZED,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let payload = match &self.0 {
            AppError::Unauthorized(auth_error) => {
                ErrorResponse::new(auth_error.to_string()).with_code(auth_error.code())
            }
            AppError::Internal(detail) => {
                error!(error = %detail, "request failed with backend error");
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            }
            other => ErrorResponse::new(other.to_string()),
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
