use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use casting_core::AppError;
use tracing::warn;

use crate::error::ApiError;

/// Reports backend failures as missing resources.
///
/// Installed unless `PERSISTENCE_ERROR_POLICY=surface`.
pub async fn mask_backend_errors(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    if response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    warn!(%method, path = %path, "masking backend failure as not found");
    ApiError(AppError::NotFound(format!("{path} could not be loaded"))).into_response()
}
