use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use casting_application::AccessClaims;
use casting_core::{AppError, AuthError};
use casting_domain::Permission;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Checks the request's bearer token for one permission.
///
/// Runs before the body is decoded so unauthorized callers never reach validation.
pub(super) fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    permission: Permission,
) -> ApiResult<AccessClaims> {
    authorization_header(headers)
        .and_then(|header_value| {
            state
                .authorization_service
                .authorize(header_value, permission)
        })
        .map_err(|error| {
            debug!(
                code = error.code(),
                permission = permission.as_str(),
                "request authorization denied"
            );
            ApiError::from(error)
        })
        .inspect(|claims| {
            debug!(
                subject = claims.subject(),
                permission = permission.as_str(),
                "request authorized"
            );
        })
}

/// Decodes a JSON request body that has already been read as raw bytes.
pub(super) fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|error| {
        AppError::Validation(format!("invalid request body: {error}")).into()
    })
}

/// Parses an integer path identifier; anything else names no stored entity.
pub(super) fn parse_path_id(raw_id: &str, resource: &str) -> ApiResult<i64> {
    raw_id.parse::<i64>().map_err(|_| {
        AppError::NotFound(format!("{resource} '{raw_id}' does not exist")).into()
    })
}

fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| {
            value.to_str().map_err(|_| {
                AuthError::MalformedHeader(
                    "authorization header must be visible ASCII".to_owned(),
                )
            })
        })
        .transpose()
}
