use axum::Json;

use crate::dto::{HealthResponse, IndexResponse};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        success: true,
        status: "App is running!",
    })
}
