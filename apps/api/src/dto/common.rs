use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Unauthenticated index payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/index-response.ts"
)]
pub struct IndexResponse {
    pub success: bool,
    pub status: &'static str,
}

/// Confirmation returned after deleting a movie or an actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/deletion-response.ts"
)]
pub struct DeletionResponse {
    pub status: &'static str,
    pub success: bool,
    #[ts(type = "number")]
    pub deleted: i64,
}

impl DeletionResponse {
    pub fn new(deleted: i64) -> Self {
        Self {
            status: "Deleted Successful",
            success: true,
            deleted,
        }
    }
}
