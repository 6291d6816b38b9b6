//! Health endpoint for orchestration and load balancers.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Static health payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "Server is running")]
    pub message: String,
}

/// Liveness check. Returns a static ok payload while the process serves
/// traffic; there are no dependencies to probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    ),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health() -> web::Json<HealthResponse> {
    web::Json(HealthResponse {
        status: "ok".to_owned(),
        message: "Server is running".to_owned(),
    })
}
