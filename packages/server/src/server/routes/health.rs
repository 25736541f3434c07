use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint
///
/// The pipeline has no stateful dependencies (no database, no broker),
/// so a responding process is a healthy process. External API health is
/// deliberately not probed: their failures degrade responses instead of
/// taking the service down.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
