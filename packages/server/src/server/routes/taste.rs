use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct ResolveTasteRequest {
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Resolve free-text taste input into per-category recommendations.
///
/// Input validation is the only failure surfaced to callers; every
/// downstream failure is absorbed by the pipeline's fallback tiers and
/// still yields a 200 with provenance-tagged data.
pub async fn resolve_taste_handler(
    Extension(state): Extension<AppState>,
    payload: Option<Json<ResolveTasteRequest>>,
) -> Response {
    let input = payload
        .and_then(|Json(request)| request.input)
        .map(|input| input.trim().to_string())
        .filter(|input| !input.is_empty());

    let Some(input) = input else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing input text".to_string(),
            }),
        )
            .into_response();
    };

    debug!(input_len = input.len(), "resolving taste");

    let response = state
        .pipeline
        .resolve_taste(&input, CancellationToken::new())
        .await;

    (StatusCode::OK, Json(response)).into_response()
}
