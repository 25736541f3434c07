//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use taste_pipeline::{KnowledgeGraph, TasteModel, TastePipeline, TasteResponse};

use crate::server::routes::{health_handler, resolve_taste_handler};

/// Whole-request deadline: parse rotation plus the slowest category
/// must fit inside it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Object-safe view of the pipeline for handler state.
///
/// Handlers depend on this rather than on the pipeline's generic
/// parameters, so tests wire in mock-backed pipelines with the same
/// router code.
#[async_trait]
pub trait TasteService: Send + Sync {
    async fn resolve_taste(&self, input: &str, cancel: CancellationToken) -> TasteResponse;
}

#[async_trait]
impl<M: TasteModel, G: KnowledgeGraph> TasteService for TastePipeline<M, G> {
    async fn resolve_taste(&self, input: &str, cancel: CancellationToken) -> TasteResponse {
        TastePipeline::resolve_taste(self, input, cancel).await
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<dyn TasteService>,
}

/// Build the Axum application router
pub fn build_app(pipeline: Arc<dyn TasteService>) -> Router {
    let app_state = AppState { pipeline };

    // CORS configuration - the resolve endpoint is called from browsers
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    // Rate limiting: 10 requests per second per IP with bursts of 20.
    // Every request may fan out into several outbound API calls, so the
    // cap protects the credential pool as much as this process.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    Router::new()
        .route("/resolve-taste", post(resolve_taste_handler))
        .layer(rate_limit_layer)
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
