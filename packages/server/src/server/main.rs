// Main entry point for the taste resolution API server

use std::sync::Arc;

use anyhow::{Context, Result};
use gemini_client::GeminiClient;
use qloo_client::QlooClient;
use server_core::{server::build_app, Config};
use taste_pipeline::{GeminiTasteModel, QlooGraph, TastePipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,taste_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Taste Resolution API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    if config.gemini_api_keys.is_empty() {
        tracing::warn!(
            "GEMINI_API_KEYS not set; semantic extraction disabled, lexical tier only"
        );
    } else {
        tracing::info!(keys = config.gemini_api_keys.len(), "Credential pool loaded");
    }

    // Wire the pipeline
    let mut gemini = GeminiClient::new();
    if let Some(url) = config.gemini_api_url {
        gemini = gemini.with_base_url(url);
    }
    if let Some(model) = config.gemini_model {
        gemini = gemini.with_model(model);
    }

    let mut qloo = QlooClient::new(config.qloo_api_key);
    if let Some(url) = config.qloo_api_url {
        qloo = qloo.with_base_url(url);
    }

    let pipeline = TastePipeline::new(
        GeminiTasteModel::new(gemini),
        Arc::new(QlooGraph::new(qloo)),
        config.gemini_api_keys,
    );

    // Build application
    let app = build_app(Arc::new(pipeline));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Resolve endpoint: http://localhost:{}/resolve-taste", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
