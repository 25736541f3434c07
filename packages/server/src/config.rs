use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use taste_pipeline::CredentialPool;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Ordered Gemini API keys (GEMINI_API_KEYS, comma-separated).
    /// An empty pool is legal: parsing then starts at the lexical tier.
    pub gemini_api_keys: CredentialPool,
    pub gemini_api_url: Option<String>,
    pub gemini_model: Option<String>,
    pub qloo_api_key: String,
    pub qloo_api_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_keys: CredentialPool::parse(
                &env::var("GEMINI_API_KEYS").unwrap_or_default(),
            ),
            gemini_api_url: env::var("GEMINI_API_URL").ok(),
            gemini_model: env::var("GEMINI_MODEL").ok(),
            qloo_api_key: env::var("QLOO_API_KEY")
                .context("QLOO_API_KEY must be set")?,
            qloo_api_url: env::var("QLOO_API_URL").ok(),
        })
    }
}
