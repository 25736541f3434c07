//! Pure Google Generative Language REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. The API key is supplied per call rather than stored
//! on the client, so callers that rotate through a pool of credentials can
//! share one client (and one connection pool) across all of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateRequest};
//!
//! let client = GeminiClient::new();
//!
//! let request = GenerateRequest::from_prompt("Say hello")
//!     .temperature(0.1)
//!     .max_output_tokens(1000);
//!
//! let text = client.generate_text("api-key", request).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{
    Candidate, Content, GenerateRequest, GenerateResponse, GenerationConfig, Part,
};

use reqwest::Client;
use tracing::{debug, warn};

use crate::types::ApiErrorEnvelope;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    model: String,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    /// Create a new client with the default endpoint and model.
    pub fn new() -> Self {
        Self {
            http_client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies or regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Call `generateContent` with the given credential.
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            warn!(status = %status, error = %message, "Gemini API error");
            return Err(GeminiError::Api(format!("{}: {}", status, message)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {}", e)))?;

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            candidates = parsed.candidates.len(),
            "Gemini generateContent completed"
        );

        Ok(parsed)
    }

    /// Call `generateContent` and return the first candidate's text.
    ///
    /// A well-formed 200 with zero candidates (safety-blocked prompts do
    /// this) is an [`GeminiError::Empty`], which callers treat like any
    /// other per-attempt failure.
    pub async fn generate_text(
        &self,
        api_key: &str,
        request: GenerateRequest,
    ) -> Result<String> {
        let response = self.generate_content(api_key, request).await?;
        response
            .first_text()
            .map(|text| text.to_string())
            .ok_or(GeminiError::Empty)
    }
}
