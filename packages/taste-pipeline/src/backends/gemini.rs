//! [`TasteModel`] backed by the Gemini REST client.

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateRequest};

use crate::credentials::ApiKey;
use crate::error::ExtractResult;
use crate::traits::TasteModel;

/// Low temperature keeps the strict-schema extraction consistent
/// between retries on different credentials.
const EXTRACTION_TEMPERATURE: f32 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Semantic extraction backend using the generative language API.
#[derive(Clone)]
pub struct GeminiTasteModel {
    client: GeminiClient,
}

impl GeminiTasteModel {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TasteModel for GeminiTasteModel {
    async fn generate(&self, credential: &ApiKey, prompt: &str) -> ExtractResult<String> {
        let request = GenerateRequest::from_prompt(prompt)
            .temperature(EXTRACTION_TEMPERATURE)
            .max_output_tokens(MAX_OUTPUT_TOKENS);

        let text = self
            .client
            .generate_text(credential.expose(), request)
            .await?;

        Ok(text)
    }
}
