//! Generative-language model trait.

use async_trait::async_trait;

use crate::credentials::ApiKey;
use crate::error::ExtractResult;

/// A generative-language backend for semantic taste extraction.
///
/// One call per parse attempt: the orchestrator supplies the credential
/// (it owns the rotation order) and the fully-built prompt, and gets
/// back the model's raw text. Decoding and validation happen above this
/// trait so every backend benefits from the same defensive parsing.
#[async_trait]
pub trait TasteModel: Send + Sync {
    /// Run one prompt/response call with the given credential.
    async fn generate(&self, credential: &ApiKey, prompt: &str) -> ExtractResult<String>;
}
