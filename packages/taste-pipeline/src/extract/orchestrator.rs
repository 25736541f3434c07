//! The parse orchestrator: semantic extraction with credential
//! rotation, falling back to the lexical tier. Never fails outward.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::credentials::CredentialPool;
use crate::extract::lexical::LexicalExtractor;
use crate::extract::semantic::{build_prompt, decode_document};
use crate::traits::TasteModel;
use crate::types::TasteProfile;

/// Default per-attempt budget for one semantic extraction call.
pub const DEFAULT_PARSE_TIMEOUT: Duration = Duration::from_secs(25);

/// Orchestrates taste parsing across the extraction tiers.
///
/// The credential loop is deliberately sequential: the pool may be
/// rate-limited as a unit, so firing attempts concurrently would burn
/// quota on keys that are about to be tried anyway.
pub struct ParseOrchestrator<M: TasteModel> {
    model: M,
    lexical: LexicalExtractor,
    timeout: Duration,
}

impl<M: TasteModel> ParseOrchestrator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            lexical: LexicalExtractor::builtin(),
            timeout: DEFAULT_PARSE_TIMEOUT,
        }
    }

    /// Override the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse raw input into a canonical taste profile.
    ///
    /// Tries each credential in order against the semantic extractor;
    /// on exhaustion (or an empty pool) the lexical tier takes over,
    /// which always produces a usable profile.
    pub async fn parse(&self, input: &str, pool: &CredentialPool) -> TasteProfile {
        let prompt = build_prompt(input);

        for (attempt, credential) in pool.iter().enumerate() {
            let attempt = attempt + 1;

            let outcome =
                tokio::time::timeout(self.timeout, self.model.generate(credential, &prompt))
                    .await;

            let text = match outcome {
                Err(_) => {
                    let error = crate::error::ExtractError::Timeout(self.timeout);
                    warn!(attempt, error = %error, "semantic parse attempt timed out");
                    continue;
                }
                Ok(Err(e)) => {
                    warn!(attempt, error = %e, "semantic parse attempt failed");
                    continue;
                }
                Ok(Ok(text)) => text,
            };

            match decode_document(&text) {
                Ok(doc) => {
                    info!(attempt, terms = doc.term_count(), "semantic parse succeeded");
                    return doc.into_profile();
                }
                Err(e) => {
                    warn!(attempt, error = %e, "semantic parse attempt returned unusable output");
                    continue;
                }
            }
        }

        if pool.is_empty() {
            debug!("credential pool empty, using lexical extractor");
        } else {
            info!(
                attempts = pool.len(),
                "credential pool exhausted, falling back to lexical extractor"
            );
        }

        self.lexical.extract(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTasteModel;
    use crate::types::{Category, TasteSource};

    const VALID_DOC: &str = r#"{"music": {"genres": ["jazz"], "artists": []}}"#;

    #[tokio::test]
    async fn test_first_credential_succeeds() {
        let model = MockTasteModel::new().with_response(VALID_DOC);
        let probe = model.clone();
        let orchestrator = ParseOrchestrator::new(model);
        let pool = CredentialPool::parse("key-a,key-b");

        let profile = orchestrator.parse("I love jazz", &pool).await;

        assert_eq!(profile.source(Category::Music), TasteSource::Semantic);
        assert_eq!(profile.primary_term(Category::Music), Some("jazz"));
        assert_eq!(probe.credentials_seen(), vec!["key-a".to_string()]);
    }

    #[tokio::test]
    async fn test_rotates_to_next_credential_on_failure() {
        let model = MockTasteModel::new()
            .with_failure("rate limited")
            .with_response(VALID_DOC);
        let probe = model.clone();
        let orchestrator = ParseOrchestrator::new(model);
        let pool = CredentialPool::parse("key-a,key-b");

        let profile = orchestrator.parse("I love jazz", &pool).await;

        assert_eq!(profile.source(Category::Music), TasteSource::Semantic);
        assert_eq!(
            probe.credentials_seen(),
            vec!["key-a".to_string(), "key-b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_malformed_output_counts_as_failure() {
        let model = MockTasteModel::new()
            .with_response("Sorry, I can't help with that.")
            .with_response(VALID_DOC);
        let probe = model.clone();
        let orchestrator = ParseOrchestrator::new(model);
        let pool = CredentialPool::parse("key-a,key-b");

        let profile = orchestrator.parse("I love jazz", &pool).await;

        assert_eq!(profile.source(Category::Music), TasteSource::Semantic);
        assert_eq!(probe.credentials_seen().len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_pool_falls_back_to_lexical() {
        let model = MockTasteModel::new()
            .with_failure("boom")
            .with_failure("boom");
        let probe = model.clone();
        let orchestrator = ParseOrchestrator::new(model);
        let pool = CredentialPool::parse("key-a,key-b");

        let profile = orchestrator.parse("I love jazz", &pool).await;

        assert_eq!(profile.source(Category::Music), TasteSource::Lexical);
        assert_eq!(profile.primary_term(Category::Music), Some("jazz"));
        assert_eq!(probe.credentials_seen().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_pool_skips_model_entirely() {
        let model = MockTasteModel::new();
        let probe = model.clone();
        let orchestrator = ParseOrchestrator::new(model);

        let profile = orchestrator
            .parse("I love jazz", &CredentialPool::empty())
            .await;

        assert_eq!(profile.source(Category::Music), TasteSource::Lexical);
        assert!(probe.credentials_seen().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_yields_locale_defaults() {
        let orchestrator = ParseOrchestrator::new(MockTasteModel::new());

        let profile = orchestrator.parse("", &CredentialPool::empty()).await;

        for category in Category::ALL {
            assert!(!profile.terms(category).is_empty());
            assert_eq!(profile.source(category), TasteSource::Default);
        }
    }
}
