//! The pipeline facade: parse, resolve, aggregate, assemble.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::aggregate::{Aggregator, DEFAULT_PAGE_SIZE};
use crate::assemble::assemble;
use crate::credentials::CredentialPool;
use crate::extract::orchestrator::{ParseOrchestrator, DEFAULT_PARSE_TIMEOUT};
use crate::resolve::SignalResolver;
use crate::traits::{KnowledgeGraph, TasteModel};
use crate::types::{Category, TasteResponse};

/// Tunables for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Budget for one semantic extraction attempt
    pub parse_timeout: Duration,

    /// Page size for live graph queries
    pub page_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parse_timeout: DEFAULT_PARSE_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The taste resolution pipeline.
///
/// Stateless per request: every call parses, resolves, and aggregates
/// fresh. The static tables inside the extractor, catalog, and region
/// rules are built once here and shared read-only across requests.
pub struct TastePipeline<M: TasteModel, G: KnowledgeGraph> {
    orchestrator: ParseOrchestrator<M>,
    resolver: SignalResolver<G>,
    aggregator: Aggregator<G>,
    pool: CredentialPool,
}

impl<M: TasteModel, G: KnowledgeGraph> TastePipeline<M, G> {
    pub fn new(model: M, graph: Arc<G>, pool: CredentialPool) -> Self {
        Self::with_config(model, graph, pool, PipelineConfig::default())
    }

    pub fn with_config(
        model: M,
        graph: Arc<G>,
        pool: CredentialPool,
        config: PipelineConfig,
    ) -> Self {
        Self {
            orchestrator: ParseOrchestrator::new(model).with_timeout(config.parse_timeout),
            resolver: SignalResolver::new(graph.clone()),
            aggregator: Aggregator::new(graph).with_page_size(config.page_size),
            pool,
        }
    }

    /// Resolve free-text taste input into per-category recommendations.
    ///
    /// Never fails: every failure tier degrades into the next, down to
    /// the synthetic catalog. Categories are processed concurrently and
    /// independently; cancelling the token abandons unfinished
    /// categories cooperatively (the assembler fills them with empty
    /// lists) without blocking the rest.
    pub async fn resolve_taste(
        &self,
        input: &str,
        cancel: CancellationToken,
    ) -> TasteResponse {
        let profile = self.orchestrator.parse(input, &self.pool).await;
        let seed = request_seed(input);
        debug!(seed, "taste profile parsed");

        let profile = &profile;
        let category_futures = Category::ALL.into_iter().map(|category| {
            let cancel = cancel.clone();
            async move {
                tokio::select! {
                    // Check cancellation before starting category work.
                    biased;
                    _ = cancel.cancelled() => {
                        debug!(category = %category, "category resolution cancelled");
                        None
                    }
                    result = async {
                        let signals = self.resolver.resolve(category, profile).await;
                        self.aggregator
                            .aggregate(category, &signals, profile, seed)
                            .await
                    } => Some((category, result)),
                }
            }
        });

        let results: BTreeMap<_, _> = futures::future::join_all(category_futures)
            .await
            .into_iter()
            .flatten()
            .collect();

        assemble(results)
    }
}

/// Stable per-request seed for the synthetic fallback.
///
/// Derived from the input text, never from a clock or RNG, so identical
/// requests produce byte-identical synthetic output while different
/// inputs still see variety.
pub fn request_seed(input: &str) -> u64 {
    let digest = Sha256::digest(input.as_bytes());
    u64::from_be_bytes(
        digest[..8]
            .try_into()
            .expect("SHA-256 digest is at least 8 bytes"),
    )
}
