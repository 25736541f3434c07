//! Taste Resolution Pipeline
//!
//! Turns free-form descriptions of a person's cultural tastes into
//! per-category recommendation lists, degrading gracefully when the
//! external services misbehave.
//!
//! # Design
//!
//! **"Always answer, label the provenance"**
//!
//! - Parsing rotates a credential pool over the generative-language
//!   service and falls back to keyword extraction, then locale
//!   defaults; it never fails outward.
//! - Signal resolution against the knowledge graph is per-field
//!   fallible; whatever resolves is used.
//! - Aggregation queries the graph per category and synthesizes a
//!   deterministic substitute from a regional catalog when the live
//!   path yields nothing.
//! - Every category in the response carries a `live`/`synthetic`
//!   provenance flag so callers can tell the difference.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use taste_pipeline::{
//!     CredentialPool, GeminiTasteModel, QlooGraph, TastePipeline,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! let model = GeminiTasteModel::new(gemini_client::GeminiClient::new());
//! let graph = Arc::new(QlooGraph::new(qloo_client::QlooClient::new(qloo_key)));
//! let pool = CredentialPool::parse(&gemini_keys);
//!
//! let pipeline = TastePipeline::new(model, graph, pool);
//! let response = pipeline
//!     .resolve_taste("I love Agatha Christie mysteries and Thai street food",
//!                    CancellationToken::new())
//!     .await;
//! ```
//!
//! # Modules
//!
//! - [`extract`] - Semantic/lexical extraction and the parse orchestrator
//! - [`resolve`] - Term-to-signal resolution
//! - [`aggregate`] - Live aggregation and the synthetic catalog
//! - [`assemble`] - Structural response assembly
//! - [`traits`] - Model and graph abstractions
//! - [`backends`] - Production trait implementations (Gemini, Qloo)
//! - [`testing`] - Mock implementations for testing

pub mod aggregate;
pub mod assemble;
pub mod backends;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod region;
pub mod resolve;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use credentials::{ApiKey, CredentialPool};
pub use error::{ExtractError, GraphError};
pub use types::{
    Category, CategoryProvenance, CategoryRecommendations, CategoryTaste, Provenance,
    Recommendation, SignalSet, TasteProfile, TasteResponse, TasteSource,
};

// Re-export pipeline components
pub use aggregate::{Aggregator, SyntheticCatalog};
pub use assemble::assemble;
pub use extract::{LexicalExtractor, ParseOrchestrator};
pub use pipeline::{request_seed, PipelineConfig, TastePipeline};
pub use region::{Region, RegionRules};
pub use resolve::SignalResolver;

// Re-export traits and production backends
pub use backends::{GeminiTasteModel, QlooGraph};
pub use traits::{GraphItem, GraphQuery, KnowledgeGraph, TasteModel};

// Re-export testing utilities
pub use testing::{MockGraph, MockTasteModel};
