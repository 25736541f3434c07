//! Cultural knowledge graph trait.

use async_trait::async_trait;

use crate::error::GraphResult;
use crate::types::SignalSet;

/// A recommendation query against the graph: one entity-type filter
/// plus whatever signals resolved.
#[derive(Debug, Clone)]
pub struct GraphQuery {
    /// Entity type filter, e.g. `urn:entity:music`
    pub filter_type: String,

    /// Resolved signals; empty sets are legal queries
    pub signals: SignalSet,

    /// Page size
    pub take: usize,
}

/// One item returned by a recommendation query.
#[derive(Debug, Clone)]
pub struct GraphItem {
    /// Graph identifier, when the graph provides one
    pub id: Option<String>,

    pub name: String,

    pub description: Option<String>,

    /// Genre annotation, used for description synthesis when the item
    /// has no description of its own
    pub genre: Option<String>,

    /// Popularity/confidence metric in [0.0, 1.0]
    pub popularity: Option<f64>,
}

/// The external cultural knowledge graph.
///
/// The three search lookups are independently fallible; the resolver
/// accumulates whatever succeeds. `recommendations` failures or empty
/// results push the aggregator onto its synthetic tier.
#[async_trait]
pub trait KnowledgeGraph: Send + Sync {
    /// Resolve a free-text term to an entity id, if the graph knows it.
    async fn entity_id(&self, term: &str, graph_type: &str) -> GraphResult<Option<String>>;

    /// Resolve a free-text term to a tag id (genre, cuisine, ...).
    async fn tag_id(&self, term: &str, graph_type: &str) -> GraphResult<Option<String>>;

    /// Resolve a free-text term to an audience id.
    async fn audience_id(&self, term: &str) -> GraphResult<Option<String>>;

    /// Run a recommendation query.
    async fn recommendations(&self, query: &GraphQuery) -> GraphResult<Vec<GraphItem>>;
}
