//! Recommendation aggregation: one live graph query per category, with
//! a deterministic synthetic fallback.

pub mod catalog;

pub use catalog::{CatalogEntry, SyntheticCatalog};

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use crate::region::RegionRules;
use crate::traits::{GraphItem, GraphQuery, KnowledgeGraph};
use crate::types::{
    Category, CategoryProvenance, CategoryRecommendations, Provenance, Recommendation,
    SignalSet, TasteProfile,
};

/// Default page size for live queries.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Display cap for cleaned descriptions.
const MAX_DESCRIPTION_LEN: usize = 200;

/// Aggregates recommendations for one category.
///
/// The live path queries the graph with whatever signals resolved; any
/// failure, timeout, or empty result drops to the synthetic catalog,
/// which always produces at least one item. Sibling categories never
/// see each other's failures.
pub struct Aggregator<G: KnowledgeGraph> {
    graph: Arc<G>,
    catalog: Arc<SyntheticCatalog>,
    regions: Arc<RegionRules>,
    page_size: usize,
}

impl<G: KnowledgeGraph> Aggregator<G> {
    pub fn new(graph: Arc<G>) -> Self {
        Self {
            graph,
            catalog: Arc::new(SyntheticCatalog::builtin()),
            regions: Arc::new(RegionRules::builtin()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the live-query page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Aggregate one category's recommendations.
    pub async fn aggregate(
        &self,
        category: Category,
        signals: &SignalSet,
        profile: &TasteProfile,
        seed: u64,
    ) -> CategoryRecommendations {
        let query = GraphQuery {
            filter_type: category.filter_urn(),
            signals: signals.clone(),
            take: self.page_size,
        };

        match self.graph.recommendations(&query).await {
            Ok(items) if !items.is_empty() => {
                let items = self.map_live(category, items);
                debug!(category = %category, count = items.len(), "live recommendations");
                CategoryRecommendations {
                    items,
                    provenance: CategoryProvenance::Live,
                }
            }
            Ok(_) => {
                warn!(category = %category, "graph returned no results, synthesizing");
                self.synthesize(category, profile, seed)
            }
            Err(e) => {
                warn!(category = %category, error = %e, "graph query failed, synthesizing");
                self.synthesize(category, profile, seed)
            }
        }
    }

    fn map_live(&self, category: Category, items: Vec<GraphItem>) -> Vec<Recommendation> {
        let mut seen: HashSet<String> = HashSet::new();

        items
            .into_iter()
            .enumerate()
            .filter_map(|(rank, item)| {
                // Case-insensitive dedup, first occurrence wins.
                if !seen.insert(item.name.to_lowercase()) {
                    return None;
                }

                let description = match item.description.as_deref() {
                    Some(raw) => clean_description(raw),
                    None => String::new(),
                };
                let description = if description.is_empty() {
                    fallback_description(&item, category)
                } else {
                    description
                };

                Some(Recommendation {
                    id: item
                        .id
                        .unwrap_or_else(|| format!("{}:{}", category.graph_type(), rank)),
                    name: item.name,
                    description,
                    category,
                    match_score: live_score(rank, item.popularity),
                    provenance: Provenance::Live,
                    fun_fact: None,
                })
            })
            .collect()
    }

    fn synthesize(
        &self,
        category: Category,
        profile: &TasteProfile,
        seed: u64,
    ) -> CategoryRecommendations {
        let region = self.regions.detect(profile);
        let term = profile.primary_term(category);

        let items = match self.catalog.pick(category, term, region, seed) {
            Some(entry) => vec![entry.to_recommendation(category)],
            None => Vec::new(),
        };

        debug!(
            category = %category,
            ?region,
            term,
            "synthesized fallback recommendation"
        );

        CategoryRecommendations {
            items,
            provenance: CategoryProvenance::Synthetic,
        }
    }
}

/// Scale the graph's popularity metric into [75, 99]; without a metric,
/// derive the score from the item's rank so earlier results still sort
/// higher.
fn live_score(rank: usize, popularity: Option<f64>) -> u8 {
    let score = match popularity {
        Some(p) => (p * 100.0).round() as i64,
        None => 100 - 3 * rank as i64,
    };
    score.clamp(75, 99) as u8
}

/// Strip HTML fragments and entities, collapse whitespace, and bound
/// the length for display.
fn clean_description(raw: &str) -> String {
    let without_tags = Regex::new(r"<[^>]*>").unwrap().replace_all(raw, " ");

    let decoded = without_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > MAX_DESCRIPTION_LEN {
        let truncated: String = collapsed.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
        format!("{}...", truncated.trim_end())
    } else {
        collapsed
    }
}

/// Build a description for items the graph returned bare.
fn fallback_description(item: &GraphItem, category: Category) -> String {
    match &item.genre {
        Some(genre) => format!("{} {}", genre, category),
        None => format!("{} recommendation", capitalize(category.as_str())),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
