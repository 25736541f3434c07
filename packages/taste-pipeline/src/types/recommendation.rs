//! Recommendation items and the assembled response payload.

use serde::Serialize;
use std::collections::BTreeMap;

use super::category::Category;

/// Where a single recommendation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// A live knowledge-graph query
    Live,
    /// The synthetic fallback catalog
    Synthetic,
}

/// Where a whole category's list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryProvenance {
    Live,
    Synthetic,
    /// Reserved for responses that merge live and synthetic items in
    /// one category; the current aggregator replaces rather than
    /// merges, so it never produces this.
    Mixed,
}

impl CategoryProvenance {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, CategoryProvenance::Synthetic)
    }
}

/// One recommendation.
///
/// Invariant: within one category's list, no two items share a
/// case-insensitive name (enforced by the aggregator's dedup pass).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,

    /// Match strength in [0, 100]; live scores land in [75, 99]
    pub match_score: u8,

    pub provenance: Provenance,

    /// One-liner carried by synthetic catalog entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
}

/// One category's aggregated result.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRecommendations {
    pub items: Vec<Recommendation>,
    pub provenance: CategoryProvenance,
}

impl CategoryRecommendations {
    /// An empty result, the legitimate terminal state for a category
    /// with zero live and zero synthetic matches.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            provenance: CategoryProvenance::Live,
        }
    }
}

/// The assembled per-request payload.
#[derive(Debug, Clone, Serialize)]
pub struct TasteResponse {
    /// Per-category recommendation lists; every configured category is
    /// present even when empty
    pub categories: BTreeMap<Category, CategoryRecommendations>,

    /// Per-category is-synthetic summary for callers that care about
    /// provenance without digging through items
    pub synthetic: BTreeMap<Category, bool>,
}
