//! The canonical category vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A taste category.
///
/// This is the single category vocabulary used everywhere in the
/// pipeline; the knowledge graph's entity-type names differ for two of
/// them and are mapped in exactly one place, [`Category::graph_type`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Food,
    Books,
    Travel,
}

impl Category {
    /// All categories, in canonical (response) order.
    pub const ALL: [Category; 4] = [
        Category::Music,
        Category::Food,
        Category::Books,
        Category::Travel,
    ];

    /// Canonical lowercase name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Food => "food",
            Category::Books => "books",
            Category::Travel => "travel",
        }
    }

    /// The knowledge graph's entity-type name for this category.
    pub fn graph_type(&self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Food => "food",
            Category::Books => "book",
            Category::Travel => "place",
        }
    }

    /// The `filter.type` URN for insights queries.
    pub fn filter_urn(&self) -> String {
        format!("urn:entity:{}", self.graph_type())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
