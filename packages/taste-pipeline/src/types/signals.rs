//! Resolved knowledge-graph signals for one category.

use serde::Serialize;

/// The graph identifiers a category's term resolved to.
///
/// Every field is independently optional: partial resolution is
/// expected and legal, and an entirely empty set still produces a valid
/// (signal-free) insights query downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalSet {
    /// `signal.interests.entities`
    pub entity_id: Option<String>,

    /// `signal.tags`
    pub tag_id: Option<String>,

    /// `signal.demographics.audiences`
    pub audience_id: Option<String>,

    /// `signal.location.query`
    pub location_query: Option<String>,
}

impl SignalSet {
    /// True when nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.entity_id.is_none()
            && self.tag_id.is_none()
            && self.audience_id.is_none()
            && self.location_query.is_none()
    }

    /// Number of populated signal fields.
    pub fn signal_count(&self) -> usize {
        [
            self.entity_id.is_some(),
            self.tag_id.is_some(),
            self.audience_id.is_some(),
            self.location_query.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
