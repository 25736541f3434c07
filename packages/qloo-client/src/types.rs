//! Qloo API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Search (entities / tags / audiences)
// =============================================================================

/// A resolved entity reference from `/entities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// A resolved tag reference from `/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRef {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// A resolved audience reference from `/audiences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceRef {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntitySearchResponse {
    #[serde(default)]
    pub entities: Vec<EntityRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagSearchResponse {
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AudienceSearchResponse {
    #[serde(default)]
    pub audiences: Vec<AudienceRef>,
}

// =============================================================================
// Insights
// =============================================================================

/// Query against `/v2/insights`, built from whatever signals resolved.
///
/// Only `filter.type` is required; every signal parameter is optional and
/// omitted from the query string when absent.
#[derive(Debug, Clone)]
pub struct InsightsQuery {
    /// Entity type filter, e.g. `urn:entity:music`
    pub filter_type: String,

    /// `signal.interests.entities`
    pub entity_id: Option<String>,

    /// `signal.tags`
    pub tag_id: Option<String>,

    /// `signal.demographics.audiences`
    pub audience_id: Option<String>,

    /// `signal.location.query`
    pub location_query: Option<String>,

    /// Page size (`take`)
    pub take: usize,
}

impl InsightsQuery {
    /// Create a query for one entity type with the default page size.
    pub fn new(filter_type: impl Into<String>) -> Self {
        Self {
            filter_type: filter_type.into(),
            entity_id: None,
            tag_id: None,
            audience_id: None,
            location_query: None,
            take: 5,
        }
    }

    /// Set the entity interest signal.
    pub fn entity(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Set the tag signal.
    pub fn tag(mut self, id: impl Into<String>) -> Self {
        self.tag_id = Some(id.into());
        self
    }

    /// Set the audience signal.
    pub fn audience(mut self, id: impl Into<String>) -> Self {
        self.audience_id = Some(id.into());
        self
    }

    /// Set the location signal.
    pub fn location(mut self, query: impl Into<String>) -> Self {
        self.location_query = Some(query.into());
        self
    }

    /// Set the page size.
    pub fn take(mut self, take: usize) -> Self {
        self.take = take;
        self
    }

    /// Query-string parameters in a fixed order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("filter.type", self.filter_type.clone())];

        if let Some(id) = &self.entity_id {
            params.push(("signal.interests.entities", id.clone()));
        }
        if let Some(id) = &self.tag_id {
            params.push(("signal.tags", id.clone()));
        }
        if let Some(id) = &self.audience_id {
            params.push(("signal.demographics.audiences", id.clone()));
        }
        if let Some(query) = &self.location_query {
            params.push(("signal.location.query", query.clone()));
        }

        params.push(("take", self.take.to_string()));
        params
    }
}

/// One recommendation item from `/v2/insights`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightItem {
    pub name: String,

    #[serde(default)]
    pub entity_id: Option<String>,

    /// Popularity metric in [0.0, 1.0] when the graph carries one
    #[serde(default)]
    pub popularity: Option<f64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: ItemProperties,
}

impl InsightItem {
    /// Best available description: top-level, then properties, then the
    /// short variant.
    pub fn best_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.properties.description.as_deref())
            .or(self.properties.short_description.as_deref())
            .filter(|d| !d.trim().is_empty())
    }
}

/// Nested `properties` bag on insight items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemProperties {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub short_description: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsightsResponse {
    #[serde(default)]
    pub results: Vec<InsightItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_query_params_full() {
        let query = InsightsQuery::new("urn:entity:music")
            .entity("E1")
            .tag("T1")
            .audience("A1")
            .location("Kyoto")
            .take(6);

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("filter.type", "urn:entity:music".to_string()),
                ("signal.interests.entities", "E1".to_string()),
                ("signal.tags", "T1".to_string()),
                ("signal.demographics.audiences", "A1".to_string()),
                ("signal.location.query", "Kyoto".to_string()),
                ("take", "6".to_string()),
            ]
        );
    }

    #[test]
    fn test_insights_query_params_skip_missing_signals() {
        let params = InsightsQuery::new("urn:entity:book").to_params();
        assert_eq!(
            params,
            vec![
                ("filter.type", "urn:entity:book".to_string()),
                ("take", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_insight_item_best_description_precedence() {
        let item: InsightItem = serde_json::from_str(
            r#"{
                "name": "Kyoto",
                "properties": {
                    "description": "Historic city",
                    "short_description": "City"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(item.best_description(), Some("Historic city"));

        let item: InsightItem =
            serde_json::from_str(r#"{"name": "Kyoto", "description": "Top-level"}"#).unwrap();
        assert_eq!(item.best_description(), Some("Top-level"));

        let item: InsightItem = serde_json::from_str(r#"{"name": "Kyoto"}"#).unwrap();
        assert_eq!(item.best_description(), None);
    }

    #[test]
    fn test_search_response_defaults_to_empty() {
        let response: EntitySearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.entities.is_empty());
    }
}
