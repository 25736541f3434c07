//! Pure Qloo cultural knowledge graph REST API client
//!
//! A clean, minimal client for the Qloo search and insights endpoints with
//! no domain-specific logic. Callers resolve free-text terms to graph
//! identifiers via the search endpoints, then feed whichever identifiers
//! resolved into an [`InsightsQuery`].
//!
//! # Example
//!
//! ```rust,ignore
//! use qloo_client::{InsightsQuery, QlooClient};
//!
//! let client = QlooClient::new("api-key");
//!
//! let entities = client.search_entities("Agatha Christie", Some("book")).await?;
//!
//! let mut query = InsightsQuery::new("urn:entity:book").take(5);
//! if let Some(entity) = entities.first() {
//!     query = query.entity(&entity.id);
//! }
//! let items = client.insights(&query).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{QlooError, Result};
pub use types::{
    AudienceRef, EntityRef, InsightItem, InsightsQuery, ItemProperties, TagRef,
};

use reqwest::Client;
use tracing::{debug, warn};

use crate::types::{
    AudienceSearchResponse, EntitySearchResponse, InsightsResponse, TagSearchResponse,
};

const DEFAULT_BASE_URL: &str = "https://hackathon.api.qloo.com";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Pure Qloo API client.
#[derive(Clone)]
pub struct QlooClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl QlooClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search entities by free-text query, optionally narrowed by type.
    pub async fn search_entities(
        &self,
        query: &str,
        entity_type: Option<&str>,
    ) -> Result<Vec<EntityRef>> {
        let response: EntitySearchResponse = self
            .get("/entities", &Self::search_params(query, entity_type))
            .await?;
        Ok(response.entities)
    }

    /// Search tags by free-text query, optionally narrowed by type.
    pub async fn search_tags(
        &self,
        query: &str,
        entity_type: Option<&str>,
    ) -> Result<Vec<TagRef>> {
        let response: TagSearchResponse = self
            .get("/tags", &Self::search_params(query, entity_type))
            .await?;
        Ok(response.tags)
    }

    /// Search audiences by free-text query.
    pub async fn search_audiences(&self, query: &str) -> Result<Vec<AudienceRef>> {
        let response: AudienceSearchResponse =
            self.get("/audiences", &Self::search_params(query, None)).await?;
        Ok(response.audiences)
    }

    /// Run an insights query and return its recommendation items.
    pub async fn insights(&self, query: &InsightsQuery) -> Result<Vec<InsightItem>> {
        let params: Vec<(String, String)> = query
            .to_params()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let response: InsightsResponse = self.get("/v2/insights", &params).await?;

        debug!(
            filter_type = %query.filter_type,
            results = response.results.len(),
            "Qloo insights completed"
        );

        Ok(response.results)
    }

    fn search_params(query: &str, entity_type: Option<&str>) -> Vec<(String, String)> {
        let mut params = vec![("query".to_string(), query.to_string())];
        if let Some(t) = entity_type {
            params.push(("type".to_string(), t.to_string()));
        }
        params
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(path = %path, error = %e, "Qloo request failed");
                QlooError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(path = %path, status = %status, "Qloo API error");
            return Err(QlooError::Api(format!("{} {}: {}", path, status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| QlooError::Parse(format!("Failed to parse {} response: {}", path, e)))
    }
}
