//! [`KnowledgeGraph`] backed by the Qloo REST client.

use async_trait::async_trait;
use qloo_client::{InsightsQuery, QlooClient};

use crate::error::GraphResult;
use crate::traits::{GraphItem, GraphQuery, KnowledgeGraph};

/// Knowledge graph backend using the Qloo API.
#[derive(Clone)]
pub struct QlooGraph {
    client: QlooClient,
}

impl QlooGraph {
    pub fn new(client: QlooClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KnowledgeGraph for QlooGraph {
    async fn entity_id(&self, term: &str, graph_type: &str) -> GraphResult<Option<String>> {
        let entities = self.client.search_entities(term, Some(graph_type)).await?;
        Ok(entities.into_iter().next().map(|entity| entity.id))
    }

    async fn tag_id(&self, term: &str, graph_type: &str) -> GraphResult<Option<String>> {
        let tags = self.client.search_tags(term, Some(graph_type)).await?;
        Ok(tags.into_iter().next().map(|tag| tag.id))
    }

    async fn audience_id(&self, term: &str) -> GraphResult<Option<String>> {
        let audiences = self.client.search_audiences(term).await?;
        Ok(audiences.into_iter().next().map(|audience| audience.id))
    }

    async fn recommendations(&self, query: &GraphQuery) -> GraphResult<Vec<GraphItem>> {
        let mut insights = InsightsQuery::new(&query.filter_type).take(query.take);

        if let Some(id) = &query.signals.entity_id {
            insights = insights.entity(id);
        }
        if let Some(id) = &query.signals.tag_id {
            insights = insights.tag(id);
        }
        if let Some(id) = &query.signals.audience_id {
            insights = insights.audience(id);
        }
        if let Some(location) = &query.signals.location_query {
            insights = insights.location(location);
        }

        let items = self.client.insights(&insights).await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let description = item.best_description().map(str::to_string);
                GraphItem {
                    id: item.entity_id,
                    name: item.name,
                    description,
                    genre: item.properties.genre,
                    popularity: item.popularity,
                }
            })
            .collect())
    }
}
