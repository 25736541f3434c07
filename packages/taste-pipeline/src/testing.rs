//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline
//! without making real model or knowledge-graph calls. The mocks are
//! cheaply cloneable and share state across clones, so tests can hold a
//! probe clone for assertions after handing the mock to the pipeline.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use crate::credentials::ApiKey;
use crate::error::{ExtractError, ExtractResult, GraphError, GraphResult};
use crate::traits::{GraphItem, GraphQuery, KnowledgeGraph, TasteModel};

/// Build a minimal graph item for tests.
pub fn graph_item(name: &str, popularity: Option<f64>) -> GraphItem {
    GraphItem {
        id: Some(format!("entity:{}", name.to_lowercase().replace(' ', "-"))),
        name: name.to_string(),
        description: Some(format!("{} from the test graph", name)),
        genre: None,
        popularity,
    }
}

/// A mock taste model with a scripted response queue.
///
/// Each `generate` call pops the next scripted outcome; an exhausted
/// script fails the call, which conveniently models a dead credential
/// pool.
#[derive(Clone, Default)]
pub struct MockTasteModel {
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTasteModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failed attempt.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// The credentials used so far, in call order.
    pub fn credentials_seen(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TasteModel for MockTasteModel {
    async fn generate(&self, credential: &ApiKey, _prompt: &str) -> ExtractResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(credential.expose().to_string());

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ExtractError::Model(message)),
            None => Err(ExtractError::Model("no scripted response".to_string())),
        }
    }
}

/// A mock knowledge graph with configurable lookups, items, and
/// scripted failures.
#[derive(Clone, Default)]
pub struct MockGraph {
    entities: Arc<RwLock<HashMap<String, String>>>,
    tags: Arc<RwLock<HashMap<String, String>>>,
    audiences: Arc<RwLock<HashMap<String, String>>>,
    items: Arc<RwLock<HashMap<String, Vec<GraphItem>>>>,

    fail_entity_lookups: Arc<RwLock<bool>>,
    fail_all_lookups: Arc<RwLock<bool>>,
    failing_queries: Arc<RwLock<Option<HashSet<String>>>>,

    lookups: Arc<RwLock<Vec<(String, String)>>>,
    queries: Arc<RwLock<Vec<GraphQuery>>>,
}

impl MockGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a term to an entity id.
    pub fn with_entity(self, term: impl Into<String>, id: impl Into<String>) -> Self {
        self.entities.write().unwrap().insert(term.into(), id.into());
        self
    }

    /// Map a term to a tag id.
    pub fn with_tag(self, term: impl Into<String>, id: impl Into<String>) -> Self {
        self.tags.write().unwrap().insert(term.into(), id.into());
        self
    }

    /// Map a term to an audience id.
    pub fn with_audience(self, term: impl Into<String>, id: impl Into<String>) -> Self {
        self.audiences.write().unwrap().insert(term.into(), id.into());
        self
    }

    /// Script items for one `filter.type`.
    pub fn with_items(self, filter_type: impl Into<String>, items: Vec<GraphItem>) -> Self {
        self.items.write().unwrap().insert(filter_type.into(), items);
        self
    }

    /// Fail entity lookups only (tag/audience still answer).
    pub fn with_failing_entity_lookups(self) -> Self {
        *self.fail_entity_lookups.write().unwrap() = true;
        self
    }

    /// Fail every search lookup.
    pub fn with_failing_lookups(self) -> Self {
        *self.fail_all_lookups.write().unwrap() = true;
        self
    }

    /// Fail every recommendation query.
    pub fn with_failing_queries(self) -> Self {
        *self.failing_queries.write().unwrap() = Some(HashSet::new());
        self
    }

    /// Fail recommendation queries for one `filter.type` only.
    pub fn with_query_failure(self, filter_type: impl Into<String>) -> Self {
        self.failing_queries
            .write()
            .unwrap()
            .get_or_insert_with(HashSet::new)
            .insert(filter_type.into());
        self
    }

    /// Search lookups made so far, as (kind, term) pairs.
    pub fn lookups_seen(&self) -> Vec<(String, String)> {
        self.lookups.read().unwrap().clone()
    }

    /// Recommendation queries made so far.
    pub fn queries_seen(&self) -> Vec<GraphQuery> {
        self.queries.read().unwrap().clone()
    }

    fn record_lookup(&self, kind: &str, term: &str) {
        self.lookups
            .write()
            .unwrap()
            .push((kind.to_string(), term.to_string()));
    }

    fn query_should_fail(&self, filter_type: &str) -> bool {
        match self.failing_queries.read().unwrap().as_ref() {
            // An empty set means "fail everything".
            Some(set) => set.is_empty() || set.contains(filter_type),
            None => false,
        }
    }
}

#[async_trait]
impl KnowledgeGraph for MockGraph {
    async fn entity_id(&self, term: &str, _graph_type: &str) -> GraphResult<Option<String>> {
        self.record_lookup("entity", term);
        if *self.fail_all_lookups.read().unwrap() || *self.fail_entity_lookups.read().unwrap() {
            return Err(GraphError::Api("scripted entity lookup failure".to_string()));
        }
        Ok(self.entities.read().unwrap().get(term).cloned())
    }

    async fn tag_id(&self, term: &str, _graph_type: &str) -> GraphResult<Option<String>> {
        self.record_lookup("tag", term);
        if *self.fail_all_lookups.read().unwrap() {
            return Err(GraphError::Api("scripted tag lookup failure".to_string()));
        }
        Ok(self.tags.read().unwrap().get(term).cloned())
    }

    async fn audience_id(&self, term: &str) -> GraphResult<Option<String>> {
        self.record_lookup("audience", term);
        if *self.fail_all_lookups.read().unwrap() {
            return Err(GraphError::Api(
                "scripted audience lookup failure".to_string(),
            ));
        }
        Ok(self.audiences.read().unwrap().get(term).cloned())
    }

    async fn recommendations(&self, query: &GraphQuery) -> GraphResult<Vec<GraphItem>> {
        self.queries.write().unwrap().push(query.clone());

        if self.query_should_fail(&query.filter_type) {
            return Err(GraphError::Api("scripted query failure".to_string()));
        }

        Ok(self
            .items
            .read()
            .unwrap()
            .get(&query.filter_type)
            .cloned()
            .unwrap_or_default())
    }
}
