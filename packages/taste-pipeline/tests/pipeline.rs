//! End-to-end pipeline behavior, driven entirely by mocks.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use taste_pipeline::testing::{graph_item, MockGraph, MockTasteModel};
use taste_pipeline::{
    Category, CategoryProvenance, CredentialPool, TastePipeline, TasteResponse,
};

fn pipeline(
    model: MockTasteModel,
    graph: MockGraph,
    pool: CredentialPool,
) -> TastePipeline<MockTasteModel, MockGraph> {
    TastePipeline::new(model, Arc::new(graph), pool)
}

fn assert_complete(response: &TasteResponse) {
    for category in Category::ALL {
        assert!(
            response.categories.contains_key(&category),
            "category {} missing from response",
            category
        );
        assert!(response.synthetic.contains_key(&category));
    }
}

#[tokio::test]
async fn test_live_and_synthetic_mix_across_categories() {
    // Music resolves and returns live items; travel's query is forced
    // to fail and must fall back without touching music.
    let model = MockTasteModel::new().with_response(
        r#"{
            "music": { "genres": ["jazz"], "artists": [] },
            "travel": { "destinations": ["Kyoto"], "activities": [] }
        }"#,
    );
    let graph = MockGraph::new()
        .with_entity("jazz", "E-jazz")
        .with_items(
            "urn:entity:music",
            vec![graph_item("Blue Note Records", Some(0.9))],
        )
        .with_query_failure("urn:entity:place");

    let response = pipeline(model, graph, CredentialPool::parse("key-a"))
        .resolve_taste("jazz and Kyoto", CancellationToken::new())
        .await;

    assert_complete(&response);
    assert_eq!(
        response.categories[&Category::Music].provenance,
        CategoryProvenance::Live
    );
    assert_eq!(
        response.categories[&Category::Music].items[0].name,
        "Blue Note Records"
    );
    assert_eq!(
        response.categories[&Category::Travel].provenance,
        CategoryProvenance::Synthetic
    );
    assert!(!response.categories[&Category::Travel].items.is_empty());
    assert!(!response.synthetic[&Category::Music]);
    assert!(response.synthetic[&Category::Travel]);
}

#[tokio::test]
async fn test_all_external_failures_yield_full_synthetic_response() {
    // Dead credential pool, failing lookups, failing queries: the
    // caller still gets at least one item per category.
    let model = MockTasteModel::new()
        .with_failure("rate limited")
        .with_failure("rate limited");
    let graph = MockGraph::new().with_failing_lookups().with_failing_queries();

    let response = pipeline(model, graph, CredentialPool::parse("key-a,key-b"))
        .resolve_taste(
            "I love Agatha Christie mysteries and Thai street food",
            CancellationToken::new(),
        )
        .await;

    assert_complete(&response);
    for category in Category::ALL {
        let result = &response.categories[&category];
        assert_eq!(result.provenance, CategoryProvenance::Synthetic);
        assert!(
            !result.items.is_empty(),
            "category {} must have a synthetic item",
            category
        );
        assert!(response.synthetic[&category]);
    }
}

#[tokio::test]
async fn test_deterministic_output_with_failing_pool() {
    let build = || {
        let model = MockTasteModel::new().with_failure("down");
        let graph = MockGraph::new().with_failing_queries();
        pipeline(model, graph, CredentialPool::parse("key-a"))
    };

    let first = build()
        .resolve_taste("surprise me", CancellationToken::new())
        .await;
    let second = build()
        .resolve_taste("surprise me", CancellationToken::new())
        .await;

    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b, "repeated identical requests must serialize identically");
}

#[tokio::test]
async fn test_empty_input_still_produces_recommendations() {
    let model = MockTasteModel::new();
    let graph = MockGraph::new();

    let response = pipeline(model, graph, CredentialPool::empty())
        .resolve_taste("", CancellationToken::new())
        .await;

    assert_complete(&response);
    for category in Category::ALL {
        assert!(
            !response.categories[&category].items.is_empty(),
            "category {} must not be empty for empty input",
            category
        );
    }
}

#[tokio::test]
async fn test_lexical_fallback_attempts_live_resolution() {
    // Even when the semantic tier is gone, extracted lexical terms
    // still drive live graph queries before any synthetic fallback.
    let graph = MockGraph::new()
        .with_entity("mystery", "E-mystery")
        .with_items(
            "urn:entity:book",
            vec![graph_item("Murder on the Orient Express", Some(0.95))],
        );
    let probe = graph.clone();

    let response = pipeline(MockTasteModel::new(), graph, CredentialPool::empty())
        .resolve_taste(
            "I love Agatha Christie mysteries and Thai street food",
            CancellationToken::new(),
        )
        .await;

    assert_eq!(
        response.categories[&Category::Books].provenance,
        CategoryProvenance::Live
    );
    assert_eq!(
        response.categories[&Category::Books].items[0].name,
        "Murder on the Orient Express"
    );

    // Books and food both went to the graph with their lexical terms.
    let lookups = probe.lookups_seen();
    assert!(lookups
        .iter()
        .any(|(kind, term)| kind == "entity" && term == "mystery"));
    assert!(lookups
        .iter()
        .any(|(kind, term)| kind == "entity" && term == "Thai street food"));

    // One recommendation query per category.
    assert_eq!(probe.queries_seen().len(), Category::ALL.len());
}

#[tokio::test]
async fn test_cancelled_request_returns_complete_empty_shell() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let response = pipeline(
        MockTasteModel::new(),
        MockGraph::new(),
        CredentialPool::empty(),
    )
    .resolve_taste("jazz", cancel)
    .await;

    // Cancellation abandons category work but the response shape holds.
    assert_complete(&response);
    for category in Category::ALL {
        assert!(response.categories[&category].items.is_empty());
    }
}

#[tokio::test]
async fn test_signals_flow_into_graph_query() {
    let model = MockTasteModel::new().with_response(
        r#"{
            "music": { "genres": ["jazz"], "artists": [] },
            "travel": { "destinations": ["Kyoto"], "activities": [] }
        }"#,
    );
    let graph = MockGraph::new()
        .with_entity("jazz", "E-jazz")
        .with_tag("jazz", "T-jazz");
    let probe = graph.clone();

    pipeline(model, graph, CredentialPool::parse("key-a"))
        .resolve_taste("jazz in Kyoto", CancellationToken::new())
        .await;

    let music_query = probe
        .queries_seen()
        .into_iter()
        .find(|q| q.filter_type == "urn:entity:music")
        .expect("music query must have been issued");

    assert_eq!(music_query.signals.entity_id.as_deref(), Some("E-jazz"));
    assert_eq!(music_query.signals.tag_id.as_deref(), Some("T-jazz"));
    assert_eq!(music_query.signals.location_query.as_deref(), Some("Kyoto"));
}
