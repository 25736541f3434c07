//! Signal resolution: mapping a category's terms to knowledge-graph
//! identifiers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::traits::KnowledgeGraph;
use crate::types::{Category, SignalSet, TasteProfile};

/// Resolves one category's taste terms into a [`SignalSet`].
///
/// The three graph lookups are independent: any of them failing leaves
/// its field `None` and never blocks the others. Nothing resolving at
/// all is legal; the aggregator can query without signals.
pub struct SignalResolver<G: KnowledgeGraph> {
    graph: Arc<G>,
}

impl<G: KnowledgeGraph> SignalResolver<G> {
    pub fn new(graph: Arc<G>) -> Self {
        Self { graph }
    }

    /// Resolve signals for one category of the profile.
    pub async fn resolve(&self, category: Category, profile: &TasteProfile) -> SignalSet {
        let mut signals = SignalSet {
            // The location signal is profile-derived, not looked up: any
            // travel term anywhere in the profile localizes every
            // category's query.
            location_query: profile.travel_hint().map(str::to_string),
            ..SignalSet::default()
        };

        let Some(term) = profile.primary_term(category) else {
            debug!(category = %category, "no term to resolve");
            return signals;
        };

        let graph_type = category.graph_type();

        let (entity, tag, audience) = tokio::join!(
            self.graph.entity_id(term, graph_type),
            self.graph.tag_id(term, graph_type),
            self.graph.audience_id(term),
        );

        match entity {
            Ok(id) => signals.entity_id = id,
            Err(e) => warn!(category = %category, term, error = %e, "entity lookup failed"),
        }
        match tag {
            Ok(id) => signals.tag_id = id,
            Err(e) => warn!(category = %category, term, error = %e, "tag lookup failed"),
        }
        match audience {
            Ok(id) => signals.audience_id = id,
            Err(e) => warn!(category = %category, term, error = %e, "audience lookup failed"),
        }

        debug!(
            category = %category,
            term,
            resolved = signals.signal_count(),
            "signal resolution complete"
        );

        signals
    }
}
