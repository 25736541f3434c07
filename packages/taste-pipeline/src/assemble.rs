//! Response assembly: purely structural merge of per-category results.

use std::collections::BTreeMap;

use tracing::error;

use crate::types::{Category, CategoryRecommendations, TasteResponse};

/// Merge per-category results into the final payload.
///
/// No business logic here; the single enforced invariant is that every
/// configured category key is present in the output, even with an empty
/// item list (zero matches is a legitimate terminal state, not an
/// error).
pub fn assemble(results: BTreeMap<Category, CategoryRecommendations>) -> TasteResponse {
    let mut categories = results;

    for category in Category::ALL {
        if !categories.contains_key(&category) {
            error!(
                category = %category,
                "category missing from aggregation results, inserting empty list"
            );
            categories.insert(category, CategoryRecommendations::empty());
        }
    }

    let synthetic = categories
        .iter()
        .map(|(category, result)| (*category, result.provenance.is_synthetic()))
        .collect();

    TasteResponse {
        categories,
        synthetic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryProvenance, Provenance, Recommendation};

    fn one_item(category: Category, provenance: CategoryProvenance) -> CategoryRecommendations {
        CategoryRecommendations {
            items: vec![Recommendation {
                id: format!("test:{}", category),
                name: "X".to_string(),
                description: "Y".to_string(),
                category,
                match_score: 80,
                provenance: match provenance {
                    CategoryProvenance::Synthetic => Provenance::Synthetic,
                    _ => Provenance::Live,
                },
                fun_fact: None,
            }],
            provenance,
        }
    }

    #[test]
    fn test_fills_missing_categories() {
        let mut results = BTreeMap::new();
        results.insert(Category::Music, one_item(Category::Music, CategoryProvenance::Live));

        let response = assemble(results);

        for category in Category::ALL {
            assert!(response.categories.contains_key(&category));
            assert!(response.synthetic.contains_key(&category));
        }
        assert!(response.categories[&Category::Books].items.is_empty());
        assert!(!response.synthetic[&Category::Books]);
    }

    #[test]
    fn test_provenance_summary_is_per_category() {
        let mut results = BTreeMap::new();
        results.insert(Category::Music, one_item(Category::Music, CategoryProvenance::Live));
        results.insert(
            Category::Travel,
            one_item(Category::Travel, CategoryProvenance::Synthetic),
        );

        let response = assemble(results);

        assert!(!response.synthetic[&Category::Music]);
        assert!(response.synthetic[&Category::Travel]);
    }
}
