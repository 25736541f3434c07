//! The canonical taste profile produced by parsing.
//!
//! A [`TasteProfile`] is built once per request by the parse
//! orchestrator and only read afterward. Every configured category is
//! always present; empty term lists are legal for individual
//! categories.

use serde::Serialize;
use std::collections::BTreeMap;

use super::category::Category;

/// Which extraction tier produced a category's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TasteSource {
    /// The generative-language service
    Semantic,
    /// The keyword/pattern extractor
    Lexical,
    /// Locale/script-based default terms
    Default,
}

/// One category's extracted terms, most specific first.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTaste {
    pub terms: Vec<String>,
    pub source: TasteSource,
}

impl CategoryTaste {
    /// An empty entry with the given source tag.
    pub fn empty(source: TasteSource) -> Self {
        Self {
            terms: Vec::new(),
            source,
        }
    }

    /// Terms plus source tag.
    pub fn new(terms: Vec<String>, source: TasteSource) -> Self {
        Self { terms, source }
    }
}

/// The canonical, category-keyed taste structure.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TasteProfile {
    categories: BTreeMap<Category, CategoryTaste>,
}

impl TasteProfile {
    /// Build a profile, filling in any category the caller missed.
    ///
    /// Missing categories should be impossible by construction in both
    /// extractors; if one slips through it is repaired with an empty
    /// entry rather than aborting the request.
    pub fn from_parts(
        mut categories: BTreeMap<Category, CategoryTaste>,
        source: TasteSource,
    ) -> Self {
        for category in Category::ALL {
            if !categories.contains_key(&category) {
                tracing::error!(
                    category = %category,
                    "category missing from taste profile, inserting empty entry"
                );
                categories.insert(category, CategoryTaste::empty(source));
            }
        }
        Self { categories }
    }

    /// The category's terms (empty slice if the category has none).
    pub fn terms(&self, category: Category) -> &[String] {
        self.categories
            .get(&category)
            .map(|taste| taste.terms.as_slice())
            .unwrap_or_default()
    }

    /// The category's extraction source.
    pub fn source(&self, category: Category) -> TasteSource {
        self.categories
            .get(&category)
            .map(|taste| taste.source)
            .unwrap_or(TasteSource::Default)
    }

    /// First term of the category, the one used for signal resolution.
    pub fn primary_term(&self, category: Category) -> Option<&str> {
        self.terms(category)
            .iter()
            .map(String::as_str)
            .find(|term| !term.trim().is_empty())
    }

    /// First travel term anywhere in the profile, used as the location
    /// signal for every category.
    pub fn travel_hint(&self) -> Option<&str> {
        self.primary_term(Category::Travel)
    }

    /// All terms across all categories, in category order.
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        Category::ALL
            .into_iter()
            .flat_map(|category| self.terms(category).iter().map(String::as_str))
    }

    /// True when no category has any term.
    pub fn is_empty(&self) -> bool {
        self.all_terms().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_music() -> TasteProfile {
        let mut categories = BTreeMap::new();
        categories.insert(
            Category::Music,
            CategoryTaste::new(vec!["jazz".to_string()], TasteSource::Lexical),
        );
        TasteProfile::from_parts(categories, TasteSource::Lexical)
    }

    #[test]
    fn test_from_parts_fills_missing_categories() {
        let profile = profile_with_music();
        for category in Category::ALL {
            // Every category key must exist even when empty.
            let _ = profile.source(category);
        }
        assert_eq!(profile.terms(Category::Music), &["jazz".to_string()]);
        assert!(profile.terms(Category::Food).is_empty());
        assert!(profile.terms(Category::Travel).is_empty());
    }

    #[test]
    fn test_primary_term_skips_blank_terms() {
        let mut categories = BTreeMap::new();
        categories.insert(
            Category::Food,
            CategoryTaste::new(
                vec!["  ".to_string(), "Thai street food".to_string()],
                TasteSource::Semantic,
            ),
        );
        let profile = TasteProfile::from_parts(categories, TasteSource::Semantic);
        assert_eq!(profile.primary_term(Category::Food), Some("Thai street food"));
        assert_eq!(profile.primary_term(Category::Music), None);
    }

    #[test]
    fn test_travel_hint() {
        let mut categories = BTreeMap::new();
        categories.insert(
            Category::Travel,
            CategoryTaste::new(vec!["Kyoto".to_string()], TasteSource::Semantic),
        );
        let profile = TasteProfile::from_parts(categories, TasteSource::Semantic);
        assert_eq!(profile.travel_hint(), Some("Kyoto"));
        assert!(profile_with_music().travel_hint().is_none());
    }

    #[test]
    fn test_serializes_as_category_map() {
        let json = serde_json::to_value(profile_with_music()).unwrap();
        assert_eq!(json["music"]["terms"][0], "jazz");
        assert_eq!(json["music"]["source"], "lexical");
        assert!(json["food"]["terms"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_is_empty() {
        let profile = TasteProfile::from_parts(BTreeMap::new(), TasteSource::Default);
        assert!(profile.is_empty());
        assert!(!profile_with_music().is_empty());
    }
}
