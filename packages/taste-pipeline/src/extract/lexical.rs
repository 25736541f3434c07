//! Keyword/pattern taste extraction.
//!
//! The last extraction tier before locale defaults: no external calls,
//! guaranteed to terminate, and guaranteed to return a non-empty
//! profile. Rule tables are built once at startup and injected into the
//! extractor; precedence is table order, with explicit `unless`
//! patterns where a broad rule must yield to a more specific phrase.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use crate::region::{detect_script_region, Region};
use crate::types::{Category, CategoryTaste, TasteProfile, TasteSource};

/// One keyword rule: when `pattern` matches (and `unless` does not),
/// `term` is added to `category`.
struct TermRule {
    category: Category,
    term: &'static str,
    pattern: Regex,
    unless: Option<Regex>,
}

/// A category-level default applied when the input clearly talks about
/// the category but no specific rule matched.
struct HintRule {
    category: Category,
    term: &'static str,
    pattern: Regex,
}

/// Pattern/keyword extractor with fixed-precedence rule tables.
pub struct LexicalExtractor {
    term_rules: Vec<TermRule>,
    hint_rules: Vec<HintRule>,
}

impl Default for LexicalExtractor {
    fn default() -> Self {
        Self::builtin()
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("built-in lexical pattern must compile")
}

impl LexicalExtractor {
    /// Build the extractor with its built-in rule tables.
    pub fn builtin() -> Self {
        // Within each category the primary facet comes first (genres
        // before authors, cuisines before dishes, destinations before
        // activities) so the first term is the strongest query seed.
        let term_table: &[(Category, &str, &str, Option<&str>)] = &[
            // books: genres
            (
                Category::Books,
                "mystery",
                r"mystery|detective|crime|thriller|murder|investigation|sleuth",
                None,
            ),
            (
                Category::Books,
                "detective fiction",
                r"detective\s+(fiction|series|novels)",
                None,
            ),
            (
                Category::Books,
                "crime fiction",
                r"crime\s+(fiction|series)|criminal",
                None,
            ),
            (
                Category::Books,
                "contemporary fiction",
                r"contemporary\s+fiction|modern\s+fiction|literary\s+fiction",
                None,
            ),
            (
                Category::Books,
                "character-driven fiction",
                r"character\s+development|character-driven|complex\s+narratives",
                None,
            ),
            // books: authors
            (Category::Books, "Agatha Christie", r"agatha\s+christie", None),
            (Category::Books, "Haruki Murakami", r"murakami", None),
            (Category::Books, "Stephen King", r"stephen\s+king", None),
            (Category::Books, "J.K. Rowling", r"j\.?k\.?\s+rowling|rowling", None),
            (Category::Books, "George Orwell", r"george\s+orwell|orwell", None),
            (Category::Books, "Jane Austen", r"jane\s+austen|austen", None),
            // food: cuisines
            (Category::Food, "Thai street food", r"thai\s+street\s+food", None),
            (Category::Food, "Thai cuisine", r"thai", Some(r"thai\s+street")),
            (
                Category::Food,
                "Neapolitan pizza",
                r"neapolitan\s+pizza|authentic.*pizza",
                None,
            ),
            (
                Category::Food,
                "Italian cuisine",
                r"italian|pasta|carbonara",
                Some(r"italian\s+pizza"),
            ),
            (Category::Food, "Ethiopian cuisine", r"ethiopian", None),
            (Category::Food, "Japanese omakase", r"omakase", None),
            (
                Category::Food,
                "Japanese cuisine",
                r"japanese",
                Some(r"japanese\s+omakase"),
            ),
            (Category::Food, "Indian cuisine", r"indian|curry|biryani", None),
            (Category::Food, "Chinese cuisine", r"chinese|dim\s+sum", None),
            (Category::Food, "Mexican cuisine", r"mexican|taco|burrito", None),
            (Category::Food, "French cuisine", r"french|croissant|baguette", None),
            // food: dishes
            (Category::Food, "injera", r"injera", None),
            (Category::Food, "pizza", r"pizza", None),
            (Category::Food, "omakase dining", r"omakase", None),
            (Category::Food, "street food", r"street\s+food", None),
            (Category::Food, "ramen", r"ramen", None),
            (Category::Food, "sushi", r"sushi", None),
            (Category::Food, "pasta", r"pasta", None),
            (Category::Food, "curry", r"curry", None),
            // music: genres
            (Category::Music, "jazz", r"jazz", None),
            (Category::Music, "classical", r"classical", None),
            (Category::Music, "rock", r"rock", None),
            (Category::Music, "pop", r"pop", None),
            (Category::Music, "hip-hop", r"hip-?hop", None),
            (Category::Music, "electronic", r"electronic|edm|techno", None),
            (Category::Music, "folk", r"folk", None),
            (Category::Music, "blues", r"blues", None),
            (Category::Music, "country", r"country", None),
            (Category::Music, "reggae", r"reggae", None),
            (Category::Music, "lo-fi", r"lo-?fi", None),
            (Category::Music, "indie", r"indie", None),
            // travel: destinations inferred from cultural mentions
            (
                Category::Travel,
                "Japan",
                r"japanese|japan|tokyo|kyoto|osaka",
                None,
            ),
            (
                Category::Travel,
                "Italy",
                r"italian|italy|rome|venice|florence|neapolitan",
                None,
            ),
            (Category::Travel, "Thailand", r"thai|thailand|bangkok", None),
            (Category::Travel, "Ethiopia", r"ethiopian|ethiopia", None),
            (Category::Travel, "India", r"indian|india|mumbai|delhi", None),
            (Category::Travel, "France", r"french|france|paris", None),
            (Category::Travel, "China", r"chinese|china|beijing", None),
            (Category::Travel, "Mexico", r"mexican|mexico", None),
            // travel: activities
            (
                Category::Travel,
                "culinary tours",
                r"food|cuisine|dining|restaurant",
                None,
            ),
            (
                Category::Travel,
                "cultural exploration",
                r"culture|cultural|heritage|history",
                None,
            ),
            (
                Category::Travel,
                "literary tours",
                r"book|author|literature",
                None,
            ),
            (Category::Travel, "street food tours", r"street\s+food", None),
            (
                Category::Travel,
                "fine dining",
                r"omakase|fine\s+dining|michelin",
                None,
            ),
        ];

        let hint_table: &[(Category, &str, &str)] = &[
            (
                Category::Books,
                "contemporary fiction",
                r"book|novel|read|literature|story|fiction",
            ),
            (
                Category::Food,
                "international cuisine",
                r"food|cuisine|dish|eat|dining|restaurant",
            ),
            (
                Category::Music,
                "indie",
                r"music|song|band|singer|artist|playlist",
            ),
            (
                Category::Travel,
                "cultural destinations",
                r"travel|trip|visit|explore|destination",
            ),
        ];

        Self {
            term_rules: term_table
                .iter()
                .map(|(category, term, pattern, unless)| TermRule {
                    category: *category,
                    term,
                    pattern: re(pattern),
                    unless: unless.map(re),
                })
                .collect(),
            hint_rules: hint_table
                .iter()
                .map(|(category, term, pattern)| HintRule {
                    category: *category,
                    term,
                    pattern: re(pattern),
                })
                .collect(),
        }
    }

    /// Extract a taste profile from raw text.
    ///
    /// Always returns a profile with every category present, and never
    /// an entirely empty one: when nothing matches (including the empty
    /// input), locale defaults selected by the input's script fill all
    /// categories.
    pub fn extract(&self, input: &str) -> TasteProfile {
        let mut terms: BTreeMap<Category, Vec<String>> = Category::ALL
            .into_iter()
            .map(|category| (category, Vec::new()))
            .collect();

        if !input.trim().is_empty() {
            for rule in &self.term_rules {
                if !rule.pattern.is_match(input) {
                    continue;
                }
                if let Some(unless) = &rule.unless {
                    if unless.is_match(input) {
                        continue;
                    }
                }
                let list = terms.entry(rule.category).or_default();
                if !list.iter().any(|t| t.eq_ignore_ascii_case(rule.term)) {
                    list.push(rule.term.to_string());
                }
            }

            for hint in &self.hint_rules {
                let list = terms.entry(hint.category).or_default();
                if list.is_empty() && hint.pattern.is_match(input) {
                    list.push(hint.term.to_string());
                }
            }
        }

        if terms.values().all(Vec::is_empty) {
            let region = detect_script_region(input).unwrap_or(Region::Global);
            debug!(?region, "no lexical matches, seeding locale defaults");
            let categories = Category::ALL
                .into_iter()
                .map(|category| {
                    let defaults = region
                        .default_terms(category)
                        .iter()
                        .map(|t| t.to_string())
                        .collect();
                    (category, CategoryTaste::new(defaults, TasteSource::Default))
                })
                .collect();
            return TasteProfile::from_parts(categories, TasteSource::Default);
        }

        let categories = terms
            .into_iter()
            .map(|(category, list)| (category, CategoryTaste::new(list, TasteSource::Lexical)))
            .collect();
        TasteProfile::from_parts(categories, TasteSource::Lexical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_author_and_cuisine() {
        let extractor = LexicalExtractor::builtin();
        let profile =
            extractor.extract("I love Agatha Christie mysteries and Thai street food");

        let books = profile.terms(Category::Books);
        assert!(books.contains(&"Agatha Christie".to_string()));
        assert!(books.contains(&"mystery".to_string()));
        // Genres come first, so the primary query term is the genre.
        assert_eq!(profile.primary_term(Category::Books), Some("mystery"));

        let food = profile.terms(Category::Food);
        assert!(food.contains(&"Thai street food".to_string()));
        // The broad rule yields to the specific phrase.
        assert!(!food.contains(&"Thai cuisine".to_string()));

        assert_eq!(profile.source(Category::Books), TasteSource::Lexical);
    }

    #[test]
    fn test_infers_travel_from_cultural_mentions() {
        let extractor = LexicalExtractor::builtin();
        let profile = extractor.extract("jazz and authentic japanese ramen");

        assert!(profile
            .terms(Category::Travel)
            .contains(&"Japan".to_string()));
        assert!(profile.terms(Category::Music).contains(&"jazz".to_string()));
    }

    #[test]
    fn test_category_hint_default() {
        let extractor = LexicalExtractor::builtin();
        let profile = extractor.extract("I read every evening");

        assert_eq!(
            profile.terms(Category::Books),
            &["contemporary fiction".to_string()]
        );
    }

    #[test]
    fn test_empty_input_seeds_global_defaults() {
        let extractor = LexicalExtractor::builtin();
        let profile = extractor.extract("");

        for category in Category::ALL {
            assert!(
                !profile.terms(category).is_empty(),
                "category {} must not be empty for empty input",
                category
            );
            assert_eq!(profile.source(category), TasteSource::Default);
        }
        assert_eq!(
            profile.terms(Category::Food),
            &["international cuisine".to_string()]
        );
    }

    #[test]
    fn test_bengali_script_seeds_bengali_defaults() {
        let extractor = LexicalExtractor::builtin();
        let profile = extractor.extract("আমি গান শুনতে ভালোবাসি");

        assert_eq!(
            profile.terms(Category::Music),
            &["Rabindra Sangeet".to_string()]
        );
        assert_eq!(profile.source(Category::Music), TasteSource::Default);
    }

    #[test]
    fn test_no_duplicate_terms() {
        let extractor = LexicalExtractor::builtin();
        // "curry" appears twice: once via Indian cuisine, once as a dish.
        let profile = extractor.extract("curry curry curry");

        let food = profile.terms(Category::Food);
        let curry_count = food.iter().filter(|t| t.as_str() == "curry").count();
        assert_eq!(curry_count, 1);
        assert!(food.contains(&"Indian cuisine".to_string()));
    }
}
