//! Semantic extraction: the strict-schema prompt and defensive decoding
//! of whatever the model actually returns.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{Category, CategoryTaste, TasteProfile, TasteSource};

/// Build the extraction prompt for one input.
///
/// The schema block doubles as few-shot structure: models follow the
/// shape far more reliably when it is spelled out than when described.
pub fn build_prompt(input: &str) -> String {
    format!(
        r#"You are a cultural taste analyst. Extract taste preferences from the text below with high precision.

Rules:
1. Food items go in "food" only, music in "music", books and authors in "books", destinations in "travel".
2. Extract specific items, not generic descriptions.
3. Omit a category entirely when the text says nothing about it.
4. Return ONLY a JSON object in exactly this shape, with no markdown fences and no commentary:

{{
  "music": {{ "genres": [], "artists": [] }},
  "food": {{ "cuisines": [], "dishes": [] }},
  "books": {{ "genres": [], "authors": [] }},
  "travel": {{ "destinations": [], "activities": [] }}
}}

Text:
"{input}"
"#
    )
}

/// The raw semantic document, before canonicalization.
///
/// Unknown top-level keys are a validation failure (the model invented
/// a category); unknown facet keys inside a known category are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TasteDoc {
    #[serde(default)]
    music: Option<MusicFacets>,

    #[serde(default)]
    food: Option<FoodFacets>,

    #[serde(default)]
    books: Option<BookFacets>,

    #[serde(default)]
    travel: Option<TravelFacets>,
}

#[derive(Debug, Default, Deserialize)]
struct MusicFacets {
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    artists: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FoodFacets {
    #[serde(default)]
    cuisines: Vec<String>,
    #[serde(default)]
    dishes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BookFacets {
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    authors: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TravelFacets {
    #[serde(default)]
    destinations: Vec<String>,
    #[serde(default)]
    activities: Vec<String>,
}

impl TasteDoc {
    fn facet_terms(&self, category: Category) -> Vec<&str> {
        // Primary facet first: its head term becomes the query seed.
        let (primary, secondary): (&[String], &[String]) = match category {
            Category::Music => match &self.music {
                Some(f) => (&f.genres, &f.artists),
                None => (&[], &[]),
            },
            Category::Food => match &self.food {
                Some(f) => (&f.cuisines, &f.dishes),
                None => (&[], &[]),
            },
            Category::Books => match &self.books {
                Some(f) => (&f.genres, &f.authors),
                None => (&[], &[]),
            },
            Category::Travel => match &self.travel {
                Some(f) => (&f.destinations, &f.activities),
                None => (&[], &[]),
            },
        };
        primary
            .iter()
            .chain(secondary.iter())
            .map(String::as_str)
            .collect()
    }

    /// Total non-blank terms across all categories.
    pub fn term_count(&self) -> usize {
        Category::ALL
            .into_iter()
            .flat_map(|category| self.facet_terms(category))
            .filter(|term| !term.trim().is_empty())
            .count()
    }

    /// Canonicalize into a complete profile tagged as semantic.
    pub fn into_profile(self) -> TasteProfile {
        let categories: BTreeMap<Category, CategoryTaste> = Category::ALL
            .into_iter()
            .map(|category| {
                let mut terms: Vec<String> = Vec::new();
                for term in self.facet_terms(category) {
                    let trimmed = term.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if !terms.iter().any(|t| t.eq_ignore_ascii_case(trimmed)) {
                        terms.push(trimmed.to_string());
                    }
                }
                (category, CategoryTaste::new(terms, TasteSource::Semantic))
            })
            .collect();
        TasteProfile::from_parts(categories, TasteSource::Semantic)
    }
}

/// Decode a model response into a validated [`TasteDoc`].
///
/// Decoding is defensive, in order: direct JSON, a fenced code block,
/// then the outermost braced span. A document that decodes but does not
/// match the canonical shape (or holds zero terms) fails validation and
/// sends the orchestrator to its next credential.
pub fn decode_document(text: &str) -> ExtractResult<TasteDoc> {
    let value = locate_json(text).ok_or(ExtractError::Unparseable)?;

    let doc: TasteDoc = serde_json::from_value(value)
        .map_err(|e| ExtractError::Invalid(e.to_string()))?;

    if doc.term_count() == 0 {
        return Err(ExtractError::Invalid(
            "document contains no terms".to_string(),
        ));
    }

    Ok(doc)
}

fn locate_json(text: &str) -> Option<serde_json::Value> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    // A fenced block, with or without a language tag.
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            if let Ok(value) = serde_json::from_str(after[..end].trim()) {
                return Some(value);
            }
        }
    }

    // The outermost braced span, for prose-wrapped objects.
    if let (Some(open), Some(close)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if open < close {
            if let Ok(value) = serde_json::from_str(trimmed[open..=close].trim()) {
                return Some(value);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "books": { "genres": ["mystery"], "authors": ["Agatha Christie"] },
        "food": { "cuisines": ["Thai cuisine"], "dishes": ["Thai street food"] }
    }"#;

    #[test]
    fn test_decodes_direct_json() {
        let doc = decode_document(DOC).unwrap();
        assert_eq!(doc.term_count(), 4);
    }

    #[test]
    fn test_decodes_fenced_block() {
        let wrapped = format!("Here you go:\n```json\n{}\n```\nEnjoy!", DOC);
        let doc = decode_document(&wrapped).unwrap();
        assert_eq!(doc.term_count(), 4);
    }

    #[test]
    fn test_decodes_fenced_block_without_language_tag() {
        let wrapped = format!("```\n{}\n```", DOC);
        assert!(decode_document(&wrapped).is_ok());
    }

    #[test]
    fn test_decodes_embedded_object() {
        let wrapped = format!("The extracted preferences are {} as requested.", DOC);
        assert!(decode_document(&wrapped).is_ok());
    }

    #[test]
    fn test_rejects_free_text() {
        let err = decode_document("I could not find any preferences.").unwrap_err();
        assert!(matches!(err, ExtractError::Unparseable));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let err = decode_document(r#"{"movies": {"genres": ["drama"]}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_string_terms() {
        let err = decode_document(r#"{"music": {"genres": [1, 2]}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_document() {
        let err =
            decode_document(r#"{"music": {"genres": [], "artists": []}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid(_)));
    }

    #[test]
    fn test_into_profile_orders_primary_facet_first() {
        let doc = decode_document(DOC).unwrap();
        let profile = doc.into_profile();

        assert_eq!(profile.primary_term(Category::Books), Some("mystery"));
        assert_eq!(
            profile.terms(Category::Books),
            &["mystery".to_string(), "Agatha Christie".to_string()]
        );
        // Every category is present even when the model omitted it.
        assert!(profile.terms(Category::Music).is_empty());
        assert_eq!(profile.source(Category::Music), TasteSource::Semantic);
    }

    #[test]
    fn test_into_profile_dedupes_case_insensitively() {
        let doc = decode_document(
            r#"{"music": {"genres": ["Jazz", "jazz"], "artists": []}}"#,
        )
        .unwrap();
        let profile = doc.into_profile();
        assert_eq!(profile.terms(Category::Music), &["Jazz".to_string()]);
    }

    #[test]
    fn test_prompt_embeds_input_and_schema() {
        let prompt = build_prompt("I love jazz");
        assert!(prompt.contains("\"I love jazz\""));
        assert!(prompt.contains("\"destinations\""));
    }
}
