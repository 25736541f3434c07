//! Cultural region detection.
//!
//! Two independent detectors feed the fallback tiers:
//!
//! - [`RegionRules`] matches extracted terms against a prioritized
//!   keyword table (first match wins) and drives the synthetic
//!   catalog's regional defaults.
//! - [`detect_script_region`] inspects the raw input's characters so
//!   the lexical extractor can seed culturally sensible default terms
//!   for inputs written in a non-Latin script, even when no keyword
//!   matched.

use regex::Regex;

use crate::types::{Category, TasteProfile};

/// A cultural region with dedicated fallback defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Bengali,
    Japanese,
    French,
    Brazilian,
    Chinese,
    /// No regional hint detected
    Global,
}

impl Region {
    /// Default taste terms for this region, by category.
    ///
    /// These seed the lexical extractor's last-resort tier; the
    /// synthetic catalog carries matching flagship entries so a
    /// defaulted profile degrades into coherent recommendations.
    pub fn default_terms(&self, category: Category) -> &'static [&'static str] {
        match (self, category) {
            (Region::Bengali, Category::Music) => &["Rabindra Sangeet"],
            (Region::Bengali, Category::Food) => &["Hilsa Fish"],
            (Region::Bengali, Category::Books) => &["Humayun Ahmed novels"],
            (Region::Bengali, Category::Travel) => &["Sundarbans"],

            (Region::Japanese, Category::Music) => &["J-Pop"],
            (Region::Japanese, Category::Food) => &["Sushi"],
            (Region::Japanese, Category::Books) => &["Haruki Murakami novels"],
            (Region::Japanese, Category::Travel) => &["Kyoto"],

            (Region::French, Category::Music) => &["Chanson française"],
            (Region::French, Category::Food) => &["Croissant"],
            (Region::French, Category::Books) => &["Victor Hugo novels"],
            (Region::French, Category::Travel) => &["Paris"],

            (Region::Brazilian, Category::Music) => &["Samba"],
            (Region::Brazilian, Category::Food) => &["Feijoada"],
            (Region::Brazilian, Category::Books) => &["Paulo Coelho novels"],
            (Region::Brazilian, Category::Travel) => &["Rio de Janeiro"],

            (Region::Chinese, Category::Music) => &["Mandopop"],
            (Region::Chinese, Category::Food) => &["Peking Duck"],
            (Region::Chinese, Category::Books) => &["Mo Yan novels"],
            (Region::Chinese, Category::Travel) => &["Beijing"],

            (Region::Global, Category::Music) => &["indie"],
            (Region::Global, Category::Food) => &["international cuisine"],
            (Region::Global, Category::Books) => &["contemporary fiction"],
            (Region::Global, Category::Travel) => &["cultural destinations"],
        }
    }
}

/// Prioritized keyword rules mapping profile terms to a region.
///
/// Rules are evaluated in table order and the first match wins, so
/// precedence is explicit here rather than implied by code layout.
pub struct RegionRules {
    rules: Vec<(Regex, Region)>,
}

impl Default for RegionRules {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegionRules {
    /// The built-in rule table.
    pub fn builtin() -> Self {
        let table = [
            (
                r"rabindra|hilsa|humayun|sundarbans|bengali|bangladesh",
                Region::Bengali,
            ),
            (r"j-pop|sushi|murakami|kyoto|japan", Region::Japanese),
            (r"chanson|croissant|hugo|paris|france|french", Region::French),
            (r"samba|feijoada|coelho|rio de janeiro|brazil", Region::Brazilian),
            (r"mandopop|peking|mo yan|beijing|china|chinese", Region::Chinese),
        ];

        Self {
            rules: table
                .into_iter()
                .map(|(pattern, region)| {
                    let regex = Regex::new(pattern)
                        .expect("built-in region pattern must compile");
                    (regex, region)
                })
                .collect(),
        }
    }

    /// Detect the region a profile's terms point at.
    pub fn detect(&self, profile: &TasteProfile) -> Region {
        let haystack = profile
            .all_terms()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        self.detect_in(&haystack)
    }

    /// Detect the region in pre-joined lowercase text.
    pub fn detect_in(&self, haystack: &str) -> Region {
        for (regex, region) in &self.rules {
            if regex.is_match(haystack) {
                return *region;
            }
        }
        Region::Global
    }
}

/// Detect a region from the input's dominant script.
///
/// Checks are ordered most-specific first: kana pins Japanese before
/// the shared CJK ideograph block attributes the text to Chinese.
pub fn detect_script_region(input: &str) -> Option<Region> {
    if input.chars().any(|c| ('\u{0980}'..='\u{09FF}').contains(&c)) {
        return Some(Region::Bengali);
    }
    if input.chars().any(|c| ('\u{3040}'..='\u{30FF}').contains(&c)) {
        return Some(Region::Japanese);
    }
    if input.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c)) {
        return Some(Region::Chinese);
    }
    if input
        .to_lowercase()
        .chars()
        .any(|c| "àâçéèêëîïôùûœ".contains(c))
    {
        return Some(Region::French);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryTaste, TasteSource};
    use std::collections::BTreeMap;

    fn profile(category: Category, terms: &[&str]) -> TasteProfile {
        let mut categories = BTreeMap::new();
        categories.insert(
            category,
            CategoryTaste::new(
                terms.iter().map(|t| t.to_string()).collect(),
                TasteSource::Lexical,
            ),
        );
        TasteProfile::from_parts(categories, TasteSource::Lexical)
    }

    #[test]
    fn test_detects_region_from_terms() {
        let rules = RegionRules::builtin();
        assert_eq!(
            rules.detect(&profile(Category::Food, &["Sushi"])),
            Region::Japanese
        );
        assert_eq!(
            rules.detect(&profile(Category::Music, &["Samba"])),
            Region::Brazilian
        );
        assert_eq!(
            rules.detect(&profile(Category::Music, &["jazz"])),
            Region::Global
        );
    }

    #[test]
    fn test_precedence_is_table_order() {
        // Bengali outranks Japanese when both match.
        let rules = RegionRules::builtin();
        assert_eq!(
            rules.detect_in("hilsa curry and sushi"),
            Region::Bengali
        );
    }

    #[test]
    fn test_script_detection() {
        assert_eq!(detect_script_region("আমি গান ভালোবাসি"), Some(Region::Bengali));
        assert_eq!(detect_script_region("音楽が好き ひらがな"), Some(Region::Japanese));
        assert_eq!(detect_script_region("我喜欢音乐"), Some(Region::Chinese));
        assert_eq!(detect_script_region("j'adore la musique légère"), Some(Region::French));
        assert_eq!(detect_script_region("plain english"), None);
        assert_eq!(detect_script_region(""), None);
    }

    #[test]
    fn test_default_terms_cover_every_region_and_category() {
        let regions = [
            Region::Bengali,
            Region::Japanese,
            Region::French,
            Region::Brazilian,
            Region::Chinese,
            Region::Global,
        ];
        for region in regions {
            for category in Category::ALL {
                assert!(
                    !region.default_terms(category).is_empty(),
                    "missing default terms for {:?}/{}",
                    region,
                    category
                );
            }
        }
    }
}
