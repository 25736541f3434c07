//! The synthetic fallback catalog.
//!
//! A read-only, per-category table of recommendations covering every
//! supported region, built once at startup and shared across requests.
//! Selection is fully deterministic: textual overlap with the request's
//! term first, then the detected region's flagship entry, then a pick
//! seeded from the request hash.

use std::collections::BTreeMap;

use crate::region::Region;
use crate::types::{Category, Provenance, Recommendation};

/// One catalog entry.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub region: Region,
    pub fun_fact: &'static str,
    pub base_score: u8,
}

impl CatalogEntry {
    /// Materialize this entry as a synthetic recommendation.
    pub fn to_recommendation(&self, category: Category) -> Recommendation {
        Recommendation {
            id: format!("synthetic:{}:{}", category, slug(self.name)),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category,
            match_score: self.base_score,
            provenance: Provenance::Synthetic,
            fun_fact: Some(self.fun_fact.to_string()),
        }
    }
}

/// Stable identifier fragment from an entry name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

/// The static per-category, per-region recommendation tables.
pub struct SyntheticCatalog {
    entries: BTreeMap<Category, Vec<CatalogEntry>>,
}

impl Default for SyntheticCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

macro_rules! entry {
    ($name:expr, $desc:expr, $region:expr, $fact:expr, $score:expr) => {
        CatalogEntry {
            name: $name,
            description: $desc,
            region: $region,
            fun_fact: $fact,
            base_score: $score,
        }
    };
}

impl SyntheticCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        use Region::*;

        let music = vec![
            entry!("J-Pop", "Popular music from Japan", Japanese, "J-Pop is known for its catchy melodies and vibrant performances.", 95),
            entry!("K-Pop", "Korean pop music sensation", Global, "K-Pop has a massive global fanbase.", 94),
            entry!("Mandopop", "Mandarin-language pop music from China", Chinese, "Mandopop is popular across East Asia.", 93),
            entry!("Rabindra Sangeet", "Classic Bengali songs by Rabindranath Tagore", Bengali, "Rabindra Sangeet is an integral part of Bengali culture.", 99),
            entry!("Chanson française", "French lyrical song tradition", French, "Chanson is a staple of French culture.", 92),
            entry!("Classical", "Timeless orchestral music from Europe", Global, "Vienna is known as the city of classical music.", 91),
            entry!("Samba", "Lively Brazilian music and dance style", Brazilian, "Samba is a symbol of Brazilian national identity.", 88),
            entry!("Jazz", "American-born genre with global influence", Global, "Jazz originated in New Orleans.", 97),
            entry!("Reggaeton", "Popular Latin music genre from Puerto Rico", Global, "Reggaeton blends Latin rhythms with hip-hop.", 89),
            entry!("Afrobeat", "A fusion of West African musical styles with jazz and funk", Global, "Afrobeat was pioneered by Nigerian legend Fela Kuti.", 90),
            entry!("Highlife", "Ghanaian music blending African and Western styles", Global, "Highlife is popular in West Africa.", 87),
            entry!("Didgeridoo", "Traditional Aboriginal Australian music", Global, "The didgeridoo is one of the world's oldest instruments.", 85),
        ];

        let food = vec![
            entry!("Sushi", "Iconic Japanese dish of vinegared rice and seafood", Japanese, "Sushi is enjoyed worldwide and comes in many varieties.", 95),
            entry!("Kimchi", "Spicy fermented cabbage from Korea", Global, "Kimchi is a staple in Korean cuisine.", 94),
            entry!("Peking Duck", "Famous Chinese roasted duck dish", Chinese, "Peking Duck is a delicacy from Beijing.", 93),
            entry!("Hilsa Fish", "A beloved delicacy in Bengali cuisine", Bengali, "Hilsa is the national fish of Bangladesh.", 99),
            entry!("Croissant", "Buttery French pastry", French, "Croissants are a breakfast staple in France.", 92),
            entry!("Paella", "Spanish rice dish with seafood and saffron", Global, "Paella originated in Valencia, Spain.", 90),
            entry!("Pasta Carbonara", "Classic Italian pasta with eggs, cheese, and pancetta", Global, "Carbonara is a staple of Roman cuisine.", 88),
            entry!("Feijoada", "Hearty Brazilian stew of beans and pork", Brazilian, "Feijoada is often considered the national dish of Brazil.", 92),
            entry!("Tacos", "Mexican street food favorite", Global, "Tacos are a symbol of Mexican cuisine.", 91),
            entry!("Jollof Rice", "West African rice dish with tomatoes and spices", Global, "Jollof rice is a party favorite in Nigeria and Ghana.", 89),
            entry!("Bunny Chow", "South African curry in a hollowed-out loaf of bread", Global, "Bunny chow originated in Durban.", 87),
            entry!("Pavlova", "Meringue-based dessert from Australia and New Zealand", Global, "Pavlova is named after a Russian ballerina.", 85),
        ];

        let books = vec![
            entry!("Haruki Murakami novels", "Surreal and magical realist works from Japan", Japanese, "Murakami's books are translated into over 50 languages.", 95),
            entry!("Mo Yan novels", "Works by the Chinese Nobel laureate", Chinese, "Mo Yan won the Nobel Prize in Literature in 2012.", 94),
            entry!("Humayun Ahmed novels", "Works by the celebrated Bangladeshi author", Bengali, "Humayun Ahmed is one of the most popular writers in Bengali literature.", 99),
            entry!("Victor Hugo novels", "French classics like Les Misérables", French, "Victor Hugo is a giant of French literature.", 93),
            entry!("Jane Austen novels", "Timeless English classics", Global, "Jane Austen's works are beloved for their wit and social commentary.", 88),
            entry!("Gabriel García Márquez novels", "Magical realism from Colombia", Global, "García Márquez won the Nobel Prize in Literature in 1982.", 92),
            entry!("Chinua Achebe novels", "Influential Nigerian literature", Global, "Achebe's 'Things Fall Apart' is a classic of African literature.", 90),
            entry!("Paulo Coelho novels", "Brazilian author of The Alchemist", Brazilian, "Coelho's books have sold over 225 million copies.", 89),
            entry!("Mark Twain novels", "American classics like Tom Sawyer", Global, "Mark Twain is called the father of American literature.", 91),
        ];

        let travel = vec![
            entry!("Kyoto", "Historic city in Japan known for its temples and cherry blossoms", Japanese, "Kyoto was the capital of Japan for over a thousand years.", 95),
            entry!("Beijing", "China's capital, home to the Great Wall and Forbidden City", Chinese, "Beijing is one of the world's oldest cities.", 94),
            entry!("Sundarbans", "The world's largest mangrove forest, shared by Bangladesh and India", Bengali, "The Sundarbans is home to the famous Royal Bengal Tiger.", 99),
            entry!("Paris", "The romantic capital of France", French, "Paris is known as the City of Light.", 93),
            entry!("Barcelona", "Spanish city known for art, architecture, and cuisine", Global, "Barcelona is home to the famous Sagrada Família basilica.", 90),
            entry!("Rio de Janeiro", "Vibrant Brazilian city famous for Carnival and beaches", Brazilian, "Rio's Christ the Redeemer statue is one of the New Seven Wonders of the World.", 92),
            entry!("New York City", "The city that never sleeps in the USA", Global, "NYC is home to over 800 languages.", 91),
            entry!("Cairo", "Egypt's capital, gateway to the pyramids", Global, "Cairo is the largest city in the Arab world.", 88),
            entry!("Cape Town", "South Africa's coastal gem", Global, "Cape Town is famous for Table Mountain.", 87),
            entry!("Sydney", "Australia's iconic harbor city", Global, "Sydney Opera House is a UNESCO World Heritage Site.", 86),
        ];

        let mut entries = BTreeMap::new();
        entries.insert(Category::Music, music);
        entries.insert(Category::Food, food);
        entries.insert(Category::Books, books);
        entries.insert(Category::Travel, travel);
        Self { entries }
    }

    /// All entries for a category.
    pub fn entries(&self, category: Category) -> &[CatalogEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Pick the substitute entry for a category.
    ///
    /// Order: textual overlap with the request's term, then the
    /// detected region's flagship entry, then a deterministic pick from
    /// the request seed. The built-in tables are non-empty for every
    /// category, so a pick always exists.
    pub fn pick(
        &self,
        category: Category,
        term: Option<&str>,
        region: Region,
        seed: u64,
    ) -> Option<&CatalogEntry> {
        let entries = self.entries(category);
        if entries.is_empty() {
            return None;
        }

        if let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            if let Some(hit) = entries.iter().find(|e| {
                let name = e.name.to_lowercase();
                name.contains(&term)
                    || term.contains(&name)
                    || e.description.to_lowercase().contains(&term)
            }) {
                return Some(hit);
            }
        }

        if region != Region::Global {
            if let Some(hit) = entries.iter().find(|e| e.region == region) {
                return Some(hit);
            }
        }

        let salt = category
            .as_str()
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let index = ((seed ^ salt) % entries.len() as u64) as usize;
        Some(&entries[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_entries() {
        let catalog = SyntheticCatalog::builtin();
        for category in Category::ALL {
            assert!(!catalog.entries(category).is_empty());
        }
    }

    #[test]
    fn test_every_region_has_a_flagship_entry_per_category() {
        let catalog = SyntheticCatalog::builtin();
        let regions = [
            Region::Bengali,
            Region::Japanese,
            Region::French,
            Region::Brazilian,
            Region::Chinese,
        ];
        for category in Category::ALL {
            for region in regions {
                assert!(
                    catalog
                        .entries(category)
                        .iter()
                        .any(|e| e.region == region),
                    "no {:?} entry for {}",
                    region,
                    category
                );
            }
        }
    }

    #[test]
    fn test_pick_prefers_textual_overlap() {
        let catalog = SyntheticCatalog::builtin();
        let entry = catalog
            .pick(Category::Music, Some("jazz"), Region::Japanese, 42)
            .unwrap();
        assert_eq!(entry.name, "Jazz");
    }

    #[test]
    fn test_pick_falls_back_to_region_flagship() {
        let catalog = SyntheticCatalog::builtin();
        let entry = catalog
            .pick(Category::Food, Some("xyzzy"), Region::Bengali, 42)
            .unwrap();
        assert_eq!(entry.name, "Hilsa Fish");
    }

    #[test]
    fn test_pick_is_seed_deterministic() {
        let catalog = SyntheticCatalog::builtin();
        let a = catalog.pick(Category::Travel, None, Region::Global, 7).unwrap();
        let b = catalog.pick(Category::Travel, None, Region::Global, 7).unwrap();
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn test_recommendation_id_is_stable_slug() {
        let catalog = SyntheticCatalog::builtin();
        let entry = catalog
            .pick(Category::Travel, Some("Rio de Janeiro"), Region::Global, 0)
            .unwrap();
        let item = entry.to_recommendation(Category::Travel);
        assert_eq!(item.id, "synthetic:travel:rio-de-janeiro");
        assert_eq!(item.match_score, 92);
        assert!(item.fun_fact.is_some());
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(slug("Chanson française"), "chanson-française");
        assert_eq!(slug("J.K. Rowling"), "j-k-rowling");
        assert_eq!(slug("New York City"), "new-york-city");
    }
}
