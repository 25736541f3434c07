//! Core data types for the taste pipeline.

pub mod category;
pub mod recommendation;
pub mod signals;
pub mod taste;

pub use category::Category;
pub use recommendation::{
    CategoryProvenance, CategoryRecommendations, Provenance, Recommendation, TasteResponse,
};
pub use signals::SignalSet;
pub use taste::{CategoryTaste, TasteProfile, TasteSource};
