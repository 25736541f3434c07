//! Production implementations of the pipeline's external traits.

pub mod gemini;
pub mod qloo;

pub use gemini::GeminiTasteModel;
pub use qloo::QlooGraph;
