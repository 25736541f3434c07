//! Core trait abstractions.
//!
//! The pipeline talks to its two external collaborators through these
//! traits so tests can inject deterministic mocks (see
//! [`crate::testing`]) and production wires in the real clients (see
//! [`crate::backends`]).

pub mod graph;
pub mod model;

pub use graph::{GraphItem, GraphQuery, KnowledgeGraph};
pub use model::TasteModel;
