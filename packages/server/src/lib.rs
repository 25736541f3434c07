// Taste Resolution API
//
// This crate provides the HTTP surface over the taste resolution
// pipeline: one resolve endpoint plus a health check. All recommendation
// logic lives in the taste-pipeline package; this layer only validates
// input, wires configuration, and shapes HTTP responses.

pub mod config;
pub mod server;

pub use config::*;
