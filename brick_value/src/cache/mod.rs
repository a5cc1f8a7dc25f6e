//! Persistent caches for fetched documents and resolved part weights

pub mod document_cache;
pub mod weight_cache;

pub use document_cache::{Document, DocumentCache, DocumentKey, FetchOutcome};
pub use weight_cache::{JsonWeightStore, WeightState, WeightStore};
