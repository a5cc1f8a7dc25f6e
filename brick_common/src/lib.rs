//! Shared types for the brick catalog pipeline.
//!
//! Holds the record types handed between pipeline stages, the service
//! endpoint layout and the error type used across the workspace.

pub mod endpoints;
pub mod error;
pub mod models;

pub use endpoints::{Endpoints, ResourceKind};
pub use error::{BrickError, BrickResult};
pub use models::{round_to, CatalogYear, ListedSet, SetRecord};
