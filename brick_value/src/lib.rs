//! Brick Value - price per gram and per piece of a theme's sets
//!
//! Discovers the years a theme was sold in, reads each year's set listing
//! and every set's part inventory, resolves part weights through a
//! persistent cache and writes the normalised results as CSV.

pub mod aggregate;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod discovery;
pub mod http;
pub mod inventory;
pub mod listing;
pub mod pipeline;
pub mod pricing;
pub mod report;
pub mod weight;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items
pub use aggregate::{aggregate_set, set_weight};
pub use cache::{
    Document, DocumentCache, DocumentKey, FetchOutcome, JsonWeightStore, WeightState, WeightStore,
};
pub use classifier::{classify, PartClass};
pub use config::Config;
pub use discovery::discover_years;
pub use http::{Fetch, FetchRequest, FetchResponse, HttpClient};
pub use inventory::{
    extract_inventory, fetch_inventory, HtmlInventory, Inventory, InventoryQuery, InventoryStatus,
    PartEntry,
};
pub use listing::{fetch_listing, parse_listing};
pub use pipeline::{analyse_theme, Pipeline};
pub use pricing::InflationTable;
pub use report::write_report;
pub use weight::WeightResolver;
