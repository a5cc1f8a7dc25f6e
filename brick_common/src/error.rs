//! Error types shared by the brick catalog crates

use thiserror::Error;

/// Unified error type for catalog operations.
///
/// Only conditions that end a run are modelled here. Per-item failures
/// (a set listing that could not be fetched, a part whose weight page is
/// missing) are carried as values by the pipeline instead.
#[derive(Debug, Error)]
pub enum BrickError {
    /// HTTP request failed (connect error, timeout, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read or write JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Report writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The theme listing contained no year markers
    #[error("No catalog years found for theme '{0}'; check the theme token as it appears in the listing URL")]
    UnknownTheme(String),

    /// No inflation multiplier exists for the year
    #[error("No inflation multiplier for year {0}")]
    UnsupportedYear(u16),
}

/// Result alias for catalog operations
pub type BrickResult<T> = std::result::Result<T, BrickError>;
