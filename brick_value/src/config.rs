//! Run configuration

use brick_common::Endpoints;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one analysis run
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme token as it appears in the listing URL (e.g. "alpha-team")
    pub theme: String,
    /// Root of the document and weight caches
    pub cache_dir: PathBuf,
    /// CSV report path; the summary is written next to it
    pub output: PathBuf,
    pub endpoints: Endpoints,
    /// Upper bound for a single request
    pub timeout: Duration,
    /// Look up parts whose cached weight lookup failed again
    pub retry_failed: bool,
}

impl Config {
    pub fn new(theme: &str) -> Self {
        Self {
            theme: theme.to_string(),
            cache_dir: default_cache_dir(),
            output: default_output(theme),
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_failed: false,
        }
    }

    /// `<cache_dir>/parts/parts.json`
    pub fn weight_cache_path(&self) -> PathBuf {
        self.cache_dir.join("parts").join("parts.json")
    }
}

/// Returns the default cache root: ~/.cache/brick_value
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brick_value")
}

/// `<theme>_sets.csv` in the working directory
pub fn default_output(theme: &str) -> PathBuf {
    PathBuf::from(format!("{}_sets.csv", theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("alpha-team");
        assert_eq!(config.theme, "alpha-team");
        assert_eq!(config.output, PathBuf::from("alpha-team_sets.csv"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.retry_failed);
        assert!(config.cache_dir.ends_with("brick_value"));
    }

    #[test]
    fn test_weight_cache_path() {
        let mut config = Config::new("alpha-team");
        config.cache_dir = PathBuf::from("/tmp/bv");
        assert_eq!(
            config.weight_cache_path(),
            PathBuf::from("/tmp/bv/parts/parts.json")
        );
    }
}
