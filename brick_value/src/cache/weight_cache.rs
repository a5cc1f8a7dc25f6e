use brick_common::BrickResult;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Cached result of resolving one part's weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightState {
    /// Weight in grams read from the part's detail page
    Resolved(f64),
    /// The detail page could not be fetched or had no weight
    Failed,
}

impl WeightState {
    /// Grams contributed per unit; a failed lookup counts as zero
    pub fn grams(&self) -> f64 {
        match self {
            WeightState::Resolved(grams) => *grams,
            WeightState::Failed => 0.0,
        }
    }

    fn from_stored(value: Option<f64>) -> Self {
        match value {
            Some(grams) => WeightState::Resolved(grams),
            None => WeightState::Failed,
        }
    }

    fn to_stored(self) -> Option<f64> {
        match self {
            WeightState::Resolved(grams) => Some(grams),
            WeightState::Failed => None,
        }
    }
}

/// Persistent part id -> weight mapping.
///
/// Opened once at the start of a run and flushed once at the end. Both
/// resolved and failed entries are hits: a part is looked up on the network
/// at most once for as long as its entry exists.
pub trait WeightStore {
    fn get(&self, part_id: &str) -> Option<WeightState>;

    fn insert(&mut self, part_id: &str, state: WeightState);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write all entries to durable storage
    fn flush(&self) -> BrickResult<()>;
}

/// Weight store kept in memory and saved as a JSON object.
///
/// Failed lookups are stored as `null`. Files written by earlier versions,
/// which recorded failures as `0.0`, load as resolved zero weights.
#[derive(Debug)]
pub struct JsonWeightStore {
    path: PathBuf,
    weights: BTreeMap<String, Option<f64>>,
}

impl JsonWeightStore {
    /// Load the store at `path`, or start empty if it is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let weights = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(weights) => weights,
                    Err(e) => {
                        log::warn!("Failed to parse weight cache, starting fresh: {}", e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read weight cache, starting fresh: {}", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        log::info!(
            "Loaded weight cache with {} entries from {}",
            weights.len(),
            path.display()
        );
        Self { path, weights }
    }

    /// Number of entries recorded as failed lookups
    pub fn failed_count(&self) -> usize {
        self.weights.values().filter(|w| w.is_none()).count()
    }
}

impl WeightStore for JsonWeightStore {
    fn get(&self, part_id: &str) -> Option<WeightState> {
        self.weights
            .get(part_id)
            .map(|stored| WeightState::from_stored(*stored))
    }

    fn insert(&mut self, part_id: &str, state: WeightState) {
        self.weights.insert(part_id.to_string(), state.to_stored());
    }

    fn len(&self) -> usize {
        self.weights.len()
    }

    fn flush(&self) -> BrickResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.weights)?;
        std::fs::write(&self.path, content)?;

        log::debug!(
            "Saved weight cache with {} entries to {}",
            self.weights.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_path(dir: &TempDir) -> PathBuf {
        dir.path().join("parts").join("parts.json")
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonWeightStore::open(store_path(&dir));
        assert!(store.is_empty());
        assert_eq!(store.get("3001"), None);
    }

    #[test]
    fn test_flush_and_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonWeightStore::open(store_path(&dir));
        store.insert("3001", WeightState::Resolved(2.3));
        store.insert("bad99", WeightState::Failed);
        store.flush().unwrap();

        let reopened = JsonWeightStore::open(store_path(&dir));
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get("3001"), Some(WeightState::Resolved(2.3)));
        assert_eq!(reopened.get("bad99"), Some(WeightState::Failed));
        assert_eq!(reopened.failed_count(), 1);
    }

    #[test]
    fn test_failed_entries_are_null_on_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonWeightStore::open(store_path(&dir));
        store.insert("bad99", WeightState::Failed);
        store.flush().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store_path(&dir)).unwrap()).unwrap();
        assert!(raw["bad99"].is_null());
    }

    #[test]
    fn test_legacy_zero_loads_as_resolved() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"3001": 2.3, "x1": 0.0}"#).unwrap();

        let store = JsonWeightStore::open(&path);
        assert_eq!(store.get("x1"), Some(WeightState::Resolved(0.0)));
        assert_eq!(store.get("3001").map(|w| w.grams()), Some(2.3));
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = JsonWeightStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_state_weighs_nothing() {
        assert_eq!(WeightState::Failed.grams(), 0.0);
        assert_eq!(WeightState::Resolved(1.1).grams(), 1.1);
    }
}
