use crate::http::{Fetch, FetchRequest};
use brick_common::{CatalogYear, Endpoints, ResourceKind};
use std::path::PathBuf;

/// Cookie asking the listing site for all sets of a year on one page
const LISTING_PAGE_COOKIE: &str = "setsPageLength=200";

/// Identifies a cacheable document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKey<'a> {
    /// Sets of `theme` released in `year`
    ThemeYear { theme: &'a str, year: CatalogYear },
    /// Part inventory of a set
    Set(&'a str),
}

impl<'a> DocumentKey<'a> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            DocumentKey::ThemeYear { .. } => ResourceKind::ThemeYearListing,
            DocumentKey::Set(_) => ResourceKind::SetInventory,
        }
    }

    /// Path of the cached body relative to the cache root
    pub fn relative_path(&self) -> PathBuf {
        match self {
            DocumentKey::ThemeYear { theme, year } => PathBuf::from("themes")
                .join(file_component(theme))
                .join(format!("{}.html", year)),
            DocumentKey::Set(set_id) => {
                PathBuf::from("sets").join(format!("{}.html", file_component(set_id)))
            }
        }
    }

    fn url(&self, endpoints: &Endpoints) -> String {
        match self {
            DocumentKey::ThemeYear { theme, year } => endpoints.theme_year_listing(theme, *year),
            DocumentKey::Set(set_id) => endpoints.set_inventory(set_id),
        }
    }

    fn agent(&self) -> &'a str {
        match *self {
            DocumentKey::ThemeYear { theme, .. } => theme,
            DocumentKey::Set(set_id) => set_id,
        }
    }

    fn cookie(&self) -> Option<&'static str> {
        match self {
            DocumentKey::ThemeYear { .. } => Some(LISTING_PAGE_COOKIE),
            DocumentKey::Set(_) => None,
        }
    }
}

impl std::fmt::Display for DocumentKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKey::ThemeYear { theme, year } => write!(f, "{}:{}", theme, year),
            DocumentKey::Set(set_id) => write!(f, "{}", set_id),
        }
    }
}

/// Keys come from scraped text; keep them inside their directory
fn file_component(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

/// Where a document body came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Read from disk, no network access
    Cached,
    /// Fetched with a success status and stored
    Fetched,
    /// Fetch failed; the reason names the status or transport error
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub body: String,
    pub outcome: FetchOutcome,
}

impl Document {
    /// Whether the body should be parsed
    pub fn is_usable(&self) -> bool {
        !matches!(self.outcome, FetchOutcome::Failed(_))
    }
}

/// Raw document bodies stored as files under a root directory.
///
/// Entries are written once and never replaced or expired. To refresh a
/// document, delete its file.
#[derive(Debug, Clone)]
pub struct DocumentCache {
    root: PathBuf,
}

impl DocumentCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path of the cached body for `key`
    pub fn path(&self, key: &DocumentKey<'_>) -> PathBuf {
        self.root.join(key.relative_path())
    }

    pub fn contains(&self, key: &DocumentKey<'_>) -> bool {
        self.path(key).exists()
    }

    /// Read a cached body. Bytes that are not valid UTF-8 are replaced.
    ///
    /// `Ok(None)` means there is no entry for `key`.
    pub fn get(&self, key: &DocumentKey<'_>) -> std::io::Result<Option<String>> {
        match std::fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Store a body. A write failure is logged and otherwise ignored.
    fn insert(&self, key: &DocumentKey<'_>, body: &str) {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create cache directory {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&path, body) {
            log::warn!("Failed to cache {}: {}", path.display(), e);
        } else {
            log::debug!("Cached {} at {}", key, path.display());
        }
    }

    /// Return the cached body for `key`, fetching and storing it on a miss.
    ///
    /// The body is stored whatever the response status, so a resource that
    /// keeps failing is not requested again on later runs.
    pub fn fetch_or_load<F: Fetch>(
        &self,
        fetcher: &F,
        endpoints: &Endpoints,
        key: &DocumentKey<'_>,
    ) -> Document {
        match self.get(key) {
            Ok(Some(body)) => {
                log::debug!("Document cache hit for {} {}", key.kind().label(), key);
                return Document {
                    body,
                    outcome: FetchOutcome::Cached,
                };
            }
            Ok(None) => {}
            Err(e) => {
                // The entry exists; it must not be replaced by a new fetch
                log::warn!(
                    "Failed to read cached {} {} at {}: {}",
                    key.kind().label(),
                    key,
                    self.path(key).display(),
                    e
                );
                return Document {
                    body: String::new(),
                    outcome: FetchOutcome::Failed(format!("unreadable cache entry: {}", e)),
                };
            }
        }

        log::info!("{} {} not cached, fetching", key.kind().label(), key);
        let request = FetchRequest {
            kind: key.kind(),
            url: key.url(endpoints),
            agent: key.agent(),
            cookie: key.cookie(),
        };

        match fetcher.get(&request) {
            Ok(response) => {
                self.insert(key, &response.body);
                let outcome = if response.is_success() {
                    FetchOutcome::Fetched
                } else {
                    log::warn!(
                        "Failed to fetch {} {}, status code: {}",
                        key.kind().label(),
                        key,
                        response.status
                    );
                    FetchOutcome::Failed(format!("status code {}", response.status))
                };
                Document {
                    body: response.body,
                    outcome,
                }
            }
            Err(e) => {
                log::warn!("Failed to fetch {} {}: {}", key.kind().label(), key, e);
                Document {
                    body: String::new(),
                    outcome: FetchOutcome::Failed(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "document_cache_tests.rs"]
mod tests;
