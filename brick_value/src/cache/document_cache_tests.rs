//! Tests for the raw document cache

use super::{DocumentCache, DocumentKey, FetchOutcome};
use crate::test_support::StubFetcher;
use brick_common::Endpoints;
use tempfile::TempDir;

const LISTING_URL: &str = "https://brickset.com/sets/theme-alpha-team/year-2001";
const SET_URL: &str = "https://www.bricklink.com/CatalogItemInv.asp?S=6775-1";

fn create_test_cache() -> (DocumentCache, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    (DocumentCache::new(temp_dir.path()), temp_dir)
}

#[test]
fn test_relative_paths() {
    let listing = DocumentKey::ThemeYear {
        theme: "alpha-team",
        year: 2001,
    };
    assert_eq!(
        listing.relative_path(),
        std::path::Path::new("themes").join("alpha-team").join("2001.html")
    );
    assert_eq!(
        DocumentKey::Set("6775").relative_path(),
        std::path::Path::new("sets").join("6775.html")
    );
}

#[test]
fn test_separators_in_keys_stay_in_directory() {
    assert_eq!(
        DocumentKey::Set("../x").relative_path(),
        std::path::Path::new("sets").join(".._x.html")
    );
}

#[test]
fn test_miss_fetches_and_stores() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StubFetcher::new().with(SET_URL, 200, "<table>inventory</table>");
    let key = DocumentKey::Set("6775");

    let doc = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);

    assert_eq!(doc.outcome, FetchOutcome::Fetched);
    assert!(doc.is_usable());
    assert_eq!(doc.body, "<table>inventory</table>");
    assert_eq!(fetcher.calls(), vec![SET_URL.to_string()]);
    assert_eq!(
        std::fs::read_to_string(cache.path(&key)).unwrap(),
        "<table>inventory</table>"
    );
}

#[test]
fn test_hit_skips_network() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StubFetcher::new().with(LISTING_URL, 200, "listing");
    let key = DocumentKey::ThemeYear {
        theme: "alpha-team",
        year: 2001,
    };

    cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);
    let second = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);

    assert_eq!(second.outcome, FetchOutcome::Cached);
    assert_eq!(second.body, "listing");
    assert_eq!(fetcher.call_count(), 1);
}

#[test]
fn test_existing_entry_is_never_overwritten() {
    let (cache, _dir) = create_test_cache();
    let key = DocumentKey::Set("6775");
    let path = cache.path(&key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "old body").unwrap();

    let fetcher = StubFetcher::new().with(SET_URL, 200, "new body");
    let doc = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);

    assert_eq!(doc.body, "old body");
    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "old body");
}

#[test]
fn test_failed_status_is_stored_and_not_refetched() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StubFetcher::new().with(SET_URL, 500, "server error");
    let key = DocumentKey::Set("6775");

    let first = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);
    assert_eq!(
        first.outcome,
        FetchOutcome::Failed("status code 500".to_string())
    );
    assert!(!first.is_usable());
    assert!(cache.contains(&key));

    let second = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);
    assert_eq!(second.outcome, FetchOutcome::Cached);
    assert_eq!(second.body, "server error");
    assert_eq!(fetcher.call_count(), 1);
}

#[test]
fn test_transport_failure_leaves_no_entry() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StubFetcher::new().unreachable(SET_URL);
    let key = DocumentKey::Set("6775");

    let doc = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);

    assert!(matches!(doc.outcome, FetchOutcome::Failed(_)));
    assert!(doc.body.is_empty());
    assert!(!cache.contains(&key));
}

#[test]
fn test_invalid_utf8_entry_is_served_not_refetched() {
    let (cache, _dir) = create_test_cache();
    let key = DocumentKey::Set("6775");
    let path = cache.path(&key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, [0xff, 0xfe, b'o', b'l', b'd']).unwrap();

    let fetcher = StubFetcher::new().with(SET_URL, 200, "new body");
    let doc = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);

    assert_eq!(doc.outcome, FetchOutcome::Cached);
    assert!(doc.body.ends_with("old"));
    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(
        std::fs::read(&path).unwrap(),
        vec![0xff, 0xfe, b'o', b'l', b'd']
    );
}

#[test]
fn test_unreadable_entry_fails_without_fetching() {
    let (cache, _dir) = create_test_cache();
    let key = DocumentKey::Set("6775");
    // A directory where the body should be cannot be read as a file
    std::fs::create_dir_all(cache.path(&key)).unwrap();

    let fetcher = StubFetcher::new().with(SET_URL, 200, "new body");
    let doc = cache.fetch_or_load(&fetcher, &Endpoints::default(), &key);

    assert!(matches!(doc.outcome, FetchOutcome::Failed(_)));
    assert!(!doc.is_usable());
    assert_eq!(fetcher.call_count(), 0);
    assert!(cache.path(&key).is_dir());
}
