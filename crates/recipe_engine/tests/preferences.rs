use std::collections::BTreeSet;
use std::sync::Arc;

use recipe_engine::{
    KeyValueStore, MemoryStore, Preferences, StorageError, FAVORITES_KEY, LAST_SEARCH_KEY,
};

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn preferences(store: &MemoryStore) -> Preferences {
    Preferences::new(Arc::new(store.clone()))
}

#[test]
fn favorites_round_trip_across_instances() {
    let store = MemoryStore::new();
    preferences(&store).write_favorites(&set(&["b", "a"]));

    // A fresh adapter over the same storage, as after a reload.
    assert_eq!(preferences(&store).read_favorites(), set(&["a", "b"]));
    assert_eq!(store.get(FAVORITES_KEY).unwrap(), Some(r#"["a","b"]"#.to_string()));
}

#[test]
fn malformed_favorites_read_as_empty() {
    let store = MemoryStore::new();
    let prefs = preferences(&store);

    store.set(FAVORITES_KEY, "not json").unwrap();
    assert!(prefs.read_favorites().is_empty());

    store.set(FAVORITES_KEY, r#"{"a": true}"#).unwrap();
    assert!(prefs.read_favorites().is_empty());

    store.set(FAVORITES_KEY, r#"["a", 3, null, "", "b", "a"]"#).unwrap();
    assert_eq!(prefs.read_favorites(), set(&["a", "b"]));
}

#[test]
fn unavailable_storage_degrades_silently() {
    let store = MemoryStore::unavailable();
    let prefs = preferences(&store);

    prefs.write_favorites(&set(&["a"]));
    prefs.write_last_search("ramen");
    assert!(!prefs.is_available());
    assert_eq!(prefs.read_favorites(), set(&["a"]));
    assert_eq!(prefs.read_last_search(), "");

    // Nothing reached the backing store.
    store.set_available(true);
    assert!(prefs.read_favorites().is_empty());
    assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
}

#[test]
fn last_search_round_trip() {
    let store = MemoryStore::new();
    let prefs = preferences(&store);
    assert_eq!(prefs.read_last_search(), "");

    prefs.write_last_search("  miso ");
    assert_eq!(store.get(LAST_SEARCH_KEY).unwrap(), Some("  miso ".to_string()));
    assert_eq!(preferences(&store).read_last_search(), "  miso ");
}

#[tokio::test]
async fn toggle_pair_restores_original_set() {
    let store = MemoryStore::new();
    let prefs = preferences(&store);
    prefs.write_favorites(&set(&["a"]));

    let added = prefs.toggle_favorite("b").await.unwrap();
    assert_eq!(added, set(&["a", "b"]));
    let removed = prefs.toggle_favorite("b").await.unwrap();
    assert_eq!(removed, set(&["a"]));
    assert_eq!(prefs.read_favorites(), set(&["a"]));
}

#[tokio::test]
async fn concurrent_toggles_lose_no_update() {
    let store = MemoryStore::new();
    let prefs = preferences(&store);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let prefs = prefs.clone();
            tokio::spawn(async move { prefs.toggle_favorite(&format!("recipe-{i}")).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(prefs.read_favorites().len(), 16);
}

#[tokio::test]
async fn toggle_reports_failed_write() {
    let store = MemoryStore::with_quota(16);
    let prefs = preferences(&store);

    let err = prefs
        .toggle_favorite("a-very-long-recipe-identifier")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { limit: 16 }));
    assert!(prefs.read_favorites().is_empty());
}

#[tokio::test]
async fn toggles_without_storage_flip_a_session_set() {
    let store = MemoryStore::unavailable();
    let prefs = preferences(&store);

    assert_eq!(prefs.toggle_favorite("a").await.unwrap(), set(&["a"]));
    assert_eq!(prefs.toggle_favorite("b").await.unwrap(), set(&["a", "b"]));
    assert_eq!(prefs.clone().toggle_favorite("a").await.unwrap(), set(&["b"]));
    assert_eq!(prefs.toggle_favorite("b").await.unwrap(), set(&[]));
    assert!(prefs.read_favorites().is_empty());

    store.set_available(true);
    assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
}
