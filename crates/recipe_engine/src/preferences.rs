//! Favorites and last-search persistence over a [`KeyValueStore`].
//!
//! Reads and writes never fail: malformed data and write errors degrade to "no effect",
//! logged at warn level. Only [`Preferences::toggle_favorite`] reports a failed write, so the
//! caller can keep its view of favorites unchanged. While storage is unavailable, favorites
//! live in a session-only set shared by all clones.
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError};

use recipe_core::RecipeId;
use recipe_logging::{recipe_debug, recipe_warn};
use tokio::sync::Mutex;

use crate::{KeyValueStore, StorageError};

pub const FAVORITES_KEY: &str = "favorites";
pub const LAST_SEARCH_KEY: &str = "lastSearch";

#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
    // Held across the whole read-modify-write of a toggle.
    toggle_lock: Arc<Mutex<()>>,
    session_favorites: Arc<std::sync::Mutex<BTreeSet<RecipeId>>>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            toggle_lock: Arc::new(Mutex::new(())),
            session_favorites: Arc::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_available()
    }

    /// Empty when the key is absent or the value is not a JSON array. Non-string and blank
    /// entries are dropped. Unavailable storage yields the session-only set.
    pub fn read_favorites(&self) -> BTreeSet<RecipeId> {
        if !self.store.is_available() {
            return self.session_favorites().clone();
        }
        let Some(raw) = self.read(FAVORITES_KEY) else {
            return BTreeSet::new();
        };
        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => values
                .into_iter()
                .filter_map(|value| match value {
                    serde_json::Value::String(id) if !id.trim().is_empty() => Some(id),
                    _ => None,
                })
                .collect(),
            Err(err) => {
                recipe_warn!("Ignoring malformed favorites value: {}", err);
                BTreeSet::new()
            }
        }
    }

    pub fn write_favorites(&self, ids: &BTreeSet<RecipeId>) {
        if let Err(err) = self.store_favorites(ids) {
            recipe_warn!("Failed to persist favorites: {}", err);
        }
    }

    /// Flips membership of `id` and persists the result. Concurrent toggles are serialized,
    /// so none of them is lost. When storage is unavailable only the session-only set flips.
    pub async fn toggle_favorite(&self, id: &str) -> Result<BTreeSet<RecipeId>, StorageError> {
        let _guard = self.toggle_lock.lock().await;
        let mut favorites = self.read_favorites();
        if !favorites.remove(id) {
            favorites.insert(id.to_string());
        }
        self.store_favorites(&favorites)?;
        Ok(favorites)
    }

    pub fn read_last_search(&self) -> String {
        self.read(LAST_SEARCH_KEY).unwrap_or_default()
    }

    pub fn write_last_search(&self, query: &str) {
        if !self.store.is_available() {
            return;
        }
        match self.store.set(LAST_SEARCH_KEY, query) {
            Ok(()) => recipe_debug!("Persisted last search ({} chars)", query.len()),
            Err(err) => recipe_warn!("Failed to persist last search: {}", err),
        }
    }

    fn store_favorites(&self, ids: &BTreeSet<RecipeId>) -> Result<(), StorageError> {
        if !self.store.is_available() {
            recipe_debug!("Storage unavailable; keeping {} favorites for this session", ids.len());
            *self.session_favorites() = ids.clone();
            return Ok(());
        }
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let raw =
            serde_json::to_string(&ids).map_err(|err| StorageError::Serialize(err.to_string()))?;
        self.store.set(FAVORITES_KEY, &raw)
    }

    fn session_favorites(&self) -> std::sync::MutexGuard<'_, BTreeSet<RecipeId>> {
        self.session_favorites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self, key: &str) -> Option<String> {
        if !self.store.is_available() {
            return None;
        }
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                recipe_warn!("Failed to read {}: {}", key, err);
                None
            }
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("available", &self.store.is_available())
            .finish()
    }
}
