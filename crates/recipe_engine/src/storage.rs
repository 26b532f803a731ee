use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage quota exceeded ({limit} bytes)")]
    QuotaExceeded { limit: usize },
    #[error("serialization error: {0}")]
    Serialize(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// String key-value storage shared by one session. Callers check `is_available` through
/// the adapter rather than assuming the backend exists.
pub trait KeyValueStore: Send + Sync {
    fn is_available(&self) -> bool;

    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    unavailable: bool,
    quota: Option<usize>,
}

/// In-process store. Clones share the same underlying map, so a fresh adapter built over a
/// clone sees everything written earlier in the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that reports itself unavailable, as in a private browsing window.
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    /// Limits the total size of keys plus values; writes beyond it fail.
    pub fn with_quota(limit: usize) -> Self {
        let store = Self::new();
        store.lock().quota = Some(limit);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.lock().unavailable = !available;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn is_available(&self) -> bool {
        !self.lock().unavailable
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.lock();
        if inner.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.unavailable {
            return Err(StorageError::Unavailable);
        }
        if let Some(limit) = inner.quota {
            let others: usize = inner
                .values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > limit {
                return Err(StorageError::QuotaExceeded { limit });
            }
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
