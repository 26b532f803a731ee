//! Recipe engine: data sources, persistence and the session store that executes effects.
mod debounce;
mod fetch;
mod local;
mod navigator;
mod persist;
mod preferences;
mod source;
mod storage;
mod store;
mod types;

pub use debounce::Debouncer;
pub use fetch::{FetchSettings, HttpSource};
pub use local::{Latency, LocalSource};
pub use navigator::{Navigator, UrlHistory};
pub use persist::{ensure_state_dir, FileStore, STATE_FILENAME};
pub use preferences::{Preferences, FAVORITES_KEY, LAST_SEARCH_KEY};
pub use source::{
    build_source, RecipeSource, SourceConfig, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT,
};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use store::{RecipeStore, StoreBuilder, DEFAULT_SEARCH_DEBOUNCE};
pub use types::{ErrorPayload, FailureKind, FetchError};
