use std::sync::Arc;
use std::time::Duration;

use recipe_core::Recipe;
use recipe_logging::recipe_info;

use crate::fetch::{FetchSettings, HttpSource};
use crate::local::{Latency, LocalSource};
use crate::FetchError;

/// Where recipes come from. Every call is asynchronous and may fail, whatever the backing.
#[async_trait::async_trait]
pub trait RecipeSource: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Recipe>, FetchError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, FetchError>;

    /// Substring search over title, description and ingredients; an empty query returns the
    /// whole catalog.
    async fn search(&self, query: &str) -> Result<Vec<Recipe>, FetchError>;
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(8_000);

#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Serve the bundled dataset instead of calling the remote service.
    pub use_mock: bool,
    pub api_base_url: String,
    pub fetch: FetchSettings,
    /// Artificial delay applied to every call in mock mode.
    pub mock_latency: Latency,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            use_mock: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fetch: FetchSettings::default(),
            mock_latency: Latency::default(),
        }
    }
}

pub fn build_source(config: &SourceConfig) -> Result<Arc<dyn RecipeSource>, FetchError> {
    if config.use_mock {
        recipe_info!(
            "Using bundled recipe dataset (latency {:?}..={:?})",
            config.mock_latency.min,
            config.mock_latency.max
        );
        let source = LocalSource::sample()?.with_latency(config.mock_latency);
        Ok(Arc::new(source))
    } else {
        recipe_info!(
            "Using remote recipe service at {} (timeout {:?})",
            config.api_base_url,
            config.fetch.request_timeout
        );
        let source = HttpSource::new(&config.api_base_url, config.fetch.clone())?;
        Ok(Arc::new(source))
    }
}
