use std::time::Duration;

use rand::Rng;
use recipe_core::{matches_text, sanitize_recipes, Recipe};
use recipe_logging::recipe_trace;

use crate::{FailureKind, FetchError, RecipeSource};

const SAMPLE_RECIPES: &str = include_str!("../data/sample_recipes.json");

/// Inclusive band for the simulated latency of the in-memory source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub min: Duration,
    pub max: Duration,
}

impl Latency {
    pub const fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub const fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(200),
            max: Duration::from_millis(400),
        }
    }
}

/// Serves a fixed catalog from memory, with the same async shape as the remote service.
#[derive(Debug, Clone)]
pub struct LocalSource {
    recipes: Vec<Recipe>,
    latency: Latency,
}

impl LocalSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: sanitize_recipes(recipes),
            latency: Latency::default(),
        }
    }

    /// The bundled demo catalog.
    pub fn sample() -> Result<Self, FetchError> {
        let recipes: Vec<Recipe> = serde_json::from_str(SAMPLE_RECIPES)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        Ok(Self::new(recipes))
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        let delay = self.latency.sample();
        recipe_trace!("Simulated latency {:?}", delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait::async_trait]
impl RecipeSource for LocalSource {
    async fn list_all(&self) -> Result<Vec<Recipe>, FetchError> {
        self.simulate_latency().await;
        Ok(self.recipes.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, FetchError> {
        self.simulate_latency().await;
        if id.is_empty() {
            return Ok(None);
        }
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, FetchError> {
        self.simulate_latency().await;
        Ok(self
            .recipes
            .iter()
            .filter(|r| matches_text(r, query))
            .cloned()
            .collect())
    }
}
