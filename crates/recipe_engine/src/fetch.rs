use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use recipe_core::{sanitize_recipes, Recipe};
use recipe_logging::{recipe_debug, recipe_warn};
use serde::de::DeserializeOwned;

use crate::source::DEFAULT_REQUEST_TIMEOUT;
use crate::{ErrorPayload, FailureKind, FetchError, RecipeSource};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Hard limit for a whole request; the call fails with a timeout once it elapses.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Talks to the recipe REST service:
/// `GET /recipes`, `GET /recipes/{id}` and `GET /recipes/search?q=`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: Url,
    settings: FetchSettings,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, settings: FetchSettings) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            base_url,
            settings,
            client,
        })
    }

    /// Appends path segments to the base url; segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let body = self.get_bytes(url).await?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        recipe_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let payload = read_error_payload(response).await;
            recipe_warn!("GET {} failed with {}", url, status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("HTTP {}", status.as_u16()),
            )
            .with_payload(payload));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl RecipeSource for HttpSource {
    async fn list_all(&self) -> Result<Vec<Recipe>, FetchError> {
        let url = self.endpoint(&["recipes"])?;
        let recipes: Vec<Recipe> = self.get_json(url).await?;
        Ok(sanitize_recipes(recipes))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, FetchError> {
        if id.is_empty() {
            return Ok(None);
        }
        let url = self.endpoint(&["recipes", id])?;
        match self.get_json::<Recipe>(url).await {
            Ok(recipe) => Ok(Some(recipe)),
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND.as_u16()) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, FetchError> {
        let mut url = self.endpoint(&["recipes", "search"])?;
        let query = query.trim();
        if !query.is_empty() {
            url.query_pairs_mut().append_pair("q", query);
        }
        let recipes: Vec<Recipe> = self.get_json(url).await?;
        Ok(sanitize_recipes(recipes))
    }
}

async fn read_error_payload(response: reqwest::Response) -> Option<ErrorPayload> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let body = response.bytes().await.ok()?;
    if body.is_empty() {
        return None;
    }
    if is_json {
        if let Ok(value) = serde_json::from_slice(&body) {
            return Some(ErrorPayload::Json(value));
        }
    }
    Some(ErrorPayload::Text(String::from_utf8_lossy(&body).into_owned()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
