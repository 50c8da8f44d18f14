//! HTTP client for the Pixabay image API.

use async_trait::async_trait;
use reqwest::{Client, Request};
use tracing::{debug, warn};

use super::types::{SearchPage, SearchQuery};
use super::ImageSearch;
use crate::config::Config;
use crate::error::SearchError;

/// Default Pixabay endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Talks to the Pixabay search endpoint.
#[derive(Debug, Clone)]
pub struct PixabayClient {
    client: Client,
    base_url: String,
    api_key: String,
    image_type: String,
    orientation: String,
    safesearch: bool,
}

impl PixabayClient {
    /// Creates a client for `base_url` using `api_key`, searching horizontal
    /// photos with safe search on.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safesearch: true,
        }
    }

    /// Creates a client from the runtime configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            image_type: config.image_type.clone(),
            orientation: config.orientation.clone(),
            safesearch: config.safesearch,
            ..Self::new(config.base_url.clone(), config.api_key.clone())
        }
    }

    /// Builds the GET request for `query` without sending it.
    pub fn request(&self, query: &SearchQuery) -> Result<Request, SearchError> {
        let page = query.page.to_string();
        let per_page = query.per_page.to_string();
        let safesearch = self.safesearch.to_string();

        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.text()),
                ("image_type", self.image_type.as_str()),
                ("orientation", self.orientation.as_str()),
                ("safesearch", safesearch.as_str()),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl ImageSearch for PixabayClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
        let request = self.request(query)?;
        debug!(q = query.text(), page = query.page, "searching images");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "image API request failed");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
