//! Serper (google.serper.dev) client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::credentials::ApiKey;
use crate::error::{Result, SearchError};
use crate::types::{PageRequest, SearchItem, SearchPage};
use crate::SearchProvider;

const BASE_URL: &str = "https://google.serper.dev/search";

/// Serper accepts `num` up to 100.
const PAGE_SIZE: usize = 100;

const MAX_RESULTS: usize = 100;

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
    page: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    link: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

/// Serper search client (bearer-style `X-API-KEY`, no per-request quota cap).
#[derive(Clone)]
pub struct SerperClient {
    http_client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
}

impl SerperClient {
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            http_client: crate::http_client(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from `SERPER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SERPER_API_KEY")
            .map_err(|_| SearchError::MissingCredentials("SERPER_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    fn name(&self) -> &'static str {
        "serper"
    }

    fn page_size(&self) -> usize {
        PAGE_SIZE
    }

    fn max_results(&self) -> usize {
        MAX_RESULTS
    }

    fn ensure_credentials(&self) -> Result<()> {
        if self.api_key.is_blank() {
            return Err(SearchError::MissingCredentials(
                "Serper API key is empty".into(),
            ));
        }
        Ok(())
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage> {
        let num = request.count.clamp(1, PAGE_SIZE);
        let body = SerperRequest {
            q: &request.query,
            num,
            page: request.offset / num + 1,
        };

        let response = self
            .http_client
            .post(&self.base_url)
            .header("X-API-KEY", self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Serper request failed");
                SearchError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, query = %request.query, "Serper API error");
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let serper_response: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        let items: Vec<SearchItem> = serper_response
            .organic
            .into_iter()
            .map(|r| SearchItem {
                link: r.link,
                title: r.title,
                snippet: r.snippet,
                site_name: None,
            })
            .collect();

        debug!(query = %request.query, page = body.page, returned = items.len(), "Serper page");

        Ok(SearchPage {
            items,
            total_results: None,
        })
    }
}
