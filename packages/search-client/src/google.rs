//! Google Custom Search JSON API client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::credentials::ApiKey;
use crate::error::{Result, SearchError};
use crate::types::{PageRequest, SearchItem, SearchPage};
use crate::SearchProvider;

const BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Custom Search never serves more than 10 results per request.
const PAGE_SIZE: usize = 10;

/// `start` may not go past 100.
const MAX_RESULTS: usize = 100;

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
    #[serde(default, rename = "searchInformation")]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(default, rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    link: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Deserialize)]
struct PageMap {
    #[serde(default)]
    metatags: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl GoogleItem {
    fn site_name(&self) -> Option<String> {
        self.pagemap
            .as_ref()?
            .metatags
            .first()?
            .get("og:site_name")?
            .as_str()
            .map(str::to_string)
    }

    fn into_item(self) -> SearchItem {
        let site_name = self.site_name();
        SearchItem {
            link: self.link,
            title: self.title,
            snippet: self.snippet,
            site_name,
        }
    }
}

/// Google Custom Search client (quota-bound: 10 results per request).
#[derive(Clone)]
pub struct GoogleSearchClient {
    http_client: reqwest::Client,
    api_key: ApiKey,
    engine_id: String,
    base_url: String,
}

impl GoogleSearchClient {
    /// Create a client from an API key and a programmable search engine id (`cx`).
    pub fn new(api_key: impl Into<ApiKey>, engine_id: impl Into<String>) -> Self {
        Self {
            http_client: crate::http_client(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from `GOOGLE_SEARCH_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_SEARCH_API_KEY").map_err(|_| {
            SearchError::MissingCredentials("GOOGLE_SEARCH_API_KEY not set".into())
        })?;
        let engine_id = std::env::var("GOOGLE_SEARCH_ENGINE_ID").map_err(|_| {
            SearchError::MissingCredentials("GOOGLE_SEARCH_ENGINE_ID not set".into())
        })?;
        Ok(Self::new(api_key, engine_id))
    }

    /// Point the client at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn engine_id(&self) -> &str {
        &self.engine_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    fn name(&self) -> &'static str {
        "google"
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
                "Google Search API key is empty".into(),
            ));
        }
        if self.engine_id.trim().is_empty() {
            return Err(SearchError::MissingCredentials(
                "Google Search engine id is empty".into(),
            ));
        }
        Ok(())
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage> {
        let num = request.count.clamp(1, PAGE_SIZE);
        let start = request.offset + 1;

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.expose()),
                ("cx", self.engine_id.as_str()),
                ("q", request.query.as_str()),
            ])
            .query(&[("num", num), ("start", start)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Google Search request failed");
                SearchError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, query = %request.query, start, "Google Search API error");
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let google_response: GoogleResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        let total_results = google_response
            .search_information
            .and_then(|info| info.total_results)
            .and_then(|total| total.parse().ok());

        let items: Vec<SearchItem> = google_response
            .items
            .into_iter()
            .map(GoogleItem::into_item)
            .collect();

        debug!(
            query = %request.query,
            start,
            returned = items.len(),
            total_results = ?total_results,
            "Google Search page"
        );

        Ok(SearchPage {
            items,
            total_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GoogleSearchClient::new("key", "cx-123").with_base_url("http://localhost:9");

        assert_eq!(client.engine_id(), "cx-123");
        assert_eq!(client.base_url(), "http://localhost:9");
        assert_eq!(client.page_size(), 10);
        assert_eq!(client.max_results(), 100);
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let err = GoogleSearchClient::new("", "cx").ensure_credentials().unwrap_err();
        assert!(err.is_missing_credentials());

        let err = GoogleSearchClient::new("key", " ").ensure_credentials().unwrap_err();
        assert!(err.is_missing_credentials());

        assert!(GoogleSearchClient::new("key", "cx").ensure_credentials().is_ok());
    }

    #[test]
    fn test_item_metadata_parsing() {
        let body = serde_json::json!({
            "searchInformation": { "totalResults": "1230" },
            "items": [
                {
                    "link": "https://www.acme.com/",
                    "title": "Acme",
                    "pagemap": { "metatags": [ { "og:site_name": "Acme Corp" } ] }
                },
                { "link": "https://en.wikipedia.org/wiki/Acme" }
            ]
        });

        let parsed: GoogleResponse = serde_json::from_value(body).unwrap();
        let total = parsed
            .search_information
            .as_ref()
            .and_then(|info| info.total_results.as_deref());
        assert_eq!(total, Some("1230"));

        let items: Vec<SearchItem> = parsed.items.into_iter().map(GoogleItem::into_item).collect();
        assert_eq!(items[0].site_name.as_deref(), Some("Acme Corp"));
        assert_eq!(items[0].title.as_deref(), Some("Acme"));
        assert_eq!(items[1].site_name, None);
    }

    #[test]
    fn test_missing_items_is_empty_page() {
        let parsed: GoogleResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(parsed.items.is_empty());
    }
}
