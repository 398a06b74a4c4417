//! Paginated web search over a [`SearchProvider`].
//!
//! The provider clients fetch one page per call. This module owns the policy
//! around them: how many pages to request, when to stop, how long to wait
//! between pages, and what to do when a page fails.
//!
//! Provider failures never reach the caller as errors. A failed page stops
//! pagination and the links gathered so far come back in a
//! [`SearchOutcome`] with its `failure` set. The only error is missing
//! credentials, which is reported before any request goes out.

use async_trait::async_trait;
use search_client::{PageRequest, SearchProvider};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{DiscoveryError, Result};

/// Default pause between pages of the same query.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Why a search call stopped before it was done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderFailure {
    /// Provider name ("google", "serper", ...)
    pub provider: String,

    /// The query that failed
    pub query: String,

    /// Zero-based page index that failed
    pub page: usize,

    /// Error message from the provider client
    pub message: String,
}

/// Result of one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Result URLs in provider order, capped at the requested limit
    pub links: Vec<String>,

    /// Pages successfully fetched
    pub pages_fetched: usize,

    /// Set when pagination was cut short by a provider error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ProviderFailure>,
}

impl SearchOutcome {
    pub fn complete(links: Vec<String>) -> Self {
        Self {
            links,
            pages_fetched: 1,
            failure: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Some links came back before a page failed.
    pub fn is_partial(&self) -> bool {
        self.failure.is_some() && !self.links.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Something that can answer a web search with a list of URLs.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search for `query`, returning at most `limit` URLs.
    ///
    /// Errors only with [`DiscoveryError::MissingCredentials`]; provider
    /// failures are carried in the outcome.
    async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome>;
}

#[async_trait]
impl<T: WebSearcher + ?Sized> WebSearcher for Arc<T> {
    async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        (**self).search(query, limit).await
    }
}

/// Sequential pagination over a provider with a fixed inter-page delay.
#[derive(Clone)]
pub struct PaginatedSearcher {
    provider: Arc<dyn SearchProvider>,
    page_delay: Duration,
}

impl PaginatedSearcher {
    pub fn new(provider: impl SearchProvider + 'static) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    pub fn from_arc(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Set the pause between pages of one query.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }
}

#[async_trait]
impl WebSearcher for PaginatedSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        let provider = self.provider.as_ref();
        provider
            .ensure_credentials()
            .map_err(|e| DiscoveryError::from_credentials(provider.name(), e))?;

        let limit = limit.min(provider.max_results());
        let page_size = provider.page_size().max(1);

        let mut outcome = SearchOutcome {
            pages_fetched: 0,
            ..Default::default()
        };
        let mut offset = 0;

        while offset < limit {
            let count = page_size.min(limit - offset);
            let request = PageRequest::new(query, offset, count);
            let page_index = offset / page_size;

            match provider.fetch_page(&request).await {
                Ok(page) => {
                    let returned = page.len();
                    outcome.pages_fetched += 1;
                    outcome
                        .links
                        .extend(page.items.into_iter().map(|item| item.link));

                    debug!(
                        provider = provider.name(),
                        query,
                        page = page_index,
                        returned,
                        "search page fetched"
                    );

                    if returned < count {
                        break;
                    }
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        query,
                        page = page_index,
                        collected = outcome.links.len(),
                        error = %e,
                        "search page failed, stopping pagination"
                    );
                    outcome.failure = Some(ProviderFailure {
                        provider: provider.name().to_string(),
                        query: query.to_string(),
                        page: page_index,
                        message: e.to_string(),
                    });
                    break;
                }
            }

            offset += count;
            if offset < limit && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        outcome.links.truncate(limit);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_client::{SearchError, SearchItem, SearchPage};
    use std::sync::Mutex;

    /// Provider that serves scripted pages and records every request.
    struct ScriptedProvider {
        page_size: usize,
        pages: Mutex<Vec<search_client::Result<Vec<String>>>>,
        requests: Mutex<Vec<PageRequest>>,
        credentials: bool,
    }

    impl ScriptedProvider {
        fn new(page_size: usize, pages: Vec<search_client::Result<Vec<String>>>) -> Self {
            Self {
                page_size,
                pages: Mutex::new(pages.into_iter().rev().collect()),
                requests: Mutex::new(vec![]),
                credentials: true,
            }
        }

        fn without_credentials(mut self) -> Self {
            self.credentials = false;
            self
        }
    }

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn page_size(&self) -> usize {
            self.page_size
        }

        fn max_results(&self) -> usize {
            100
        }

        fn ensure_credentials(&self) -> search_client::Result<()> {
            if self.credentials {
                Ok(())
            } else {
                Err(SearchError::MissingCredentials("no key".into()))
            }
        }

        async fn fetch_page(&self, request: &PageRequest) -> search_client::Result<SearchPage> {
            self.requests.lock().unwrap().push(request.clone());
            let next = self.pages.lock().unwrap().pop().unwrap_or_else(|| Ok(vec![]));
            next.map(|links| SearchPage {
                items: links.into_iter().map(SearchItem::new).collect(),
                total_results: None,
            })
        }
    }

    fn links(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://{prefix}{i}.com/")).collect()
    }

    fn searcher(provider: ScriptedProvider) -> (PaginatedSearcher, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        let searcher = PaginatedSearcher::from_arc(provider.clone()).with_page_delay(Duration::ZERO);
        (searcher, provider)
    }

    #[tokio::test]
    async fn test_paginates_in_fixed_page_sizes() {
        let (searcher, provider) =
            searcher(ScriptedProvider::new(10, vec![Ok(links("a", 10)), Ok(links("b", 10))]));

        let outcome = searcher.search("acme", 20).await.unwrap();

        assert_eq!(outcome.links.len(), 20);
        assert_eq!(outcome.pages_fetched, 2);
        assert!(outcome.is_complete());

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0], PageRequest::new("acme", 0, 10));
        assert_eq!(requests[1], PageRequest::new("acme", 10, 10));
    }

    #[tokio::test]
    async fn test_short_page_ends_pagination() {
        let (searcher, provider) =
            searcher(ScriptedProvider::new(10, vec![Ok(links("a", 10)), Ok(links("b", 3))]));

        let outcome = searcher.search("acme", 100).await.unwrap();

        assert_eq!(outcome.links.len(), 13);
        assert_eq!(provider.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_limit_capped_at_provider_maximum() {
        let pages = (0..12).map(|_| Ok(links("x", 10))).collect();
        let (searcher, provider) = searcher(ScriptedProvider::new(10, pages));

        let outcome = searcher.search("acme", 400).await.unwrap();

        assert_eq!(outcome.links.len(), 100);
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 10);
        assert_eq!(requests.last().unwrap().offset, 90);
    }

    #[tokio::test]
    async fn test_last_page_requests_only_remainder() {
        let (searcher, provider) =
            searcher(ScriptedProvider::new(10, vec![Ok(links("a", 10)), Ok(links("b", 5))]));

        let outcome = searcher.search("acme", 15).await.unwrap();

        assert_eq!(outcome.links.len(), 15);
        assert_eq!(provider.requests.lock().unwrap()[1].count, 5);
    }

    #[tokio::test]
    async fn test_failure_returns_partial_links() {
        let (searcher, _) = searcher(ScriptedProvider::new(
            10,
            vec![
                Ok(links("a", 10)),
                Err(SearchError::Api {
                    status: 429,
                    message: "quota".into(),
                }),
            ],
        ));

        let outcome = searcher.search("acme", 30).await.unwrap();

        assert_eq!(outcome.links.len(), 10);
        assert!(outcome.is_partial());
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.page, 1);
        assert!(failure.message.contains("429"));
    }

    #[tokio::test]
    async fn test_failure_on_first_page_is_empty_not_error() {
        let (searcher, _) = searcher(ScriptedProvider::new(
            10,
            vec![Err(SearchError::Network("connection reset".into()))],
        ));

        let outcome = searcher.search("acme", 10).await.unwrap();

        assert!(outcome.is_empty());
        assert!(!outcome.is_complete());
        assert!(!outcome.is_partial());
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_any_request() {
        let (searcher, provider) =
            searcher(ScriptedProvider::new(10, vec![Ok(links("a", 10))]).without_credentials());

        let err = searcher.search("acme", 10).await.unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::MissingCredentials { provider: "scripted", .. }
        ));
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_after_final_page() {
        let provider = ScriptedProvider::new(10, vec![Ok(links("a", 10)), Ok(links("b", 10))]);
        let searcher = PaginatedSearcher::new(provider).with_page_delay(Duration::from_secs(5));

        let start = tokio::time::Instant::now();
        searcher.search("acme", 20).await.unwrap();

        // One pause between the two pages, none after the second.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(10));
    }
}
