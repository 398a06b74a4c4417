//! Pure search provider REST clients
//!
//! Minimal clients for Google Custom Search and Serper with no domain logic.
//! Each client fetches exactly one page per call; pagination, delays and
//! failure policy belong to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use search_client::{GoogleSearchClient, PageRequest, SearchProvider};
//!
//! let client = GoogleSearchClient::from_env()?;
//! client.ensure_credentials()?;
//!
//! let page = client
//!     .fetch_page(&PageRequest::new("\"Acme\" official website", 0, 10))
//!     .await?;
//! for link in page.links() {
//!     println!("{link}");
//! }
//! ```

pub mod credentials;
pub mod error;
pub mod google;
pub mod serper;
pub mod types;

pub use credentials::ApiKey;
pub use error::{Result, SearchError};
pub use google::GoogleSearchClient;
pub use serper::SerperClient;
pub use types::{PageRequest, SearchItem, SearchPage};

use async_trait::async_trait;
use std::time::Duration;

/// Timeout applied to every provider request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A web search API that can return one page of results at a time.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short provider name for logs ("google", "serper").
    fn name(&self) -> &'static str;

    /// Largest page the provider serves in one request.
    fn page_size(&self) -> usize;

    /// Deepest result offset the provider will serve for one query.
    fn max_results(&self) -> usize;

    /// Check that credentials are present before any request is made.
    fn ensure_credentials(&self) -> Result<()>;

    /// Fetch a single page of results.
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage>;
}

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
