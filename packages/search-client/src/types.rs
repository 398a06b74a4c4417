//! Provider-neutral page request and response types.

/// One page worth of results to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Query string, passed through unchanged
    pub query: String,

    /// Zero-based offset of the first result on this page
    pub offset: usize,

    /// Number of results wanted on this page
    pub count: usize,
}

impl PageRequest {
    pub fn new(query: impl Into<String>, offset: usize, count: usize) -> Self {
        Self {
            query: query.into(),
            offset,
            count,
        }
    }
}

/// A single organic search result.
#[derive(Debug, Clone, Default)]
pub struct SearchItem {
    /// Result URL
    pub link: String,

    /// Page title, when the provider returns one
    pub title: Option<String>,

    /// Result snippet
    pub snippet: Option<String>,

    /// `og:site_name` from the page metadata (Google only)
    pub site_name: Option<String>,
}

impl SearchItem {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,

    /// Provider's estimate of the total hit count
    pub total_results: Option<u64>,
}

impl SearchPage {
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.link.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
