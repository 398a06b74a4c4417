//! Company Domain Discovery Library
//!
//! Finds the internet domains that belong to a named company. A fixed
//! battery of web searches yields candidate URLs; their registrable labels
//! are ranked by frequency and passed through a filter chain that drops
//! social networks, news sites, marketplaces and other non-company domains.
//! A selected root can then be expanded into every public suffix it is
//! registered under.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_discovery::{DomainFinder, OpenAIClassifier, PaginatedSearcher};
//! use search_client::GoogleSearchClient;
//!
//! let searcher = PaginatedSearcher::new(GoogleSearchClient::from_env()?);
//! let finder = DomainFinder::new(searcher)
//!     .with_classifier(OpenAIClassifier::new(openai_key));
//!
//! // ["sonepar", "soneparusa", ...]
//! let roots = finder.discover_roots("Sonepar").await?;
//!
//! // ["https://www.sonepar.com", "https://www.sonepar.de", ...]
//! let domains = finder.expand("sonepar").await?;
//! ```
//!
//! # Modules
//!
//! - [`extract`] - Registrable label and public suffix from a URL
//! - [`search`] - Pagination policy over a search provider
//! - [`prefilter`] - Offline pattern filter with company-name protection
//! - [`classifier`] - LLM exclusion classifier, verdict cache, filter chain
//! - [`pipeline`] - Root discovery and domain expansion
//! - [`testing`] - Mock implementations for testing
//!
//! # Failure model
//!
//! Only missing credentials and invalid input are errors. Provider and model
//! failures degrade to partial or unfiltered results and are logged with
//! `tracing` and recorded in the returned reports.

pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prefilter;
pub mod search;
pub mod testing;

pub use classifier::{
    ClassificationCache, DomainFilter, ExclusionClassifier, FilterReport, FilterStatus,
    OpenAIClassifier,
};
pub use config::{DiscoveryConfig, FilterMode};
pub use error::{ClassifierError, DiscoveryError, Result};
pub use extract::{extract_domain, extract_labels, DomainParts};
pub use pipeline::{
    DiscoveryReport, DomainFinder, ExpansionReport, ExpansionStop, RankedRoot,
};
pub use prefilter::{prefilter, HeuristicPrefilter};
pub use search::{PaginatedSearcher, ProviderFailure, SearchOutcome, WebSearcher};
