//! Root discovery and domain expansion.
//!
//! [`DomainFinder`] bundles a [`WebSearcher`], the filter chain and a
//! [`DiscoveryConfig`]. It holds no per-company state: every call starts
//! from scratch, and the only thing shared between calls is the classifier
//! verdict cache inside the filter.
//!
//! ```rust,ignore
//! let searcher = PaginatedSearcher::new(GoogleSearchClient::from_env()?);
//! let finder = DomainFinder::new(searcher)
//!     .with_classifier(OpenAIClassifier::new(openai_key));
//!
//! let roots = finder.discover_roots("Sonepar").await?;
//! let domains = finder.expand(&roots[0]).await?;
//! ```

pub mod discovery;
pub mod expansion;
pub mod rank;

pub use discovery::{discovery_queries, DiscoveryReport};
pub use expansion::{expansion_query, ExpansionReport, ExpansionStop};
pub use rank::{dedupe_links, rank_by_frequency, RankedRoot};

use std::sync::Arc;

use crate::classifier::{DomainFilter, ExclusionClassifier};
use crate::config::DiscoveryConfig;
use crate::prefilter::HeuristicPrefilter;
use crate::search::WebSearcher;

/// Entry point for both pipelines.
#[derive(Clone)]
pub struct DomainFinder<S> {
    searcher: S,
    filter: DomainFilter,
    config: DiscoveryConfig,
}

impl<S: WebSearcher> DomainFinder<S> {
    /// Default configuration, no classifier.
    pub fn new(searcher: S) -> Self {
        let config = DiscoveryConfig::default();
        Self {
            searcher,
            filter: DomainFilter::new(config.filter_mode),
            config,
        }
    }

    /// Replace the configuration. The filter picks up its mode and extra
    /// patterns; a configured classifier and its cache are kept.
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        let prefilter =
            HeuristicPrefilter::new().with_extra_patterns(config.extra_exclude_patterns.clone());
        self.filter = self
            .filter
            .with_mode(config.filter_mode)
            .with_prefilter(prefilter);
        self.config = config;
        self
    }

    pub fn with_classifier(mut self, classifier: impl ExclusionClassifier + 'static) -> Self {
        self.filter = self.filter.with_classifier(classifier);
        self
    }

    pub fn with_classifier_arc(mut self, classifier: Arc<dyn ExclusionClassifier>) -> Self {
        self.filter = self.filter.with_classifier_arc(classifier);
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn filter(&self) -> &DomainFilter {
        &self.filter
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }
}
