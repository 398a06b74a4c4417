//! The exclusion filter chain: heuristic prefilter, then an LLM classifier.
//!
//! # Degradation
//!
//! The chain never blocks discovery. With no classifier configured it is a
//! no-op; when the classifier fails the prefiltered list is returned and the
//! failure is recorded as [`FilterStatus::Degraded`].
//!
//! ```rust,ignore
//! let filter = DomainFilter::new(FilterMode::HeuristicThenLlm)
//!     .with_classifier(OpenAIClassifier::new(api_key));
//!
//! let kept = filter.classify(&ranked, "Acme").await;
//! ```

pub mod cache;
pub mod openai;
pub mod prompt;

pub use cache::{CacheKey, ClassificationCache};
pub use openai::OpenAIClassifier;
pub use prompt::{build_prompt, parse_exclusions};

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::FilterMode;
use crate::error::ClassifierResult;
use crate::prefilter::HeuristicPrefilter;

/// Decides which candidate domains do not belong to a company.
///
/// Input: candidate labels and the company name. Output: the labels to drop,
/// lowercase. Implementations may return labels that were not in the input;
/// they are ignored.
#[async_trait]
pub trait ExclusionClassifier: Send + Sync {
    /// Name for logs (model id, provider).
    fn name(&self) -> &str;

    async fn exclusions(&self, domains: &[String], company: &str) -> ClassifierResult<HashSet<String>>;
}

/// How the filter chain arrived at its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FilterStatus {
    /// No classifier configured; input returned unchanged
    NotConfigured,
    /// Nothing to filter
    EmptyInput,
    /// Prefilter only, by configuration
    HeuristicOnly,
    /// The prefilter removed every candidate; no model call made
    AllPrefiltered,
    /// The classifier ran
    Classified,
    /// Verdict reused from the session cache
    Cached,
    /// Classifier failed; prefiltered input returned
    Degraded { error: String },
}

/// Result of running the filter chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Surviving domains, input order
    pub kept: Vec<String>,

    /// Removed by the pattern prefilter
    pub prefiltered_out: Vec<String>,

    /// Removed by the classifier
    pub classifier_excluded: Vec<String>,

    #[serde(flatten)]
    pub status: FilterStatus,
}

impl FilterReport {
    fn unchanged(domains: &[String], status: FilterStatus) -> Self {
        Self {
            kept: domains.to_vec(),
            prefiltered_out: vec![],
            classifier_excluded: vec![],
            status,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, FilterStatus::Degraded { .. })
    }
}

/// Prefilter + classifier chain with a per-session verdict cache.
#[derive(Clone)]
pub struct DomainFilter {
    mode: FilterMode,
    prefilter: HeuristicPrefilter,
    classifier: Option<Arc<dyn ExclusionClassifier>>,
    cache: ClassificationCache,
}

impl DomainFilter {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            prefilter: HeuristicPrefilter::new(),
            classifier: None,
            cache: ClassificationCache::new(),
        }
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_classifier(self, classifier: impl ExclusionClassifier + 'static) -> Self {
        self.with_classifier_arc(Arc::new(classifier))
    }

    pub fn with_classifier_arc(mut self, classifier: Arc<dyn ExclusionClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_prefilter(mut self, prefilter: HeuristicPrefilter) -> Self {
        self.prefilter = prefilter;
        self
    }

    /// Share a cache with other filters.
    pub fn with_cache(mut self, cache: ClassificationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    /// Kept domains only.
    pub async fn classify(&self, domains: &[String], company: &str) -> Vec<String> {
        self.filter(domains, company).await.kept
    }

    /// Run the chain and report what each stage did.
    pub async fn filter(&self, domains: &[String], company: &str) -> FilterReport {
        if domains.is_empty() {
            return FilterReport::unchanged(domains, FilterStatus::EmptyInput);
        }

        if self.mode == FilterMode::Heuristic {
            let outcome = self.prefilter.apply(domains, company);
            return FilterReport {
                prefiltered_out: outcome.excluded_domains(),
                kept: outcome.kept,
                classifier_excluded: vec![],
                status: FilterStatus::HeuristicOnly,
            };
        }

        let Some(classifier) = self.classifier.as_ref() else {
            return FilterReport::unchanged(domains, FilterStatus::NotConfigured);
        };

        let (candidates, prefiltered_out) = if self.mode.uses_prefilter() {
            let outcome = self.prefilter.apply(domains, company);
            (outcome.kept.clone(), outcome.excluded_domains())
        } else {
            (domains.to_vec(), vec![])
        };

        if candidates.is_empty() {
            info!(company, "every candidate was prefiltered out");
            return FilterReport {
                kept: vec![],
                prefiltered_out,
                classifier_excluded: vec![],
                status: FilterStatus::AllPrefiltered,
            };
        }

        let key = CacheKey::new(&candidates, company);
        let (exclusions, status) = match self.cache.get(&key) {
            Some(cached) => (cached, FilterStatus::Cached),
            None => match classifier.exclusions(&candidates, company).await {
                Ok(exclusions) => {
                    self.cache.insert(key, exclusions.clone());
                    (exclusions, FilterStatus::Classified)
                }
                Err(e) => {
                    warn!(
                        classifier = classifier.name(),
                        error = %e,
                        "classification failed, keeping prefiltered domains"
                    );
                    return FilterReport {
                        kept: candidates,
                        prefiltered_out,
                        classifier_excluded: vec![],
                        status: FilterStatus::Degraded {
                            error: e.to_string(),
                        },
                    };
                }
            },
        };

        let (kept, classifier_excluded): (Vec<String>, Vec<String>) = candidates
            .into_iter()
            .partition(|domain| !exclusions.contains(&domain.to_lowercase()));

        info!(
            classifier = classifier.name(),
            before = domains.len(),
            after = kept.len(),
            excluded = ?classifier_excluded,
            cached = status == FilterStatus::Cached,
            "classifier filter applied"
        );

        FilterReport {
            kept,
            prefiltered_out,
            classifier_excluded,
            status,
        }
    }
}
