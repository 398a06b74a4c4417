//! Testing utilities including mock implementations.
//!
//! Useful for exercising the discovery pipelines without touching a search
//! provider or a language model. Both mocks are cheap to clone and clones
//! share their scripted responses and call logs, so a test can hand one copy
//! to a [`DomainFinder`](crate::DomainFinder) and assert on the other.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::classifier::ExclusionClassifier;
use crate::error::{ClassifierError, ClassifierResult, DiscoveryError, Result};
use crate::search::{ProviderFailure, SearchOutcome, WebSearcher};

/// Mock web searcher with per-query scripted links.
///
/// Unknown queries return an empty outcome.
#[derive(Clone, Default)]
pub struct MockWebSearcher {
    outcomes: Arc<RwLock<HashMap<String, SearchOutcome>>>,
    missing_credentials: bool,
    calls: Arc<RwLock<Vec<MockSearchCall>>>,
}

/// Record of a call made to the mock searcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSearchCall {
    pub query: String,
    pub limit: usize,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these links for an exact query string.
    pub fn with_links(self, query: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|l| l.to_string()).collect();
        self.outcomes
            .write()
            .unwrap()
            .insert(query.to_string(), SearchOutcome::complete(links));
        self
    }

    /// Return these links, then report a provider failure for the query.
    pub fn with_failure(self, query: &str, links: &[&str], message: &str) -> Self {
        let outcome = SearchOutcome {
            links: links.iter().map(|l| l.to_string()).collect(),
            pages_fetched: usize::from(!links.is_empty()),
            failure: Some(ProviderFailure {
                provider: "mock".to_string(),
                query: query.to_string(),
                page: usize::from(!links.is_empty()),
                message: message.to_string(),
            }),
        };
        self.outcomes
            .write()
            .unwrap()
            .insert(query.to_string(), outcome);
        self
    }

    /// Fail every call with [`DiscoveryError::MissingCredentials`].
    pub fn without_credentials(mut self) -> Self {
        self.missing_credentials = true;
        self
    }

    /// Every call, in order.
    pub fn calls(&self) -> Vec<MockSearchCall> {
        self.calls.read().unwrap().clone()
    }

    /// Queries issued, in order.
    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.query).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        if self.missing_credentials {
            return Err(DiscoveryError::MissingCredentials {
                provider: "mock",
                detail: "no API key configured".to_string(),
            });
        }

        self.calls.write().unwrap().push(MockSearchCall {
            query: query.to_string(),
            limit,
        });

        let mut outcome = self
            .outcomes
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        outcome.links.truncate(limit);
        Ok(outcome)
    }
}

/// Mock classifier that excludes a fixed set of labels.
#[derive(Clone, Default)]
pub struct MockClassifier {
    exclusions: HashSet<String>,
    fail: bool,
    calls: Arc<RwLock<Vec<MockClassifierCall>>>,
}

/// Record of a call made to the mock classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockClassifierCall {
    pub domains: Vec<String>,
    pub company: String,
}

impl MockClassifier {
    /// A classifier that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude these labels whenever they are offered.
    pub fn excluding<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions
            .extend(labels.into_iter().map(|l| l.into().to_lowercase()));
        self
    }

    /// Fail every call with an API error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<MockClassifierCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl ExclusionClassifier for MockClassifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn exclusions(&self, domains: &[String], company: &str) -> ClassifierResult<HashSet<String>> {
        self.calls.write().unwrap().push(MockClassifierCall {
            domains: domains.to_vec(),
            company: company.to_string(),
        });

        if self.fail {
            return Err(ClassifierError::Api {
                status: 503,
                message: "mock classifier unavailable".to_string(),
            });
        }

        Ok(self.exclusions.clone())
    }
}
