//! Root discovery: which registrable labels belong to a company.

use serde::Serialize;
use tracing::{debug, info};

use super::rank::{dedupe_links, rank_by_frequency, RankedRoot};
use super::DomainFinder;
use crate::classifier::FilterReport;
use crate::error::{DiscoveryError, Result};
use crate::extract::extract_labels;
use crate::search::{ProviderFailure, WebSearcher};

/// The fixed query battery for one company, in issue order.
pub fn discovery_queries(company: &str) -> Vec<String> {
    vec![
        format!("\"{company}\" site:*.com"),
        format!("\"{company}\" official website"),
        format!("\"{company}\" corporate site"),
        format!("\"{company}\" company domain"),
        format!("\"{company}\" headquarters"),
    ]
}

/// Everything one discovery run saw and decided.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    /// Company name as searched (trimmed)
    pub company: String,

    /// Queries issued, in order
    pub queries: Vec<String>,

    /// Distinct result URLs across all queries
    pub unique_links: usize,

    /// Every extracted label, ranked, before filtering
    pub candidates: Vec<RankedRoot>,

    /// Labels that survived the filter chain, in rank order
    pub roots: Vec<RankedRoot>,

    /// What the filter chain did
    pub filter: FilterReport,

    /// Queries cut short by the provider
    pub search_failures: Vec<ProviderFailure>,
}

impl DiscoveryReport {
    /// Surviving labels only.
    pub fn root_labels(&self) -> Vec<String> {
        self.roots.iter().map(|root| root.label.clone()).collect()
    }
}

impl<S: WebSearcher> DomainFinder<S> {
    /// Ranked, filtered root labels for `company`.
    ///
    /// An empty list means nothing was found; it is not an error.
    pub async fn discover_roots(&self, company: &str) -> Result<Vec<String>> {
        Ok(self.discover(company).await?.root_labels())
    }

    /// Run root discovery and report every stage.
    pub async fn discover(&self, company: &str) -> Result<DiscoveryReport> {
        let company = company.trim();
        if company.is_empty() {
            return Err(DiscoveryError::invalid_input("company name is blank"));
        }

        let queries = discovery_queries(company);
        let mut links = Vec::new();
        let mut search_failures = Vec::new();

        for (i, query) in queries.iter().enumerate() {
            if i > 0 && !self.config.query_delay().is_zero() {
                tokio::time::sleep(self.config.query_delay()).await;
            }

            let outcome = self
                .searcher
                .search(query, self.config.results_per_query)
                .await?;
            debug!(query = %query, links = outcome.links.len(), "discovery query done");

            if let Some(failure) = outcome.failure {
                search_failures.push(failure);
            }
            links.extend(outcome.links);
        }

        let links = dedupe_links(links);
        let candidates = rank_by_frequency(extract_labels(links.iter().map(String::as_str)));
        let labels: Vec<String> = candidates.iter().map(|c| c.label.clone()).collect();

        let filter = self.filter.filter(&labels, company).await;
        let roots: Vec<RankedRoot> = candidates
            .iter()
            .filter(|c| filter.kept.contains(&c.label))
            .cloned()
            .collect();

        info!(
            company,
            unique_links = links.len(),
            candidates = candidates.len(),
            roots = roots.len(),
            failures = search_failures.len(),
            "root discovery complete"
        );

        Ok(DiscoveryReport {
            company: company.to_string(),
            queries,
            unique_links: links.len(),
            candidates,
            roots,
            filter,
            search_failures,
        })
    }
}
