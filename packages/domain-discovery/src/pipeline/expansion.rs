//! Domain expansion: every public suffix a root label is registered under.
//!
//! Each round asks the provider for `site:www.<root>.*` minus the suffixes
//! already found. The excluded set only grows, so every round either finds
//! something new or ends the loop.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::DomainFinder;
use crate::error::{DiscoveryError, Result};
use crate::extract::extract_domain;
use crate::search::{ProviderFailure, WebSearcher};

/// Suffix every root starts with, found or not.
const SEED_SUFFIX: &str = "com";

/// Why the expansion loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionStop {
    /// A query came back empty
    Exhausted,
    /// Results came back but none carried an unseen suffix
    NoNewSuffix,
    /// `max_expansion_iterations` reached
    IterationCap,
}

/// Outcome of expanding one root.
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionReport {
    pub root: String,

    /// `https://www.<root>.<suffix>` for every suffix, sorted
    pub domains: Vec<String>,

    /// Every suffix excluded by the final query, sorted
    pub excluded_suffixes: Vec<String>,

    /// Queries issued, in order
    pub queries: Vec<String>,

    pub stop: ExpansionStop,

    pub search_failures: Vec<ProviderFailure>,
}

/// `site:www.<root>.* -<s1> -<s2> ...` with suffixes in sorted order.
pub fn expansion_query<'a>(root: &str, excluded: impl IntoIterator<Item = &'a String>) -> String {
    let mut suffixes: Vec<&String> = excluded.into_iter().collect();
    suffixes.sort();

    let mut query = format!("site:www.{root}.*");
    for suffix in suffixes {
        query.push_str(" -");
        query.push_str(suffix);
    }
    query
}

fn url_for(root: &str, suffix: &str) -> String {
    format!("https://www.{root}.{suffix}")
}

fn normalize_root(root: &str) -> Result<String> {
    let root = root.trim().to_lowercase();
    if root.is_empty() {
        return Err(DiscoveryError::invalid_input("root domain is blank"));
    }
    if root.contains(['.', '/']) || root.chars().any(char::is_whitespace) {
        return Err(DiscoveryError::invalid_input(format!(
            "root must be a bare label like \"acme\", got \"{root}\""
        )));
    }
    Ok(root)
}

impl<S: WebSearcher> DomainFinder<S> {
    /// Sorted `https://www.<root>.<suffix>` URLs for `root`.
    ///
    /// Always contains `https://www.<root>.com`.
    pub async fn expand(&self, root: &str) -> Result<Vec<String>> {
        Ok(self.expand_report(root).await?.domains)
    }

    /// Run expansion and report every round.
    pub async fn expand_report(&self, root: &str) -> Result<ExpansionReport> {
        let root = normalize_root(root)?;

        let mut suffixes: BTreeSet<String> = BTreeSet::from([SEED_SUFFIX.to_string()]);
        let mut domains: BTreeSet<String> = BTreeSet::from([url_for(&root, SEED_SUFFIX)]);
        let mut queries = Vec::new();
        let mut search_failures = Vec::new();
        let mut stop = ExpansionStop::IterationCap;

        let max_iterations = self.config.max_expansion_iterations;
        for iteration in 0..max_iterations {
            let query = expansion_query(&root, &suffixes);
            let outcome = self
                .searcher
                .search(&query, self.config.expansion_results)
                .await?;
            queries.push(query);

            if let Some(failure) = outcome.failure {
                search_failures.push(failure);
            }

            if outcome.links.is_empty() {
                stop = ExpansionStop::Exhausted;
                break;
            }

            let mut found = Vec::new();
            for link in &outcome.links {
                let Some(parts) = extract_domain(link) else {
                    continue;
                };
                if parts.label != root || parts.suffix.is_empty() {
                    continue;
                }
                if suffixes.insert(parts.suffix.clone()) {
                    domains.insert(url_for(&root, &parts.suffix));
                    found.push(parts.suffix);
                }
            }

            debug!(
                root = %root,
                iteration,
                links = outcome.links.len(),
                new_suffixes = ?found,
                "expansion round done"
            );

            if found.is_empty() {
                stop = ExpansionStop::NoNewSuffix;
                break;
            }

            if iteration + 1 < max_iterations && !self.config.expansion_delay().is_zero() {
                tokio::time::sleep(self.config.expansion_delay()).await;
            }
        }

        info!(
            root = %root,
            domains = domains.len(),
            rounds = queries.len(),
            stop = ?stop,
            "domain expansion complete"
        );

        Ok(ExpansionReport {
            root,
            domains: domains.into_iter().collect(),
            excluded_suffixes: suffixes.into_iter().collect(),
            queries,
            stop,
            search_failures,
        })
    }
}
