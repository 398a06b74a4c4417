//! Session memo for classifier verdicts.

use dashmap::DashMap;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Cache key: the set of domains sent to the model plus the company name.
///
/// Order and case of the input list do not matter, and neither does the case
/// of the company name; the same candidates in a different order hit the same
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    domains: Vec<String>,
    company: String,
}

impl CacheKey {
    pub fn new(domains: &[String], company: &str) -> Self {
        let domains: BTreeSet<String> = domains.iter().map(|d| d.trim().to_lowercase()).collect();
        Self {
            domains: domains.into_iter().collect(),
            company: company.trim().to_lowercase(),
        }
    }
}

/// Exclusion sets keyed by [`CacheKey`]. Cheap to clone; clones share entries.
#[derive(Debug, Clone, Default)]
pub struct ClassificationCache {
    entries: Arc<DashMap<CacheKey, HashSet<String>>>,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<HashSet<String>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: CacheKey, exclusions: HashSet<String>) {
        self.entries.insert(key, exclusions);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
