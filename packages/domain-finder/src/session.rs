//! Interactive session state: roots on screen, what was expanded, what the
//! user deleted.

use domain_discovery::RankedRoot;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct Session {
    company: Option<String>,
    roots: Vec<RankedRoot>,
    deleted_roots: BTreeSet<String>,
    expanded: HashMap<String, Vec<String>>,
    deleted_domains: HashMap<String, BTreeSet<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Start over with a fresh search result. Expansions and deletions from
    /// the previous search are dropped.
    pub fn replace_roots(&mut self, company: impl Into<String>, roots: Vec<RankedRoot>) {
        self.company = Some(company.into());
        self.roots = roots;
        self.deleted_roots.clear();
        self.expanded.clear();
        self.deleted_domains.clear();
    }

    /// Roots not deleted, in rank order.
    pub fn visible_roots(&self) -> Vec<&RankedRoot> {
        self.roots
            .iter()
            .filter(|root| !self.deleted_roots.contains(&root.label))
            .collect()
    }

    pub fn deleted_roots(&self) -> Vec<&str> {
        self.deleted_roots.iter().map(String::as_str).collect()
    }

    /// Hide a root. False when it is not in the current result or already hidden.
    pub fn delete_root(&mut self, label: &str) -> bool {
        if !self.roots.iter().any(|root| root.label == label) {
            return false;
        }
        self.deleted_roots.insert(label.to_string())
    }

    pub fn restore_root(&mut self, label: &str) -> bool {
        self.deleted_roots.remove(label)
    }

    pub fn is_expanded(&self, root: &str) -> bool {
        self.expanded.contains_key(root)
    }

    /// Record an expansion; any earlier deletions for this root are dropped.
    pub fn set_expansion(&mut self, root: &str, domains: Vec<String>) {
        self.expanded.insert(root.to_string(), domains);
        self.deleted_domains.remove(root);
    }

    /// Expanded domains for `root` that were not deleted.
    pub fn visible_domains(&self, root: &str) -> Vec<&str> {
        let deleted = self.deleted_domains.get(root);
        self.expanded
            .get(root)
            .map(|domains| {
                domains
                    .iter()
                    .filter(|domain| !deleted.is_some_and(|d| d.contains(*domain)))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn deleted_domains(&self, root: &str) -> Vec<&str> {
        self.deleted_domains
            .get(root)
            .map(|domains| domains.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Hide one expanded domain. False when the root was not expanded, the
    /// domain is not in its list, or it is already hidden.
    pub fn delete_domain(&mut self, root: &str, domain: &str) -> bool {
        let known = self
            .expanded
            .get(root)
            .is_some_and(|domains| domains.iter().any(|d| d == domain));
        if !known {
            return false;
        }
        self.deleted_domains
            .entry(root.to_string())
            .or_default()
            .insert(domain.to_string())
    }

    pub fn restore_domain(&mut self, root: &str, domain: &str) -> bool {
        self.deleted_domains
            .get_mut(root)
            .is_some_and(|domains| domains.remove(domain))
    }
}
