//! Link deduplication and frequency ranking.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// A root label and how often it appeared across all search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRoot {
    pub label: String,
    pub occurrences: usize,
}

/// Drop repeated URLs, keeping the first occurrence of each.
///
/// Comparison is on the exact string.
pub fn dedupe_links(links: impl IntoIterator<Item = String>) -> Vec<String> {
    links.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}

/// Count labels and order them by descending count.
///
/// Ties keep first-seen order: `[a, b, a, c, b, a]` ranks as `a(3), b(2), c(1)`.
pub fn rank_by_frequency(labels: impl IntoIterator<Item = String>) -> Vec<RankedRoot> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut ranked: Vec<RankedRoot> = counts
        .into_iter()
        .map(|(label, occurrences)| RankedRoot { label, occurrences })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    ranked
}
