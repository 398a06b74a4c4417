//! Configuration for discovery and expansion runs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which stages the filter chain runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Pattern prefilter only. Never calls a model.
    Heuristic,

    /// Pattern prefilter, then the LLM classifier on what survives.
    #[default]
    HeuristicThenLlm,

    /// LLM classifier on the raw candidate list.
    LlmOnly,
}

impl FilterMode {
    pub fn uses_prefilter(self) -> bool {
        matches!(self, FilterMode::Heuristic | FilterMode::HeuristicThenLlm)
    }

    pub fn uses_classifier(self) -> bool {
        matches!(self, FilterMode::HeuristicThenLlm | FilterMode::LlmOnly)
    }
}

/// Settings shared by root discovery and domain expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Results requested for each discovery query template.
    ///
    /// Default: 10.
    pub results_per_query: usize,

    /// Pause between successive discovery queries, in milliseconds.
    ///
    /// Default: 200.
    pub query_delay_ms: u64,

    /// Results requested for each expansion query.
    ///
    /// Default: 100 (the Custom Search ceiling).
    pub expansion_results: usize,

    /// Pause after each expansion iteration that continues, in milliseconds.
    ///
    /// Default: 1000.
    pub expansion_delay_ms: u64,

    /// Hard stop for the expansion loop.
    ///
    /// Default: 20.
    pub max_expansion_iterations: usize,

    /// Filter chain stages.
    pub filter_mode: FilterMode,

    /// Substrings excluded in addition to the built-in prefilter patterns.
    #[serde(default)]
    pub extra_exclude_patterns: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            results_per_query: 10,
            query_delay_ms: 200,
            expansion_results: 100,
            expansion_delay_ms: 1000,
            max_expansion_iterations: 20,
            filter_mode: FilterMode::default(),
            extra_exclude_patterns: vec![],
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every delay. Meant for tests and replayed responses.
    pub fn without_delays(mut self) -> Self {
        self.query_delay_ms = 0;
        self.expansion_delay_ms = 0;
        self
    }

    pub fn with_results_per_query(mut self, results: usize) -> Self {
        self.results_per_query = results;
        self
    }

    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_expansion_results(mut self, results: usize) -> Self {
        self.expansion_results = results;
        self
    }

    pub fn with_expansion_delay(mut self, delay: Duration) -> Self {
        self.expansion_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_max_expansion_iterations(mut self, max: usize) -> Self {
        self.max_expansion_iterations = max;
        self
    }

    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    pub fn with_extra_exclude_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.extra_exclude_patterns = patterns.into_iter().map(|p| p.into()).collect();
        self
    }

    pub fn query_delay(&self) -> Duration {
        Duration::from_millis(self.query_delay_ms)
    }

    pub fn expansion_delay(&self) -> Duration {
        Duration::from_millis(self.expansion_delay_ms)
    }
}
