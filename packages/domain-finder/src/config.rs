use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use domain_discovery::{OpenAIClassifier, PaginatedSearcher};
use dotenvy::dotenv;
use search_client::{GoogleSearchClient, SerperClient};
use std::env;
use std::time::Duration;

/// Which search API backs the searcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[default]
    Google,
    Serper,
}

impl Provider {
    fn parse(value: &str) -> Result<Self> {
        match <Self as ValueEnum>::from_str(value.trim(), true) {
            Ok(provider) => Ok(provider),
            Err(_) => bail!("SEARCH_PROVIDER must be \"google\" or \"serper\", got \"{value}\""),
        }
    }
}

/// Settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub google_api_key: Option<String>,
    pub google_engine_id: Option<String>,
    pub serper_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: Option<String>,
    pub page_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenv();

        let provider = match non_empty_var("SEARCH_PROVIDER") {
            Some(value) => Provider::parse(&value)?,
            None => Provider::default(),
        };

        let page_delay = match non_empty_var("SEARCH_PAGE_DELAY_MS") {
            Some(value) => Duration::from_millis(
                value
                    .parse()
                    .context("SEARCH_PAGE_DELAY_MS must be a whole number of milliseconds")?,
            ),
            None => domain_discovery::search::DEFAULT_PAGE_DELAY,
        };

        Ok(Self {
            provider,
            google_api_key: non_empty_var("GOOGLE_SEARCH_API_KEY"),
            google_engine_id: non_empty_var("GOOGLE_SEARCH_ENGINE_ID"),
            serper_api_key: non_empty_var("SERPER_API_KEY"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL"),
            openai_base_url: non_empty_var("OPENAI_BASE_URL"),
            page_delay,
        })
    }

    /// Searcher for the configured provider.
    ///
    /// Missing keys are not checked here; the first search reports them
    /// before any request is sent.
    pub fn searcher(&self) -> PaginatedSearcher {
        let searcher = match self.provider {
            Provider::Google => PaginatedSearcher::new(GoogleSearchClient::new(
                self.google_api_key.clone().unwrap_or_default(),
                self.google_engine_id.clone().unwrap_or_default(),
            )),
            Provider::Serper => PaginatedSearcher::new(SerperClient::new(
                self.serper_api_key.clone().unwrap_or_default(),
            )),
        };
        searcher.with_page_delay(self.page_delay)
    }

    /// OpenAI classifier, when a key is configured.
    pub fn classifier(&self) -> Option<OpenAIClassifier> {
        let key = self.openai_api_key.as_deref()?;
        let mut classifier = OpenAIClassifier::new(key);
        if let Some(model) = &self.openai_model {
            classifier = classifier.with_model(model.as_str());
        }
        if let Some(url) = &self.openai_base_url {
            classifier = classifier.with_base_url(url.as_str());
        }
        Some(classifier)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            provider: Provider::Google,
            google_api_key: None,
            google_engine_id: None,
            serper_api_key: None,
            openai_api_key: None,
            openai_model: None,
            openai_base_url: None,
            page_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("Serper").unwrap(), Provider::Serper);
        assert_eq!(Provider::parse(" google ").unwrap(), Provider::Google);
        assert!(Provider::parse("bing").is_err());
    }

    #[test]
    fn test_classifier_requires_key() {
        assert!(config().classifier().is_none());

        let configured = Config {
            openai_api_key: Some("sk-test".into()),
            openai_model: Some("gpt-4o".into()),
            ..config()
        };
        let classifier = configured.classifier().unwrap();
        assert_eq!(classifier.model(), "gpt-4o");
    }

    #[test]
    fn test_searcher_uses_configured_provider() {
        let serper = Config {
            provider: Provider::Serper,
            ..config()
        };
        assert_eq!(serper.searcher().provider_name(), "serper");
        assert_eq!(config().searcher().provider_name(), "google");
    }
}
