//! Company domain finder
//!
//! Discovers the root domains of a company through web search, filters out
//! non-company sites, and expands a root into every public suffix it is
//! registered under. Diagnostics go to stderr; results and `--json` reports
//! go to stdout.

mod config;
mod interactive;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use domain_discovery::{DiscoveryConfig, DiscoveryError, DomainFinder, FilterMode, PaginatedSearcher};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, Provider};

const DEFAULT_LOG_FILTER: &str = "warn,domain_discovery=info,search_client=info";
const VERBOSE_LOG_FILTER: &str = "warn,domain_discovery=debug,search_client=debug";

#[derive(Parser)]
#[command(name = "domain-finder")]
#[command(about = "Find the internet domains that belong to a company")]
struct Cli {
    /// Search API to use (overrides SEARCH_PROVIDER)
    #[arg(long, global = true, value_enum)]
    provider: Option<Provider>,

    /// Google Custom Search API key (overrides GOOGLE_SEARCH_API_KEY)
    #[arg(long, global = true)]
    google_api_key: Option<String>,

    /// Filter stages applied to discovered roots
    #[arg(long, global = true, value_enum, default_value_t = FilterArg::Llm)]
    filter: FilterArg,

    /// Never call the LLM classifier; prefilter only
    #[arg(long, global = true)]
    no_llm: bool,

    /// Debug logging for the discovery crates
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and rank a company's root domains
    Roots {
        company: String,
        /// Print the full discovery report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every public suffix a root is registered under
    Expand {
        root: String,
        /// Print the full expansion report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search, prune and expand from a menu
    Interactive { company: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterArg {
    /// Pattern prefilter only
    Heuristic,
    /// Pattern prefilter, then the LLM classifier
    Llm,
    /// LLM classifier on the unfiltered list
    LlmOnly,
}

impl FilterArg {
    fn mode(self, no_llm: bool) -> FilterMode {
        if no_llm {
            return FilterMode::Heuristic;
        }
        match self {
            FilterArg::Heuristic => FilterMode::Heuristic,
            FilterArg::Llm => FilterMode::HeuristicThenLlm,
            FilterArg::LlmOnly => FilterMode::LlmOnly,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if let Some(key) = cli.google_api_key.clone() {
        config.google_api_key = Some(key);
    }

    let finder = build_finder(&config, cli.filter.mode(cli.no_llm));

    let result = match cli.command {
        Commands::Roots { company, json } => {
            let report = finder.discover(&company).await;
            report.map(|report| {
                if json {
                    render::print_json(&report)
                } else {
                    render::print_discovery(&report);
                    Ok(())
                }
            })
        }
        Commands::Expand { root, json } => {
            let report = finder.expand_report(&root).await;
            report.map(|report| {
                if json {
                    render::print_json(&report)
                } else {
                    render::print_expansion(&report);
                    Ok(())
                }
            })
        }
        Commands::Interactive { company } => return interactive::run(&finder, company).await,
    };

    match result {
        Ok(printed) => printed,
        Err(DiscoveryError::MissingCredentials { provider, detail }) => Err(anyhow::anyhow!(
            "{detail}. Set the {} credentials in the environment or .env",
            credential_hint(provider)
        )),
        Err(e) => Err(e.into()),
    }
}

fn build_finder(config: &Config, mode: FilterMode) -> DomainFinder<PaginatedSearcher> {
    let finder = DomainFinder::new(config.searcher())
        .with_config(DiscoveryConfig::default().with_filter_mode(mode));

    if !mode.uses_classifier() {
        return finder;
    }

    match config.classifier() {
        Some(classifier) => {
            tracing::info!(model = classifier.model(), "LLM classifier enabled");
            finder.with_classifier(classifier)
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set; roots will not be LLM-filtered");
            finder
        }
    }
}

fn credential_hint(provider: &str) -> &'static str {
    match provider {
        "google" => "GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_ENGINE_ID",
        "serper" => "SERPER_API_KEY",
        _ => "search provider",
    }
}
