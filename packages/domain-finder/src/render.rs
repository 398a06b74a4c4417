//! Terminal and JSON output.

use anyhow::{Context, Result};
use colored::Colorize;
use domain_discovery::{DiscoveryReport, ExpansionReport, ExpansionStop, FilterStatus, RankedRoot};
use serde::Serialize;

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}

pub fn root_url(label: &str) -> String {
    format!("https://www.{label}.com")
}

/// One root as shown in lists: URL plus hit count.
pub fn root_line(root: &RankedRoot) -> String {
    let hits = if root.occurrences == 1 { "hit" } else { "hits" };
    format!("{}  ({} {hits})", root_url(&root.label), root.occurrences)
}

pub fn print_discovery(report: &DiscoveryReport) {
    println!();
    if report.roots.is_empty() {
        println!(
            "{}",
            format!("No root domains found for \"{}\".", report.company).yellow()
        );
    } else {
        println!(
            "{}",
            format!("Root domains for \"{}\"", report.company).bright_cyan().bold()
        );
        for (i, root) in report.roots.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, root_line(root));
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "{} queries, {} unique links, {} candidates, {} kept",
            report.queries.len(),
            report.unique_links,
            report.candidates.len(),
            report.roots.len()
        )
        .dimmed()
    );
    if !report.filter.prefiltered_out.is_empty() {
        println!(
            "{}",
            format!("prefiltered: {}", report.filter.prefiltered_out.join(", ")).dimmed()
        );
    }
    if !report.filter.classifier_excluded.is_empty() {
        println!(
            "{}",
            format!("classifier excluded: {}", report.filter.classifier_excluded.join(", ")).dimmed()
        );
    }
    print_filter_status(&report.filter.status);
    print_failures(report.search_failures.iter().map(|f| (&f.query, &f.message)));
}

pub fn print_expansion(report: &ExpansionReport) {
    println!();
    println!(
        "{}",
        format!("Domains for \"{}\"", report.root).bright_cyan().bold()
    );
    for domain in &report.domains {
        println!("  {domain}");
    }

    let stop = match report.stop {
        ExpansionStop::Exhausted => "search exhausted",
        ExpansionStop::NoNewSuffix => "no new suffix found",
        ExpansionStop::IterationCap => "iteration cap reached",
    };
    println!();
    println!(
        "{}",
        format!("{} queries, stopped: {stop}", report.queries.len()).dimmed()
    );
    print_failures(report.search_failures.iter().map(|f| (&f.query, &f.message)));
}

fn print_filter_status(status: &FilterStatus) {
    match status {
        FilterStatus::NotConfigured => println!(
            "{}",
            "LLM filter not configured (set OPENAI_API_KEY); results are unfiltered".yellow()
        ),
        FilterStatus::Degraded { error } => println!(
            "{}",
            format!("LLM filter failed, showing prefiltered results: {error}").yellow()
        ),
        _ => {}
    }
}

fn print_failures<'a>(failures: impl Iterator<Item = (&'a String, &'a String)>) {
    for (query, message) in failures {
        println!(
            "{}",
            format!("search failed for {query}: {message}").red()
        );
    }
}
