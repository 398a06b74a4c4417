//! Exclusion prompt and response parsing.
//!
//! The prompt text is a contract with the model, not pipeline logic: any
//! classifier that returns a comma-separated list of excluded labels can
//! stand in for it.

use std::collections::HashSet;

pub const SYSTEM_PROMPT: &str = "You are a precise domain classification expert. \
Follow instructions exactly and return only the requested format.";

/// Categories the model is asked to exclude, in prompt order.
pub const EXCLUDED_CATEGORIES: [&str; 17] = [
    "Social media platforms: Facebook, Twitter/X, Instagram, LinkedIn, TikTok, YouTube, Pinterest, Snapchat, Reddit, WhatsApp, Telegram, Discord",
    "News and media outlets: CNN, BBC, Reuters, Associated Press, New York Times, Washington Post, Fox News, NBC, ABC, CBS, CNBC, Bloomberg",
    "Online encyclopedias: Wikipedia, Britannica, Fandom wikis",
    "Search engines: Google, Bing, Yahoo, DuckDuckGo, Baidu",
    "Public knowledge directories: IMDB, AllMusic, MusicBrainz",
    "General information sites: About.com, eHow, WikiHow",
    "Government websites: .gov domains and official government portals",
    "Educational institutions: universities, schools, .edu domains",
    "Non-profit organizations: major NGOs, charities, foundations",
    "Public forums and communities: Stack Overflow, Quora, discussion boards",
    "File sharing and cloud storage: Dropbox, Google Drive, OneDrive",
    "Generic service providers: email services, web hosting, domain registrars",
    "General technology platforms: GitHub, GitLab, AWS, Azure, GCP",
    "Online marketplaces: Amazon, eBay, Alibaba",
    "Job portals: LinkedIn, Indeed, Glassdoor",
    "Trade sites: Alibaba, Amazon, eBay and other B2B/B2C trading hubs",
    "Payment and money sites: PayPal, Stripe",
];

/// Build the user prompt for one classification call.
///
/// Every candidate is rendered as `<label>.com` whatever its real suffix.
pub fn build_prompt(domains: &[String], company: &str) -> String {
    let categories = EXCLUDED_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, category)| format!("{}. {}", i + 1, category))
        .collect::<Vec<_>>()
        .join("\n");

    let candidates = domains
        .iter()
        .map(|d| format!("{d}.com"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are classifying domains found while searching for the company \"{company}\".\n\
\n\
Flag the domains that must be EXCLUDED from the company's domain list.\n\
\n\
COMPANY CONTEXT: the target is \"{company}\". Keep anything that may belong to the company, \
its subsidiaries, brands or regional offices. A company domain does not have to contain the \
company name.\n\
\n\
EXCLUDE ONLY THESE CATEGORIES:\n\
{categories}\n\
\n\
RULES:\n\
- Be strict about the categories above.\n\
- Be protective of anything that could be a variant of the company name.\n\
- When in doubt about a company variant, do NOT flag it.\n\
- Unrelated companies may be flagged.\n\
\n\
EXAMPLE for company \"Sonepar\": flag linkedin, wikipedia, amazon, microsoft; \
keep sonepar, soneparusa, sonepar-us, soneparcanada.\n\
\n\
FORMAT: return ONLY a comma-separated list of the bare names (without .com) to exclude, \
or \"none\". No explanations.\n\
\n\
DOMAINS:\n\
{candidates}\n\
\n\
EXCLUDE:"
    )
}

/// Parse the model's free-text answer into bare lowercase labels.
///
/// Accepts commas or newlines as separators, tolerates code fences, list
/// bullets, quotes, a trailing `.com` and stray periods. `none` and empty
/// entries are dropped.
pub fn parse_exclusions(response: &str) -> HashSet<String> {
    let body = strip_code_fence(response);

    body.split([',', '\n'])
        .filter_map(normalize_entry)
        .collect()
}

fn normalize_entry(entry: &str) -> Option<String> {
    let entry = entry
        .trim()
        .trim_start_matches(['-', '*', '•'])
        .trim()
        .trim_matches(['"', '\'', '`'])
        .trim()
        .to_lowercase();

    let entry = entry.strip_suffix(".com").unwrap_or(&entry);
    let entry = entry.trim_matches('.').trim();

    if entry.is_empty() || entry == "none" {
        return None;
    }
    Some(entry.to_string())
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop a language tag on the opening fence.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
