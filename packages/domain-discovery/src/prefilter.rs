//! Offline pattern prefilter.
//!
//! Cheap, deterministic reduction of the candidate list before any paid
//! model call. Domains that look like a variant of the company name are
//! protected and skip every other rule.

use serde::Serialize;
use tracing::{debug, info};

const SOCIAL: &[&str] = &[
    "facebook", "twitter", "instagram", "linkedin", "youtube", "tiktok", "pinterest", "snapchat",
    "reddit", "discord", "whatsapp", "telegram", "tumblr", "flickr", "vimeo", "vine",
];

const NEWS: &[&str] = &[
    "cnn", "bbc", "reuters", "ap", "nytimes", "wsj", "washingtonpost", "guardian", "times",
    "news", "article", "blog", "press", "media", "journalist", "magazine", "newspaper",
];

const SEARCH: &[&str] = &[
    "google", "bing", "yahoo", "duckduckgo", "baidu", "search", "ask", "dogpile",
];

const KNOWLEDGE: &[&str] = &[
    "wikipedia", "wikimedia", "britannica", "imdb", "allmusic", "musicbrainz", "fandom", "wiki",
    "encyclopedia", "reference", "dictionary", "thesaurus",
];

const INSTITUTIONS: &[&str] = &[
    "edu", "university", "college", "school", "academic", "research", "institute",
];

const GENERIC_SERVICES: &[&str] = &[
    "email", "mail", "hosting", "server", "cloud", "storage", "backup", "domain", "whois", "dns",
    "ssl", "cert", "security", "firewall", "antivirus",
];

const MARKETPLACES: &[&str] = &[
    "amazon", "ebay", "alibaba", "etsy", "shopify", "store", "shop", "marketplace", "ecommerce",
    "retail", "buy", "sell", "cart", "checkout", "payment",
];

const TECH_PLATFORMS: &[&str] = &[
    "github", "gitlab", "stackoverflow", "aws", "azure", "gcp", "digitalocean", "heroku",
    "netlify", "vercel", "cloudflare", "jsdelivr", "unpkg",
];

const FILE_SHARING: &[&str] = &[
    "dropbox", "drive", "onedrive", "icloud", "box", "mega", "mediafire", "file", "download",
    "upload", "share", "sync",
];

const GENERIC_WORDS: &[&str] = &[
    "free", "online", "web", "site", "page", "home", "www", "http", "https", "test", "demo",
    "example", "sample", "tmp", "temp", "dev", "staging", "api", "cdn", "static", "assets",
    "images", "img", "photos", "pics",
];

const FILE_EXTENSIONS: &[&str] = &[".jpg", ".png", ".gif", ".pdf", ".doc", ".zip"];

/// Share of digit characters above which a domain is treated as noise.
const MAX_DIGIT_RATIO: f64 = 0.7;

/// Every built-in exclusion pattern, grouped by category.
pub fn builtin_patterns() -> impl Iterator<Item = (&'static str, &'static str)> {
    [
        ("social", SOCIAL),
        ("news", NEWS),
        ("search", SEARCH),
        ("knowledge", KNOWLEDGE),
        ("institution", INSTITUTIONS),
        ("generic_service", GENERIC_SERVICES),
        ("marketplace", MARKETPLACES),
        ("tech_platform", TECH_PLATFORMS),
        ("file_sharing", FILE_SHARING),
        ("generic_word", GENERIC_WORDS),
    ]
    .into_iter()
    .flat_map(|(category, patterns)| patterns.iter().map(move |p| (category, *p)))
}

/// Why a domain was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Contains a known non-company substring
    Pattern { category: String, pattern: String },
    /// All digits, or two characters or fewer
    TooShortOrNumeric,
    /// Contains a binary file extension token
    FileExtension { extension: String },
    /// More than 70% digits
    MostlyDigits,
}

/// Per-domain decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Looks like the company's own name; exempt from every rule
    Protected,
    Kept,
    Excluded(ExclusionReason),
}

impl Verdict {
    pub fn is_kept(&self) -> bool {
        !matches!(self, Verdict::Excluded(_))
    }
}

/// Kept and excluded domains from one prefilter pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrefilterOutcome {
    pub kept: Vec<String>,
    pub excluded: Vec<(String, ExclusionReason)>,
}

impl PrefilterOutcome {
    pub fn excluded_domains(&self) -> Vec<String> {
        self.excluded.iter().map(|(domain, _)| domain.clone()).collect()
    }
}

/// Pattern-based prefilter with company-name protection.
#[derive(Debug, Clone, Default)]
pub struct HeuristicPrefilter {
    extra_patterns: Vec<String>,
}

impl HeuristicPrefilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add substrings to exclude on top of the built-in list.
    pub fn with_extra_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.extra_patterns.extend(
            patterns
                .into_iter()
                .map(|p| p.into().trim().to_lowercase())
                .filter(|p| !p.is_empty()),
        );
        self
    }

    /// Decide a single domain.
    pub fn verdict(&self, domain: &str, company: &str) -> Verdict {
        let domain = domain.trim().to_lowercase();

        if is_protected(&domain, company) {
            return Verdict::Protected;
        }

        if let Some((category, pattern)) = builtin_patterns().find(|(_, p)| domain.contains(p)) {
            return Verdict::Excluded(ExclusionReason::Pattern {
                category: category.to_string(),
                pattern: pattern.to_string(),
            });
        }

        if let Some(pattern) = self.extra_patterns.iter().find(|p| domain.contains(p.as_str())) {
            return Verdict::Excluded(ExclusionReason::Pattern {
                category: "custom".to_string(),
                pattern: pattern.clone(),
            });
        }

        let char_count = domain.chars().count();
        if char_count <= 2 || domain.chars().all(|c| c.is_ascii_digit()) {
            return Verdict::Excluded(ExclusionReason::TooShortOrNumeric);
        }

        if let Some(ext) = FILE_EXTENSIONS.iter().find(|ext| domain.contains(*ext)) {
            return Verdict::Excluded(ExclusionReason::FileExtension {
                extension: ext.to_string(),
            });
        }

        let digits = domain.chars().filter(|c| c.is_ascii_digit()).count();
        if digits as f64 > char_count as f64 * MAX_DIGIT_RATIO {
            return Verdict::Excluded(ExclusionReason::MostlyDigits);
        }

        Verdict::Kept
    }

    /// Run every domain through [`verdict`](Self::verdict), preserving order.
    pub fn apply(&self, domains: &[String], company: &str) -> PrefilterOutcome {
        let mut outcome = PrefilterOutcome::default();

        for domain in domains {
            match self.verdict(domain, company) {
                Verdict::Excluded(reason) => {
                    debug!(domain = %domain, reason = ?reason, "prefilter excluded domain");
                    outcome.excluded.push((domain.clone(), reason));
                }
                Verdict::Protected => {
                    debug!(domain = %domain, company, "prefilter protected company domain");
                    outcome.kept.push(domain.clone());
                }
                Verdict::Kept => outcome.kept.push(domain.clone()),
            }
        }

        info!(
            before = domains.len(),
            after = outcome.kept.len(),
            removed = outcome.excluded.len(),
            "prefilter applied"
        );

        outcome
    }
}

/// Prefilter with the built-in pattern list only.
pub fn prefilter(domains: &[String], company: &str) -> Vec<String> {
    HeuristicPrefilter::new().apply(domains, company).kept
}

/// Company name as compared against domain labels: lowercase, no whitespace.
pub(crate) fn company_key(company: &str) -> String {
    company
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when `domain` (already lowercase) reads as a variant of `company`.
///
/// Names of two characters or fewer never protect anything; they would
/// match half the web.
pub fn is_protected(domain: &str, company: &str) -> bool {
    let company = company_key(company);
    if company.chars().count() <= 2 {
        return false;
    }

    let dehyphenated = domain.replace('-', "");
    domain.starts_with(&company)
        || dehyphenated.starts_with(&company)
        || (domain.contains(&company) && domain.ends_with(&company))
}
