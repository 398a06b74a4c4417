//! Registrable-domain extraction backed by the public suffix list.

use psl::Type;
use serde::{Deserialize, Serialize};
use url::{Host, Url};

/// The registrable label of a host and its public suffix.
///
/// `https://www.acme.co.uk/path` gives `{ label: "acme", suffix: "co.uk" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainParts {
    pub label: String,
    pub suffix: String,
}

impl DomainParts {
    /// `label.suffix`
    pub fn registrable(&self) -> String {
        format!("{}.{}", self.label, self.suffix)
    }
}

/// Extract `(label, suffix)` from a URL.
///
/// Returns `None` for unparseable input, IP literals, single-label hosts and
/// hosts with no ICANN suffix on the public suffix list. Inputs without a
/// scheme (`acme.com/about`) are retried as `http://`.
pub fn extract_domain(url: &str) -> Option<DomainParts> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{url}")).ok()?,
        Err(_) => return None,
    };

    let host = match parsed.host()? {
        Host::Domain(host) => host.trim_end_matches('.').to_lowercase(),
        Host::Ipv4(_) | Host::Ipv6(_) => return None,
    };

    split_host(&host)
}

/// Split a bare hostname into its registrable label and ICANN suffix.
///
/// Private-section entries of the suffix list are not treated as suffixes:
/// `acme.github.io` splits into `github` and `io`.
pub fn split_host(host: &str) -> Option<DomainParts> {
    let host = host.trim().trim_end_matches('.').to_lowercase();
    addr::parse_domain_name(&host).ok()?;

    let suffix = icann_suffix(&host)?;
    let rest = host.strip_suffix(suffix)?.strip_suffix('.')?;
    let label = rest.rsplit('.').next()?;

    if label.is_empty() {
        return None;
    }

    Some(DomainParts {
        label: label.to_string(),
        suffix: suffix.to_string(),
    })
}

/// Longest ICANN suffix of `host`. A private match is dropped one label at a
/// time until the lookup lands on an ICANN entry.
fn icann_suffix(host: &str) -> Option<&str> {
    let mut candidate = host;
    loop {
        let suffix = psl::suffix(candidate.as_bytes())?;
        let matched = &candidate[candidate.len() - suffix.as_bytes().len()..];
        match suffix.typ()? {
            Type::Icann => return Some(matched),
            Type::Private => candidate = matched.split_once('.')?.1,
        }
    }
}

/// Registrable labels for every URL that has one, in input order.
pub fn extract_labels<'a>(links: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    links
        .into_iter()
        .filter_map(|link| {
            let parts = extract_domain(link);
            if parts.is_none() {
                tracing::trace!(link, "no registrable domain");
            }
            parts
        })
        .map(|parts| parts.label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(label: &str, suffix: &str) -> Option<DomainParts> {
        Some(DomainParts {
            label: label.into(),
            suffix: suffix.into(),
        })
    }

    #[test]
    fn test_simple_and_multi_part_suffixes() {
        assert_eq!(extract_domain("https://www.acme.com/about"), parts("acme", "com"));
        assert_eq!(extract_domain("https://www.acme.co.uk/path"), parts("acme", "co.uk"));
        assert_eq!(extract_domain("http://shop.eu.acme.com.au"), parts("acme", "com.au"));
    }

    #[test]
    fn test_case_is_normalized() {
        assert_eq!(extract_domain("HTTPS://WWW.ACME.DE/Impressum"), parts("acme", "de"));
    }

    #[test]
    fn test_scheme_less_input() {
        assert_eq!(extract_domain("acme.fr/contact"), parts("acme", "fr"));
    }

    #[test]
    fn test_no_registrable_domain() {
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("not a url"), None);
        assert_eq!(extract_domain("http://192.168.1.10/admin"), None);
        assert_eq!(extract_domain("http://[::1]:8080/"), None);
        assert_eq!(extract_domain("http://localhost:3000"), None);
        assert_eq!(extract_domain("https://co.uk"), None);
        assert_eq!(extract_domain("mailto:someone@acme.com"), None);
    }

    #[test]
    fn test_platform_hosts_resolve_to_the_platform() {
        assert_eq!(extract_domain("https://someuser.github.io/acme"), parts("github", "io"));
        assert_eq!(extract_domain("https://acmefans.blogspot.com/"), parts("blogspot", "com"));
        assert_eq!(extract_domain("https://acme.herokuapp.com/login"), parts("herokuapp", "com"));
        assert_eq!(split_host("github.io"), parts("github", "io"));
    }

    #[test]
    fn test_registrable() {
        let parts = extract_domain("https://www.acme.co.uk").unwrap();
        assert_eq!(parts.registrable(), "acme.co.uk");
    }

    #[test]
    fn test_extract_labels_drops_misses() {
        let labels = extract_labels([
            "https://www.acme.com",
            "http://10.0.0.1",
            "https://en.wikipedia.org/wiki/Acme",
        ]);
        assert_eq!(labels, vec!["acme", "wikipedia"]);
    }
}
