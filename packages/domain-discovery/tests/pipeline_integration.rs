//! End-to-end pipeline tests against mock HTTP providers.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use domain_discovery::{
    DiscoveryConfig, DiscoveryError, DomainFilter, DomainFinder, ExpansionStop, FilterMode,
    FilterStatus, OpenAIClassifier, PaginatedSearcher, SearchOutcome, WebSearcher,
};
use search_client::GoogleSearchClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn google_items(links: &[String]) -> serde_json::Value {
    let items: Vec<_> = links.iter().map(|link| json!({ "link": link })).collect();
    json!({ "items": items })
}

fn google_searcher(server: &MockServer) -> PaginatedSearcher {
    let client = GoogleSearchClient::new("test-key", "engine").with_base_url(server.uri());
    PaginatedSearcher::new(client).with_page_delay(Duration::ZERO)
}

fn chat_completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn test_provider_500_returns_empty_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = google_searcher(&server).search("acme", 30).await.unwrap();

    assert!(outcome.links.is_empty());
    let failure = outcome.failure.expect("failure recorded");
    assert_eq!(failure.provider, "google");
    assert_eq!(failure.page, 0);
}

#[tokio::test]
async fn test_pagination_stops_on_short_page() {
    let server = MockServer::start().await;
    let first: Vec<String> = (0..10).map(|i| format!("https://site{i}.com/")).collect();
    let second: Vec<String> = (10..13).map(|i| format!("https://site{i}.com/")).collect();

    Mock::given(method("GET"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_items(&first)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_items(&second)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = google_searcher(&server).search("acme", 100).await.unwrap();

    assert_eq!(outcome.links.len(), 13);
    assert_eq!(outcome.pages_fetched, 2);
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn test_missing_credentials_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new("", "engine").with_base_url(server.uri());
    let searcher = PaginatedSearcher::new(client);

    let result = searcher.search("acme", 10).await;
    assert!(matches!(
        result,
        Err(DiscoveryError::MissingCredentials { provider: "google", .. })
    ));
}

#[tokio::test]
async fn test_openai_classifier_request_and_parse() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini", "max_tokens": 500 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion("Zenithbank.com, none")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let classifier = OpenAIClassifier::new("sk-test").with_base_url(server.uri());
    let filter = DomainFilter::new(FilterMode::HeuristicThenLlm).with_classifier(classifier);

    let report = filter
        .filter(
            &["acme".to_string(), "zenithbank".to_string(), "twitter".to_string()],
            "Acme",
        )
        .await;

    assert_eq!(report.kept, vec!["acme"]);
    assert_eq!(report.prefiltered_out, vec!["twitter"]);
    assert_eq!(report.classifier_excluded, vec!["zenithbank"]);
    assert_eq!(report.status, FilterStatus::Classified);
}

#[tokio::test]
async fn test_openai_failure_degrades_to_prefiltered_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let classifier = OpenAIClassifier::new("sk-test").with_base_url(server.uri());
    let filter = DomainFilter::new(FilterMode::HeuristicThenLlm).with_classifier(classifier);

    let report = filter
        .filter(&["acme".to_string(), "linkedin".to_string(), "quorvex".to_string()], "acme")
        .await;

    assert_eq!(report.kept, vec!["acme", "quorvex"]);
    match report.status {
        FilterStatus::Degraded { error } => assert!(error.contains("429")),
        other => panic!("expected degraded status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_discover_roots_is_idempotent_and_cached() {
    let search_server = MockServer::start().await;
    let links = vec![
        "https://www.acme.com/".to_string(),
        "https://www.youtube.com/watch?v=acme".to_string(),
        "https://www.acme-industries.de/".to_string(),
        "https://www.quorvex.com/acme".to_string(),
        "https://www.acme.com/contact".to_string(),
    ];
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_items(&links)))
        .mount(&search_server)
        .await;

    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("quorvex")))
        .expect(1)
        .mount(&llm_server)
        .await;

    let finder = DomainFinder::new(google_searcher(&search_server))
        .with_config(DiscoveryConfig::new().without_delays())
        .with_classifier(OpenAIClassifier::new("sk-test").with_base_url(llm_server.uri()));

    let first = finder.discover_roots("Acme").await.unwrap();
    let second = finder.discover_roots("Acme").await.unwrap();

    assert_eq!(first, vec!["acme", "acme-industries"]);
    assert_eq!(first, second);
    assert_eq!(finder.filter().cache().len(), 1);
}

/// Answers every expansion query with a suffix it has not offered before.
struct EndlessSuffixes {
    calls: AtomicUsize,
}

const SUFFIXES: [&str; 24] = [
    "de", "fr", "it", "es", "nl", "be", "at", "ch", "se", "no", "dk", "fi", "pl", "pt", "ie",
    "cz", "hu", "ro", "gr", "sk", "bg", "lt", "lv", "ee",
];

#[async_trait]
impl WebSearcher for EndlessSuffixes {
    async fn search(&self, _query: &str, _limit: usize) -> domain_discovery::Result<SearchOutcome> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let suffix = SUFFIXES[n % SUFFIXES.len()];
        Ok(SearchOutcome::complete(vec![format!("https://www.acme.{suffix}/")]))
    }
}

#[tokio::test]
async fn test_expansion_terminates_at_iteration_cap() {
    let searcher = EndlessSuffixes {
        calls: AtomicUsize::new(0),
    };
    let finder = DomainFinder::new(searcher).with_config(DiscoveryConfig::new().without_delays());

    let report = finder.expand_report("acme").await.unwrap();

    assert_eq!(report.stop, ExpansionStop::IterationCap);
    assert_eq!(report.queries.len(), 20);
    assert_eq!(report.domains.len(), 21);
    assert!(report.domains.contains(&"https://www.acme.com".to_string()));

    // Every query excludes everything the previous one did.
    for pair in report.queries.windows(2) {
        let earlier: Vec<&str> = pair[0].split(' ').skip(1).collect();
        assert!(earlier.iter().all(|term| pair[1].split(' ').any(|t| t == *term)));
    }
}

#[tokio::test]
async fn test_expansion_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "site:www.acme.* -com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_items(&[
            "https://www.acme.co.uk/".to_string(),
            "https://www.acme.de/kontakt".to_string(),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "site:www.acme.* -co.uk -com -de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let finder = DomainFinder::new(google_searcher(&server))
        .with_config(DiscoveryConfig::new().without_delays());

    let domains = finder.expand("acme").await.unwrap();

    assert_eq!(
        domains,
        vec!["https://www.acme.co.uk", "https://www.acme.com", "https://www.acme.de"]
    );
}
