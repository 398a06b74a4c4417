//! HTTP-level tests for the provider clients against a local mock server.

use search_client::{GoogleSearchClient, PageRequest, SearchError, SearchProvider, SerperClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_google_fetch_page_sends_quota_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "engine"))
        .and(query_param("q", "\"Acme\" headquarters"))
        .and(query_param("num", "10"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "searchInformation": { "totalResults": "42" },
            "items": [
                { "link": "https://www.acme.com/about" },
                { "link": "https://www.acme.co.uk/" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new("test-key", "engine")
        .with_base_url(format!("{}/customsearch/v1", server.uri()));

    let page = client
        .fetch_page(&PageRequest::new("\"Acme\" headquarters", 10, 10))
        .await
        .unwrap();

    let links: Vec<&str> = page.links().collect();
    assert_eq!(links, vec!["https://www.acme.com/about", "https://www.acme.co.uk/"]);
    assert_eq!(page.total_results, Some(42));
}

#[tokio::test]
async fn test_google_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new("k", "cx").with_base_url(server.uri());
    let err = client
        .fetch_page(&PageRequest::new("acme", 0, 10))
        .await
        .unwrap_err();

    match err {
        SearchError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "backend exploded");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_google_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = GoogleSearchClient::new("k", "cx").with_base_url(server.uri());
    let err = client
        .fetch_page(&PageRequest::new("acme", 0, 10))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Parse(_)));
}

#[tokio::test]
async fn test_serper_posts_json_with_api_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "serper-key"))
        .and(body_json(serde_json::json!({ "q": "site:www.acme.* -com", "num": 100, "page": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "organic": [
                { "link": "https://www.acme.de/", "title": "Acme DE" },
                { "link": "https://www.acme.fr/" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SerperClient::new("serper-key").with_base_url(format!("{}/search", server.uri()));
    let page = client
        .fetch_page(&PageRequest::new("site:www.acme.* -com", 0, 100))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.items[0].title.as_deref(), Some("Acme DE"));
}

#[tokio::test]
async fn test_serper_rejected_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized."))
        .mount(&server)
        .await;

    let client = SerperClient::new("bad").with_base_url(server.uri());
    let err = client
        .fetch_page(&PageRequest::new("acme", 0, 10))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Api { status: 403, .. }));
}
