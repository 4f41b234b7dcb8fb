// SerpAPI client tests against a local mock server

use clinical_interest_mapper::search::{SearchConfig, SearchError, SearchProvider, SearchService, SerpApiProvider};
use mockito::Matcher;

const BODY: &str = r#"{
    "search_metadata": {"status": "Success"},
    "organic_results": [
        {"position": 1, "title": "Dr. Jane Doe | Healthgrades", "link": "https://www.healthgrades.com/physician/dr-jane-doe", "snippet": "Dr. Doe treats hip arthritis and performs hip replacement."},
        {"position": 2, "title": "No link here", "snippet": "dropped"},
        {"position": 3, "title": "Jane Doe, MD", "link": "https://www.example.edu/doe", "snippet": "   "}
    ]
}"#;

fn config(base_url: String) -> SearchConfig {
    SearchConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        num_results: 5,
        ..SearchConfig::default()
    }
}

#[tokio::test]
async fn test_search_sends_expected_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("engine".into(), "google".into()),
            Matcher::UrlEncoded("q".into(), "\"Jane Doe\" Orthopedics".into()),
            Matcher::UrlEncoded("api_key".into(), "test-key".into()),
            Matcher::UrlEncoded("num".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BODY)
        .create_async()
        .await;

    let provider = SerpApiProvider::new(&config(format!("{}/search", server.url()))).unwrap();
    let results = provider.search("\"Jane Doe\" Orthopedics", 5).await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "https://www.healthgrades.com/physician/dr-jane-doe");
    assert!(results[0].snippet.as_deref().unwrap().contains("hip replacement"));
    assert_eq!(results[1].snippet, None);
}

#[tokio::test]
async fn test_server_error_is_contained_by_service() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let service = SearchService::from_config(&config(format!("{}/search", server.url()))).unwrap();
    let response = service.search("anything").await;

    mock.assert_async().await;
    assert!(response.results.is_empty());
    assert!(response.is_failure());
    assert_eq!(response.provider, "serpapi");
}

#[tokio::test]
async fn test_rate_limit_and_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _limited = server
        .mock("GET", "/limited")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;
    let _garbage = server
        .mock("GET", "/garbage")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let limited = SerpApiProvider::new(&config(format!("{}/limited", server.url()))).unwrap();
    assert!(matches!(
        limited.search("q", 5).await,
        Err(SearchError::RateLimited { .. })
    ));

    let garbage = SerpApiProvider::new(&config(format!("{}/garbage", server.url()))).unwrap();
    assert!(matches!(
        garbage.search("q", 5).await,
        Err(SearchError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_provider_error_field() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "Invalid API key."}"#)
        .create_async()
        .await;

    let provider = SerpApiProvider::new(&config(format!("{}/search", server.url()))).unwrap();
    match provider.search("q", 5).await {
        Err(SearchError::ApiError { message, .. }) => assert_eq!(message, "Invalid API key."),
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[test]
fn test_missing_key_fails_before_any_request() {
    let config = SearchConfig {
        api_key: None,
        ..SearchConfig::default()
    };
    assert!(matches!(
        SerpApiProvider::new(&config),
        Err(SearchError::NoApiKey { .. })
    ));
}
