// Page fetching and extraction tests against a local mock server

use clinical_interest_mapper::search::content::fetcher::is_safe_url;
use clinical_interest_mapper::search::{ContentExtractor, ContentFetchConfig};

const PROFILE_PAGE: &str = r#"<html>
<head><title>Dr. Jane Doe</title><style>body { color: red; }</style></head>
<body>
  <nav>Home | Find a Doctor | Locations</nav>
  <article>
    <h1>Jane Doe, MD</h1>
    <p>Dr. Doe is a board-certified orthopedic surgeon specializing in hip replacement,
    knee replacement and revision arthroplasty. She leads the joint reconstruction program
    and has performed more than two thousand procedures.</p>
  </article>
  <footer>Copyright 2025 Example Health</footer>
  <script>trackVisit();</script>
</body>
</html>"#;

const HEADER_ONLY_PAGE: &str = r#"<html><body>
  <header>Dr. Sam Lee practices sports medicine with a focus on ACL reconstruction, meniscus repair and rotator cuff repair for athletes of all ages.</header>
  <p>Book now.</p>
</body></html>"#;

fn local_config() -> ContentFetchConfig {
    ContentFetchConfig {
        allow_private_hosts: true,
        ..ContentFetchConfig::default()
    }
}

#[tokio::test]
async fn test_extracts_article_without_boilerplate() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/doe")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(PROFILE_PAGE)
        .create_async()
        .await;

    let extractor = ContentExtractor::from_config(&local_config()).unwrap();
    let text = extractor
        .extract(&format!("{}/doe", server.url()))
        .await
        .unwrap();

    assert!(text.contains("hip replacement"));
    assert!(!text.contains("Find a Doctor"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains("trackVisit"));
}

#[tokio::test]
async fn test_falls_back_to_visible_text() {
    let mut server = mockito::Server::new_async().await;
    let page = server
        .mock("GET", "/lee")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(HEADER_ONLY_PAGE)
        .expect(2)
        .create_async()
        .await;

    let extractor = ContentExtractor::from_config(&local_config()).unwrap();
    let text = extractor
        .extract(&format!("{}/lee", server.url()))
        .await
        .unwrap();

    page.assert_async().await;
    assert!(text.contains("ACL reconstruction"));
    assert!(text.contains("Book now."));
}

#[tokio::test]
async fn test_failures_yield_none() {
    let mut server = mockito::Server::new_async().await;
    let _missing = server.mock("GET", "/missing").with_status(404).create_async().await;
    let _pdf = server
        .mock("GET", "/cv.pdf")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.4")
        .create_async()
        .await;

    let extractor = ContentExtractor::from_config(&local_config()).unwrap();
    assert!(extractor.extract(&format!("{}/missing", server.url())).await.is_none());
    assert!(extractor.extract(&format!("{}/cv.pdf", server.url())).await.is_none());
}

#[tokio::test]
async fn test_private_hosts_blocked_by_default() {
    let mut server = mockito::Server::new_async().await;
    let page = server
        .mock("GET", "/doe")
        .with_status(200)
        .with_body(PROFILE_PAGE)
        .expect(0)
        .create_async()
        .await;

    let extractor = ContentExtractor::from_config(&ContentFetchConfig::default()).unwrap();
    assert!(extractor.extract(&format!("{}/doe", server.url())).await.is_none());
    page.assert_async().await;
}

#[tokio::test]
async fn test_extract_many_keeps_order_and_limit() {
    let mut server = mockito::Server::new_async().await;
    let _doe = server
        .mock("GET", "/doe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(PROFILE_PAGE)
        .create_async()
        .await;
    let _missing = server.mock("GET", "/missing").with_status(404).create_async().await;

    let config = ContentFetchConfig {
        max_pages: 2,
        ..local_config()
    };
    let extractor = ContentExtractor::from_config(&config).unwrap();
    let urls = vec![
        format!("{}/missing", server.url()),
        format!("{}/doe", server.url()),
        format!("{}/doe", server.url()),
    ];

    let texts = extractor.extract_many(&urls, 4).await;
    assert_eq!(texts.len(), 2);
    assert!(texts[0].is_none());
    assert!(texts[1].as_deref().unwrap().contains("Jane Doe"));
}

#[test]
fn test_url_safety() {
    assert!(is_safe_url("https://www.healthgrades.com/physician/x", false));
    assert!(!is_safe_url("ftp://example.com/file", false));
    assert!(!is_safe_url("http://localhost:8080/", false));
    assert!(!is_safe_url("http://10.0.0.5/admin", false));
    assert!(!is_safe_url("http://192.168.1.1/", false));
    assert!(is_safe_url("http://127.0.0.1:1234/", true));
    assert!(!is_safe_url("not a url", true));
}
