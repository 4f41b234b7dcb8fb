//! HTTP content fetching with a primary and a fallback extraction strategy
//!
//! Fetches web page content from URLs returned by search results.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::{Host, Url};

use super::config::{ContentFetchConfig, BOT_USER_AGENT, BROWSER_USER_AGENT};
use super::extractor::{extract_main_content, extract_visible_text};

/// Content fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),
    /// HTTP request error (connection refused, TLS, redirects)
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),
    /// Response is not an HTML document
    #[error("Unsupported content type {0} for: {1}")]
    UnsupportedContent(String, String),
    /// No content could be extracted
    #[error("No content extracted from: {0}")]
    NoContent(String),
    /// URL is unsafe (localhost, private IP, non-http scheme)
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
}

/// One way of turning a URL into page text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Fetch `url` and return its extracted text
    async fn extract(&self, url: &str) -> Result<String, FetchError>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// HTML page fetcher with a fixed identification header
pub struct HtmlFetcher {
    client: Client,
    allow_private_hosts: bool,
}

impl HtmlFetcher {
    /// Create a fetcher that identifies itself with `user_agent`
    pub fn new(config: &ContentFetchConfig, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_per_page_secs))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            allow_private_hosts: config.allow_private_hosts,
        })
    }

    /// Fetch the raw HTML of a page
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        if !is_safe_url(url, self.allow_private_hosts) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            let content_type = content_type.to_lowercase();
            if !(content_type.contains("html") || content_type.starts_with("text/")) {
                return Err(FetchError::UnsupportedContent(content_type, url.to_string()));
            }
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })
    }
}

/// Primary strategy: boilerplate-removing main content extraction
pub struct MainContentStrategy {
    fetcher: HtmlFetcher,
    max_chars: usize,
}

impl MainContentStrategy {
    pub fn new(config: &ContentFetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: HtmlFetcher::new(config, BOT_USER_AGENT)?,
            max_chars: config.max_chars_per_page,
        })
    }
}

#[async_trait]
impl ExtractionStrategy for MainContentStrategy {
    async fn extract(&self, url: &str) -> Result<String, FetchError> {
        let html = self.fetcher.fetch_html(url).await?;
        Ok(extract_main_content(&html, self.max_chars))
    }

    fn name(&self) -> &'static str {
        "main-content"
    }
}

/// Fallback strategy: browser-identified fetch, all visible text nodes
pub struct VisibleTextStrategy {
    fetcher: HtmlFetcher,
    max_chars: usize,
}

impl VisibleTextStrategy {
    pub fn new(config: &ContentFetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: HtmlFetcher::new(config, BROWSER_USER_AGENT)?,
            max_chars: config.max_chars_per_page,
        })
    }
}

#[async_trait]
impl ExtractionStrategy for VisibleTextStrategy {
    async fn extract(&self, url: &str) -> Result<String, FetchError> {
        let html = self.fetcher.fetch_html(url).await?;
        Ok(extract_visible_text(&html, self.max_chars))
    }

    fn name(&self) -> &'static str {
        "visible-text"
    }
}

/// Content extractor: primary strategy, then fallback once
///
/// Never fails. A URL whose text cannot be fetched or is too short
/// yields `None`.
pub struct ContentExtractor {
    primary: Arc<dyn ExtractionStrategy>,
    fallback: Arc<dyn ExtractionStrategy>,
    min_usable_chars: usize,
    max_pages: usize,
}

impl ContentExtractor {
    /// Create an extractor with the HTTP strategies
    pub fn from_config(config: &ContentFetchConfig) -> Result<Self, FetchError> {
        Ok(Self::with_strategies(
            Arc::new(MainContentStrategy::new(config)?),
            Arc::new(VisibleTextStrategy::new(config)?),
            config,
        ))
    }

    /// Create an extractor around arbitrary strategies
    pub fn with_strategies(
        primary: Arc<dyn ExtractionStrategy>,
        fallback: Arc<dyn ExtractionStrategy>,
        config: &ContentFetchConfig,
    ) -> Self {
        Self {
            primary,
            fallback,
            min_usable_chars: config.min_usable_chars,
            max_pages: config.max_pages,
        }
    }

    /// Whether text counts as a successful extraction
    pub fn is_usable(&self, text: &str) -> bool {
        text.trim().chars().count() > self.min_usable_chars
    }

    /// Extract page text, trying the fallback once if the primary is not usable
    pub async fn extract(&self, url: &str) -> Option<String> {
        match self.primary.extract(url).await {
            Ok(text) if self.is_usable(&text) => {
                info!("Extracted {} chars from {} ({})", text.len(), url, self.primary.name());
                return Some(text.trim().to_string());
            }
            Ok(_) => debug!("{} yielded no usable text for {}", self.primary.name(), url),
            Err(e) => debug!("{} failed for {}: {}", self.primary.name(), url, e),
        }

        match self.fallback.extract(url).await {
            Ok(text) if self.is_usable(&text) => {
                info!("Extracted {} chars from {} ({})", text.len(), url, self.fallback.name());
                Some(text.trim().to_string())
            }
            Ok(_) => {
                warn!("No usable content from {}", url);
                None
            }
            Err(e) => {
                warn!("Content extraction failed for {}: {}", url, e);
                None
            }
        }
    }

    /// Extract several URLs with bounded concurrency
    ///
    /// At most `max_pages` URLs are fetched. Results keep input order.
    pub async fn extract_many(&self, urls: &[String], concurrency: usize) -> Vec<Option<String>> {
        stream::iter(urls.iter().take(self.max_pages))
            .map(|url| self.extract(url))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}

/// Check if URL is safe to fetch (http(s), not localhost or private ranges)
pub fn is_safe_url(url: &str, allow_private_hosts: bool) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };

    // Only allow http/https
    if !["http", "https"].contains(&parsed.scheme()) {
        return false;
    }

    if allow_private_hosts {
        return parsed.host().is_some();
    }

    match parsed.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_lowercase();
            domain != "localhost" && !domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => !is_private_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => !is_private_ip(IpAddr::V6(ip)),
        None => false,
    }
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
        }
        IpAddr::V6(v6) => {
            v6.is_loopback() || v6.is_unspecified() || (v6.segments()[0] & 0xfe00) == 0xfc00
        }
    }
}
