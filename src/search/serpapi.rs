// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SerpAPI search provider
//!
//! Implements web search using SerpAPI's JSON endpoint. Results come from
//! the `organic_results` array of the response.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::config::{SearchConfig, MAX_RESULTS_PER_QUERY};
use super::provider::SearchProvider;
use super::types::{SearchError, SearchResult};

/// SerpAPI search provider
pub struct SerpApiProvider {
    api_key: String,
    base_url: String,
    engine: String,
    language: Option<String>,
    timeout_ms: u64,
    client: Client,
}

impl SerpApiProvider {
    /// Create a new SerpAPI provider from search configuration
    ///
    /// Fails with `SearchError::NoApiKey` when no key is configured, so a
    /// missing credential is caught before any request is attempted.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SearchError::NoApiKey {
                provider: "serpapi".to_string(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| SearchError::ApiError {
                status: 0,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            engine: config.engine.clone(),
            language: config.language.clone(),
            timeout_ms: config.request_timeout_ms,
            client,
        })
    }

    fn query_params(&self, query: &str, num_results: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("engine", self.engine.clone()),
            ("q", query.to_string()),
            ("api_key", self.api_key.clone()),
            ("num", num_results.min(MAX_RESULTS_PER_QUERY).to_string()),
        ];
        if let Some(ref hl) = self.language {
            params.push(("hl", hl.clone()));
        }
        params
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .header("Accept", "application/json")
            .query(&self.query_params(query, num_results))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(SearchError::RateLimited {
                retry_after_secs: 60,
            });
        }

        if status == 401 || status == 403 {
            return Err(SearchError::NoApiKey {
                provider: "serpapi".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| SearchError::ApiError {
            status: status.as_u16(),
            message: e.to_string(),
        })?;

        let results = parse_serpapi_response(&body, num_results)?;
        debug!("SerpAPI returned {} results for: {}", results.len(), query);
        Ok(results)
    }

    fn name(&self) -> &'static str {
        "serpapi"
    }
}

/// Parse a SerpAPI JSON body into capped search results
///
/// Results without a link are dropped; blank snippets become `None`.
pub fn parse_serpapi_response(
    body: &str,
    num_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let data: SerpApiResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(format!("JSON parse error: {}", e)))?;

    if data.organic_results.is_empty() {
        if let Some(message) = data.error {
            return Err(SearchError::ApiError {
                status: 200,
                message,
            });
        }
    }

    Ok(data
        .organic_results
        .into_iter()
        .filter_map(|r| {
            let url = r.link.filter(|l| !l.trim().is_empty())?;
            Some(SearchResult {
                url,
                title: r.title.unwrap_or_default(),
                snippet: r.snippet.filter(|s| !s.trim().is_empty()),
                source: "serpapi".to_string(),
            })
        })
        .take(num_results.min(MAX_RESULTS_PER_QUERY))
        .collect())
}

#[derive(Debug, serde::Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiOrganicResult>,
    error: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SerpApiOrganicResult {
    link: Option<String>,
    title: Option<String>,
    snippet: Option<String>,
}
