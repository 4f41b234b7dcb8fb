// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;

/// Default SerpAPI endpoint
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search";

/// Hard upper bound on results per query
pub const MAX_RESULTS_PER_QUERY: usize = 10;

/// Configuration for web search functionality
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// SerpAPI key (required)
    pub api_key: Option<String>,
    /// Search endpoint
    pub base_url: String,
    /// Engine identifier passed to the provider
    pub engine: String,
    /// Number of results per query
    pub num_results: usize,
    /// Optional interface language (`hl`)
    pub language: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("SERPAPI_KEY").ok().filter(|k| !k.trim().is_empty()),
            base_url: env::var("SERPAPI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SERPAPI_URL.to_string()),
            engine: env::var("SEARCH_ENGINE").unwrap_or_else(|_| "google".to_string()),
            num_results: env::var("SEARCH_NUM_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5)
                .min(MAX_RESULTS_PER_QUERY),
            language: env::var("SEARCH_LANGUAGE").ok().filter(|l| !l.is_empty()),
            request_timeout_ms: env::var("SEARCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_none() {
            return Err("SERPAPI_KEY is not set".to_string());
        }
        if self.num_results == 0 || self.num_results > MAX_RESULTS_PER_QUERY {
            return Err(format!(
                "num_results must be between 1 and {}",
                MAX_RESULTS_PER_QUERY
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_SERPAPI_URL.to_string(),
            engine: "google".to_string(),
            num_results: 5,
            language: None,
            request_timeout_ms: 10000,
        }
    }
}
