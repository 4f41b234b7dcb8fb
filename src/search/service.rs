// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Wraps a provider so that every failure becomes an empty, annotated
//! response instead of an error.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::config::{SearchConfig, MAX_RESULTS_PER_QUERY};
use super::provider::SearchProvider;
use super::serpapi::SerpApiProvider;
use super::types::{SearchError, SearchResult};

/// Response from one search query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The original search query
    pub query: String,
    /// List of search results (empty on failure)
    pub results: Vec<SearchResult>,
    /// Time taken for the search in milliseconds
    pub search_time_ms: u64,
    /// Provider that handled the query
    pub provider: String,
    /// Soft failure message, if the provider failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Search service that contains provider failures
pub struct SearchService {
    provider: Arc<dyn SearchProvider>,
    num_results: usize,
}

impl SearchService {
    /// Create a search service backed by SerpAPI
    ///
    /// Fails only when the provider cannot be built (missing API key).
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let provider = SerpApiProvider::new(config)?;
        debug!("SerpAPI provider enabled (engine={})", config.engine);
        Ok(Self::with_provider(Arc::new(provider), config.num_results))
    }

    /// Create a search service around any provider
    pub fn with_provider(provider: Arc<dyn SearchProvider>, num_results: usize) -> Self {
        Self {
            provider,
            num_results: num_results.clamp(1, MAX_RESULTS_PER_QUERY),
        }
    }

    /// Perform a search, never failing
    pub async fn search(&self, query: &str) -> SearchResponse {
        let start = Instant::now();

        let (results, error) = match self.provider.search(query, self.num_results).await {
            Ok(mut results) => {
                results.truncate(self.num_results);
                (results, None)
            }
            Err(e) => {
                warn!(
                    "Search provider {} failed for query '{}': {}",
                    self.provider.name(),
                    query,
                    e
                );
                (Vec::new(), Some(e.to_string()))
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "Search complete: {} results from {} in {}ms",
            results.len(),
            self.provider.name(),
            elapsed_ms
        );

        SearchResponse {
            query: query.to_string(),
            results,
            search_time_ms: elapsed_ms,
            provider: self.provider.name().to_string(),
            error,
        }
    }

    /// Perform multiple searches with bounded concurrency
    ///
    /// Responses are returned in the same order as `queries`.
    pub async fn batch_search(&self, queries: &[String], concurrency: usize) -> Vec<SearchResponse> {
        stream::iter(queries.iter())
            .map(|q| self.search(q))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    pub fn num_results(&self) -> usize {
        self.num_results
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
