// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single search result from a web search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// URL of the search result
    pub url: String,
    /// Title of the search result
    #[serde(default)]
    pub title: String,
    /// Snippet/description of the search result, when the provider has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Source provider (e.g., "serpapi")
    pub source: String,
}

/// Errors that can occur during search operations
///
/// These never escape the search service: a failed query contributes
/// zero results. `NoApiKey` is raised only when constructing a provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rate limited by the search provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// API error from the search provider
    #[error("Search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 for transport failures)
        status: u16,
        /// Error message
        message: String,
    },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// No API key configured for the provider
    #[error("No API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing API key
        provider: String,
    },

    /// The provider answered with a body that is not the expected JSON
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}
