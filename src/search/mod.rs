// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search and evidence retrieval
//!
//! Provides the retrieval half of the mapping pipeline:
//! - Tiered query construction for an expert and specialty
//! - SerpAPI web search with failure containment
//! - Full-page content extraction with a fallback strategy
//!
//! Key features:
//! - Per-query result cap
//! - Bounded, order-preserving fan-out
//! - Graceful degradation on provider and page failures

pub mod config;
pub mod content;
pub mod provider;
pub mod query_builder;
pub mod serpapi;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use provider::SearchProvider;
pub use query_builder::{QueryBuilder, QueryPlan, QueryStrategy, QueryTier};
pub use serpapi::SerpApiProvider;
pub use service::{SearchResponse, SearchService};
pub use types::{SearchError, SearchResult};

pub use content::{ContentExtractor, ContentFetchConfig, ExtractionStrategy, FetchError};
