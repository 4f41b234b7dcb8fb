// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the mapping pipeline

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::search::QueryStrategy;

/// Where the evidence text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvidenceStrategy {
    /// Search result snippets only
    #[default]
    Snippets,
    /// Full page text fetched from the result URLs
    FullPage,
}

impl FromStr for EvidenceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snippets" | "snippet" => Ok(Self::Snippets),
            "full-page" | "full_page" | "fullpage" | "pages" => Ok(Self::FullPage),
            other => Err(format!("unknown evidence strategy '{}'", other)),
        }
    }
}

impl fmt::Display for EvidenceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snippets => write!(f, "snippets"),
            Self::FullPage => write!(f, "full-page"),
        }
    }
}

/// Pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Query grouping (default: tiered)
    pub query_strategy: QueryStrategy,
    /// Evidence source (default: snippets)
    pub evidence: EvidenceStrategy,
    /// Concurrent searches or page fetches (default: 4)
    pub max_concurrency: usize,
    /// Page blocks shorter than this are dropped (default: 100)
    pub min_block_chars: usize,
    /// Snippets shorter than this are dropped (default: 1, any non-empty snippet)
    pub min_snippet_chars: usize,
    /// Corpora shorter than this never reach the mapping engine (default: 40)
    pub min_corpus_chars: usize,
    /// Deadline for one request in seconds (default: 120)
    pub request_timeout_secs: u64,
}

impl PipelineConfig {
    /// Load configuration from environment variables
    ///
    /// Unparseable strategy names fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            query_strategy: env::var("MAPPER_QUERY_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            evidence: env::var("MAPPER_EVIDENCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            max_concurrency: env::var("MAPPER_MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            min_block_chars: env::var("MAPPER_MIN_BLOCK_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            min_snippet_chars: env::var("MAPPER_MIN_SNIPPET_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            min_corpus_chars: env::var("MAPPER_MIN_CORPUS_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(40),
            request_timeout_secs: env::var("MAPPER_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }
        if self.min_corpus_chars == 0 {
            return Err("min_corpus_chars must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    /// Minimum block length for the configured evidence source
    pub fn block_threshold(&self) -> usize {
        match self.evidence {
            EvidenceStrategy::Snippets => self.min_snippet_chars,
            EvidenceStrategy::FullPage => self.min_block_chars,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            query_strategy: QueryStrategy::Tiered,
            evidence: EvidenceStrategy::Snippets,
            max_concurrency: 4,
            min_block_chars: 100,
            min_snippet_chars: 1,
            min_corpus_chars: 40,
            request_timeout_secs: 120,
        }
    }
}
