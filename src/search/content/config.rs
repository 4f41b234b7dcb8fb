// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for content fetching
//!
//! Defines settings for HTTP fetching and extraction limits.

use std::env;

/// Minimum trimmed length for an extraction to count as usable
pub const MIN_USABLE_CHARS: usize = 100;

/// Identification header for the primary fetch
pub const BOT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ClinicalMapperBot/0.1)";

/// Browser-like identification header for the fallback fetch
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for content fetching
#[derive(Debug, Clone)]
pub struct ContentFetchConfig {
    /// Maximum pages to fetch per query tier (default: 5)
    pub max_pages: usize,
    /// Maximum characters kept per page (default: 3000)
    pub max_chars_per_page: usize,
    /// Timeout per page fetch in seconds (default: 5)
    pub timeout_per_page_secs: u64,
    /// Extractions at or below this trimmed length are failures (default: 100)
    pub min_usable_chars: usize,
    /// Allow fetching localhost and private network addresses (default: false)
    pub allow_private_hosts: bool,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            max_pages: env::var("CONTENT_FETCH_MAX_PAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5)
                .min(10),
            max_chars_per_page: env::var("CONTENT_FETCH_MAX_CHARS_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            timeout_per_page_secs: env::var("CONTENT_FETCH_TIMEOUT_PER_PAGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            min_usable_chars: MIN_USABLE_CHARS,
            allow_private_hosts: false,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("max_pages must be at least 1".to_string());
        }
        if self.max_chars_per_page <= self.min_usable_chars {
            return Err(format!(
                "max_chars_per_page must be greater than {}",
                self.min_usable_chars
            ));
        }
        if self.timeout_per_page_secs == 0 {
            return Err("timeout_per_page_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            max_chars_per_page: 3000,
            timeout_per_page_secs: 5,
            min_usable_chars: MIN_USABLE_CHARS,
            allow_private_hosts: false,
        }
    }
}
