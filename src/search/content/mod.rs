//! Content fetching module for full-page evidence
//!
//! Fetches actual page content from search result URLs so the mapping step
//! sees more than the search snippets.
//!
//! ## Architecture
//!
//! ```text
//! Search Results (URLs) → ContentExtractor ─ primary:  MainContentStrategy  → Clean Text
//!                                           └ fallback: VisibleTextStrategy → Clean Text
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = ContentFetchConfig::from_env();
//! let extractor = ContentExtractor::from_config(&config)?;
//!
//! let urls = vec!["https://example.com".to_string()];
//! let texts = extractor.extract_many(&urls, 4).await;
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;

pub use config::ContentFetchConfig;
pub use extractor::{extract_main_content, extract_visible_text};
pub use fetcher::{
    ContentExtractor, ExtractionStrategy, FetchError, HtmlFetcher, MainContentStrategy,
    VisibleTextStrategy,
};
