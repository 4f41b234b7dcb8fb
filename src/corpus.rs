// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence aggregation
//!
//! Joins per-source text blocks into the single corpus handed to the
//! mapping engine. Blocks keep query-tier order, then result order.

use serde::Serialize;
use tracing::debug;

use crate::search::content::extractor::clean_text;

/// Separator placed between blocks from different sources
pub const SOURCE_SEPARATOR: &str = " | ";

/// Text contributed by one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Query tier that produced the source (1-based)
    pub tier: usize,
    /// Where the text came from (result URL)
    pub source: String,
    /// The text itself
    pub text: String,
}

impl TextBlock {
    pub fn new(tier: usize, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tier,
            source: source.into(),
            text: text.into(),
        }
    }
}

/// Aggregated evidence for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    blocks: Vec<TextBlock>,
    text: String,
}

impl Corpus {
    /// The joined corpus text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The blocks that were kept, in corpus order
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// Length of the corpus in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Joins text blocks into a corpus
#[derive(Debug, Clone)]
pub struct SnippetAggregator {
    min_block_chars: usize,
}

impl SnippetAggregator {
    /// Create an aggregator that drops blocks shorter than `min_block_chars`
    pub fn new(min_block_chars: usize) -> Self {
        Self { min_block_chars }
    }

    pub fn min_block_chars(&self) -> usize {
        self.min_block_chars
    }

    /// Aggregate blocks into a corpus
    ///
    /// Whitespace inside each block is normalised; blank and too-short
    /// blocks are dropped; the rest are joined with `SOURCE_SEPARATOR`
    /// in the order given.
    pub fn aggregate<I>(&self, blocks: I) -> Corpus
    where
        I: IntoIterator<Item = TextBlock>,
    {
        let mut dropped = 0usize;
        let kept: Vec<TextBlock> = blocks
            .into_iter()
            .filter_map(|block| {
                let text = clean_text(&block.text);
                if text.is_empty() || text.chars().count() < self.min_block_chars {
                    dropped += 1;
                    return None;
                }
                Some(TextBlock { text, ..block })
            })
            .collect();

        if dropped > 0 {
            debug!("Dropped {} empty or short blocks", dropped);
        }

        let text = kept
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(SOURCE_SEPARATOR)
            .trim()
            .to_string();

        Corpus { blocks: kept, text }
    }
}
