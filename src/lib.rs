// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod llm;
pub mod mapping;
pub mod pipeline;
pub mod search;
pub mod taxonomy;
pub mod version;

// Re-export main types
pub use config::{ConfigError, MapperConfig};
pub use corpus::{Corpus, SnippetAggregator, TextBlock};
pub use error::MapperError;
pub use llm::{ChatMessage, ChatModel, LlmError, ModelConfig, OpenAiChatModel};
pub use mapping::{
    KeywordMappingEngine, LlmMappingEngine, Mapping, MappingEngine, MappingEntry, MappingError,
};
pub use pipeline::{ClinicalMapper, EvidenceStrategy, MappingOutcome, PipelineConfig};
pub use search::{
    ContentExtractor, ContentFetchConfig, QueryBuilder, QueryPlan, QueryStrategy, SearchConfig,
    SearchProvider, SearchResult, SearchService,
};
pub use taxonomy::{Specialty, SubSpecialty, Taxonomy, TaxonomyError};
