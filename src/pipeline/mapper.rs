// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end mapping of one expert to clinical interests
//!
//! Query plan → search → evidence → corpus → guard → mapping engine.

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::{EvidenceStrategy, PipelineConfig};
use crate::config::{ConfigError, MapperConfig};
use crate::corpus::{Corpus, SnippetAggregator, TextBlock};
use crate::error::MapperError;
use crate::llm::{ChatModel, OpenAiChatModel, RetryingChatModel};
use crate::mapping::{LlmMappingEngine, Mapping, MappingEngine};
use crate::search::{ContentExtractor, QueryBuilder, SearchResult, SearchService};
use crate::taxonomy::{Specialty, Taxonomy};

const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Result of a completed request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum MappingOutcome {
    /// The corpus passed the evidence guard and was mapped
    Mapped { mapping: Mapping, corpus: Corpus },
    /// Not enough text was found to attempt a mapping
    #[serde(rename_all = "camelCase")]
    InsufficientEvidence { corpus_chars: usize },
}

impl MappingOutcome {
    pub fn mapping(&self) -> Option<&Mapping> {
        match self {
            MappingOutcome::Mapped { mapping, .. } => Some(mapping),
            MappingOutcome::InsufficientEvidence { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, MappingOutcome::InsufficientEvidence { .. })
    }
}

/// Maps experts onto the clinical taxonomy
///
/// Holds only shared, read-only state; every request owns its own
/// search results and corpus.
pub struct ClinicalMapper {
    taxonomy: Arc<Taxonomy>,
    search: SearchService,
    extractor: Option<ContentExtractor>,
    engine: Arc<dyn MappingEngine>,
    queries: QueryBuilder,
    aggregator: SnippetAggregator,
    config: PipelineConfig,
}

impl ClinicalMapper {
    pub fn new(
        taxonomy: Arc<Taxonomy>,
        search: SearchService,
        engine: Arc<dyn MappingEngine>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            taxonomy,
            search,
            extractor: None,
            engine,
            queries: QueryBuilder::new(config.query_strategy),
            aggregator: SnippetAggregator::new(config.block_threshold()),
            config,
        }
    }

    /// Attach a content extractor for full-page evidence
    pub fn with_extractor(mut self, extractor: ContentExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Build a mapper from configuration, mapping with the chat model
    ///
    /// Loads the taxonomy and constructs the SerpAPI, page fetch and
    /// OpenAI clients. Every failure here is configuration-class.
    pub fn from_config(config: &MapperConfig) -> Result<Self, MapperError> {
        config.validate()?;

        let mut model: Arc<dyn ChatModel> =
            Arc::new(OpenAiChatModel::new(&config.model).map_err(|e| ConfigError::Client {
                component: "chat model",
                message: e.to_string(),
            })?);
        if config.model.max_retries > 0 {
            model = Arc::new(RetryingChatModel::new(
                model,
                config.model.max_retries,
                RETRY_BACKOFF,
            ));
        }
        let engine = Arc::new(LlmMappingEngine::new(model, config.model.temperature));

        Self::from_config_with_engine(config, engine)
    }

    /// Build a mapper from configuration around any mapping engine
    ///
    /// The model section is not validated here.
    pub fn from_config_with_engine(
        config: &MapperConfig,
        engine: Arc<dyn MappingEngine>,
    ) -> Result<Self, MapperError> {
        config.validate_retrieval()?;

        let taxonomy = Arc::new(Taxonomy::load(&config.taxonomy_path)?);
        info!(
            "Loaded {} specialties from {}",
            taxonomy.len(),
            config.taxonomy_path.display()
        );

        let search = SearchService::from_config(&config.search).map_err(|e| ConfigError::Client {
            component: "search provider",
            message: e.to_string(),
        })?;

        let mapper = Self::new(taxonomy, search, engine, config.pipeline.clone());
        if config.pipeline.evidence == EvidenceStrategy::FullPage {
            let extractor =
                ContentExtractor::from_config(&config.content).map_err(|e| ConfigError::Client {
                    component: "content extractor",
                    message: e.to_string(),
                })?;
            return Ok(mapper.with_extractor(extractor));
        }
        Ok(mapper)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Map an expert to clinical interests within one specialty
    ///
    /// Bounded by the configured per-request deadline.
    pub async fn map_expert_to_clinical_interests(
        &self,
        expert_name: &str,
        specialty: &str,
    ) -> Result<MappingOutcome, MapperError> {
        let deadline = self.config.request_timeout();
        match tokio::time::timeout(deadline, self.run(expert_name, specialty)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Mapping '{}' timed out after {:?}", expert_name, deadline);
                Err(MapperError::TimedOut(self.config.request_timeout_secs))
            }
        }
    }

    /// Same as `map_expert_to_clinical_interests`, abandoned when `token` fires
    ///
    /// In-flight searches and fetches are dropped with the request future.
    pub async fn map_with_cancellation(
        &self,
        expert_name: &str,
        specialty: &str,
        token: CancellationToken,
    ) -> Result<MappingOutcome, MapperError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!("Mapping '{}' cancelled", expert_name);
                Err(MapperError::Cancelled)
            }
            result = self.map_expert_to_clinical_interests(expert_name, specialty) => result,
        }
    }

    async fn run(&self, expert_name: &str, specialty: &str) -> Result<MappingOutcome, MapperError> {
        let start = Instant::now();
        let expert_name = expert_name.trim();
        if expert_name.is_empty() {
            return Err(MapperError::InvalidRequest(
                "expert name must not be empty".to_string(),
            ));
        }
        let specialty: &Specialty = self.taxonomy.require(specialty)?;

        let plan = self.queries.build(expert_name, &specialty.name);
        info!(
            "Mapping '{}' in {}: {} queries ({} strategy, {} evidence)",
            expert_name,
            specialty.name,
            plan.query_count(),
            plan.strategy,
            self.config.evidence
        );

        let mut blocks: Vec<TextBlock> = Vec::new();
        let mut corpus = Corpus::default();
        for tier in &plan.tiers {
            let responses = self
                .search
                .batch_search(&tier.queries, self.config.max_concurrency)
                .await;
            let results: Vec<SearchResult> = responses.into_iter().flat_map(|r| r.results).collect();
            debug!("Tier {} ({}) returned {} results", tier.level, tier.label, results.len());

            blocks.extend(self.collect_evidence(tier.level, results).await);
            corpus = self.aggregator.aggregate(blocks.iter().cloned());

            if plan.stops_early() && self.passes_guard(&corpus) {
                debug!("Tier {} produced enough evidence, stopping", tier.level);
                break;
            }
        }

        if !self.passes_guard(&corpus) {
            info!(
                "Insufficient evidence for '{}': {} chars in {}ms",
                expert_name,
                corpus.char_count(),
                start.elapsed().as_millis()
            );
            return Ok(MappingOutcome::InsufficientEvidence {
                corpus_chars: corpus.char_count(),
            });
        }

        debug!("Corpus for '{}': {} blocks", expert_name, corpus.blocks().len());
        let mapping = self.engine.map(corpus.text(), specialty).await?;

        info!(
            "Mapped '{}' with {} engine: {} interests in {}ms",
            expert_name,
            self.engine.name(),
            mapping.interest_count(),
            start.elapsed().as_millis()
        );
        Ok(MappingOutcome::Mapped { mapping, corpus })
    }

    /// Turn one tier's results into text blocks, per the evidence strategy
    async fn collect_evidence(&self, tier: usize, results: Vec<SearchResult>) -> Vec<TextBlock> {
        match self.config.evidence {
            EvidenceStrategy::Snippets => results
                .into_iter()
                .filter_map(|r| r.snippet.map(|snippet| TextBlock::new(tier, r.url, snippet)))
                .collect(),
            EvidenceStrategy::FullPage => {
                let Some(extractor) = &self.extractor else {
                    warn!("Full-page evidence requested without a content extractor");
                    return Vec::new();
                };
                let urls: Vec<String> = results.into_iter().map(|r| r.url).collect();
                let texts = extractor.extract_many(&urls, self.config.max_concurrency).await;
                urls.into_iter()
                    .zip(texts)
                    .filter_map(|(url, text)| text.map(|t| TextBlock::new(tier, url, t)))
                    .collect()
            }
        }
    }

    fn passes_guard(&self, corpus: &Corpus) -> bool {
        !corpus.is_empty() && corpus.text().trim().chars().count() >= self.config.min_corpus_chars
    }
}
