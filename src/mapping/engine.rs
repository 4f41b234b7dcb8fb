// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Mapping engine trait and the model-backed implementation

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::parser::parse_model_output;
use super::prompt::build_messages;
use super::types::{Mapping, MappingError};
use crate::llm::ChatModel;
use crate::taxonomy::Specialty;

/// Maps a corpus onto one specialty's closed vocabulary
///
/// Implementations must only return names present in `specialty`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingEngine: Send + Sync {
    async fn map(&self, corpus: &str, specialty: &Specialty) -> Result<Mapping, MappingError>;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}

/// Semantic matching through a chat model
///
/// One call per mapping, no retries. Wrap the model in
/// `RetryingChatModel` to retry transient failures.
pub struct LlmMappingEngine {
    model: Arc<dyn ChatModel>,
    temperature: f32,
}

impl LlmMappingEngine {
    pub fn new(model: Arc<dyn ChatModel>, temperature: f32) -> Self {
        Self { model, temperature }
    }
}

#[async_trait]
impl MappingEngine for LlmMappingEngine {
    async fn map(&self, corpus: &str, specialty: &Specialty) -> Result<Mapping, MappingError> {
        let start = Instant::now();
        let messages = build_messages(corpus, specialty);
        debug!(
            "Mapping {} chars against {} ({} sub-specialties) with {}",
            corpus.len(),
            specialty.name,
            specialty.sub_specialties.len(),
            self.model.model_name()
        );

        let raw = self.model.complete(&messages, self.temperature).await?;

        let proposed = parse_model_output(&raw).map_err(|reason| {
            warn!("Unparseable model output ({}): {}", reason, raw);
            MappingError::Unparseable {
                reason,
                raw: raw.clone(),
            }
        })?;

        let mapping = Mapping::constrain(specialty, proposed);
        info!(
            "Mapped {} interests across {} sub-specialties in {}ms",
            mapping.interest_count(),
            mapping.entries.len(),
            start.elapsed().as_millis()
        );
        Ok(mapping)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
