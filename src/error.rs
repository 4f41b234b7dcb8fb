// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Top-level error type returned to callers of the mapper

use thiserror::Error;

use crate::config::ConfigError;
use crate::llm::LlmError;
use crate::mapping::MappingError;
use crate::taxonomy::TaxonomyError;

#[derive(Debug, Error)]
pub enum MapperError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Model call failed: {0}")]
    ModelCall(LlmError),

    /// Raw model text is kept for diagnosis
    #[error("Unparseable mapping output: {reason}")]
    UnparseableMappingOutput { reason: String, raw: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request timed out after {0}s")]
    TimedOut(u64),
}

impl From<MappingError> for MapperError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::ModelCall(e) => MapperError::ModelCall(e),
            MappingError::Unparseable { reason, raw } => {
                MapperError::UnparseableMappingOutput { reason, raw }
            }
        }
    }
}

impl MapperError {
    /// Configuration-class errors are fatal before any request work
    pub fn is_configuration(&self) -> bool {
        matches!(self, MapperError::Configuration(_) | MapperError::Taxonomy(_))
    }
}
