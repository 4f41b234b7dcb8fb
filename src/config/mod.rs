// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-wide configuration
//!
//! Composes the per-module configurations, each loaded from the
//! environment with defaults, and validates them together at startup.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::llm::ModelConfig;
use crate::pipeline::PipelineConfig;
use crate::search::{ContentFetchConfig, SearchConfig};

pub const DEFAULT_TAXONOMY_PATH: &str = "clinical_interests.json";

/// Startup configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A section failed validation
    #[error("Invalid {section} configuration: {message}")]
    Invalid {
        section: &'static str,
        message: String,
    },

    /// A client could not be constructed from valid settings
    #[error("Failed to initialise {component}: {message}")]
    Client {
        component: &'static str,
        message: String,
    },
}

/// Full mapper configuration
#[derive(Debug, Clone)]
pub struct MapperConfig {
    pub search: SearchConfig,
    pub content: ContentFetchConfig,
    pub model: ModelConfig,
    pub pipeline: PipelineConfig,
    /// Taxonomy dataset location
    pub taxonomy_path: PathBuf,
}

impl MapperConfig {
    /// Load every section from environment variables
    pub fn from_env() -> Self {
        Self {
            search: SearchConfig::from_env(),
            content: ContentFetchConfig::from_env(),
            model: ModelConfig::from_env(),
            pipeline: PipelineConfig::from_env(),
            taxonomy_path: env::var("CLINICAL_TAXONOMY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TAXONOMY_PATH)),
        }
    }

    /// Validate all sections, reporting the first failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_retrieval()?;
        self.model.validate().map_err(|message| ConfigError::Invalid {
            section: "model",
            message,
        })
    }

    /// Validate every section except the model
    ///
    /// Enough for engines that do not call a language model.
    pub fn validate_retrieval(&self) -> Result<(), ConfigError> {
        self.search.validate().map_err(|message| ConfigError::Invalid {
            section: "search",
            message,
        })?;
        self.content.validate().map_err(|message| ConfigError::Invalid {
            section: "content fetch",
            message,
        })?;
        self.pipeline.validate().map_err(|message| ConfigError::Invalid {
            section: "pipeline",
            message,
        })?;
        Ok(())
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            content: ContentFetchConfig::default(),
            model: ModelConfig::default(),
            pipeline: PipelineConfig::default(),
            taxonomy_path: PathBuf::from(DEFAULT_TAXONOMY_PATH),
        }
    }
}
