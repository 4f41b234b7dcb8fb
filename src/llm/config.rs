// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the language model provider

use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Highest temperature accepted; mapping favours reproducibility
pub const MAX_TEMPERATURE: f32 = 0.3;

/// Configuration for the chat model
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Provider API key (required)
    pub api_key: Option<String>,
    /// OpenAI-compatible base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Decoding temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Extra attempts on transient failures (0 disables retrying)
    pub max_retries: u32,
}

impl ModelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature: env::var("MODEL_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            max_retries: env::var("MODEL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_none() {
            return Err("OPENAI_API_KEY is not set".to_string());
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and {}",
                MAX_TEMPERATURE
            ));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model name must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            timeout_secs: 60,
            max_retries: 0,
        }
    }
}
