// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat model trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Errors from a chat model call
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport failure (connection refused, TLS)
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The provider did not answer in time
    #[error("Model call timed out after {0}s")]
    Timeout(u64),

    /// The provider answered with a non-success status
    #[error("Model API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The provider's envelope could not be decoded
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    /// Missing or unusable credential
    #[error("No API key configured for {0}")]
    NoApiKey(String),
}

impl LlmError {
    /// Whether a retry could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidResponse(_) | Self::NoApiKey(_) => false,
        }
    }
}

/// A chat-style completion model
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a completion for the given messages
    async fn complete(&self, messages: &[ChatMessage], temperature: f32)
        -> Result<String, LlmError>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}

#[async_trait]
impl ChatModel for Arc<dyn ChatModel> {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError> {
        (**self).complete(messages, temperature).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
