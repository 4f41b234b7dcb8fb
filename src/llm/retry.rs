// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Opt-in retry wrapper for chat models
//!
//! The mapping engine never retries on its own. Callers that want retries
//! wrap their model in `RetryingChatModel`.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::provider::{ChatMessage, ChatModel, LlmError};

/// Retries transient failures with linear back-off
pub struct RetryingChatModel {
    inner: Arc<dyn ChatModel>,
    max_retries: u32,
    backoff: Duration,
}

impl RetryingChatModel {
    /// Wrap `inner`, allowing up to `max_retries` extra attempts
    pub fn new(inner: Arc<dyn ChatModel>, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }
}

#[async_trait]
impl ChatModel for RetryingChatModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError> {
        let mut attempt = 0u32;
        loop {
            match self.inner.complete(messages, temperature).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Model {} failed ({}), retry {}/{}",
                        self.inner.model_name(),
                        e,
                        attempt,
                        self.max_retries
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
