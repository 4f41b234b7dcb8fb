// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Language model access
//!
//! A narrow `ChatModel` seam with an OpenAI-compatible implementation and an
//! opt-in retry wrapper.

pub mod config;
pub mod openai;
pub mod provider;
pub mod retry;

pub use config::ModelConfig;
pub use openai::OpenAiChatModel;
pub use provider::{ChatMessage, ChatModel, ChatRole, LlmError};
pub use retry::RetryingChatModel;
