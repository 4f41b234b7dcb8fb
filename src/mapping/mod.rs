// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Closed-vocabulary mapping of evidence onto the taxonomy

pub mod engine;
pub mod keyword;
pub mod parser;
pub mod prompt;
pub mod types;

pub use engine::{LlmMappingEngine, MappingEngine};
pub use keyword::KeywordMappingEngine;
pub use types::{Mapping, MappingEntry, MappingError, ProposedEntry};
