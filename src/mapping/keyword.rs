// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Strict keyword matching without a model
//!
//! An interest matches when it appears in the corpus as a whole phrase,
//! ignoring case and spacing. Useful offline and as a baseline for the
//! model-backed engine.

use async_trait::async_trait;
use regex::RegexBuilder;

use super::engine::MappingEngine;
use super::types::{Mapping, MappingError, ProposedEntry};
use crate::taxonomy::Specialty;

#[derive(Debug, Clone, Default)]
pub struct KeywordMappingEngine;

impl KeywordMappingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Whether `phrase` occurs in `corpus` as a whole phrase
    pub fn mentions(corpus: &str, phrase: &str) -> bool {
        let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        if words.is_empty() {
            return false;
        }
        let pattern = format!(r"(^|[^\p{{L}}\p{{N}}]){}($|[^\p{{L}}\p{{N}}])", words.join(r"\s+"));
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(|re| re.is_match(corpus))
            .unwrap_or(false)
    }

    /// Synchronous mapping, shared by the trait implementation
    pub fn map_sync(&self, corpus: &str, specialty: &Specialty) -> Mapping {
        let proposed = specialty
            .sub_specialties
            .iter()
            .map(|sub| ProposedEntry {
                sub_specialty: sub.name.clone(),
                clinical_interests: sub
                    .clinical_interests
                    .iter()
                    .filter(|i| Self::mentions(corpus, i))
                    .cloned()
                    .collect(),
            })
            .collect();

        Mapping::constrain(specialty, proposed)
    }
}

#[async_trait]
impl MappingEngine for KeywordMappingEngine {
    async fn map(&self, corpus: &str, specialty: &Specialty) -> Result<Mapping, MappingError> {
        Ok(self.map_sync(corpus, specialty))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
