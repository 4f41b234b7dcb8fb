// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Mapping output types and the closed-vocabulary filter

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::llm::LlmError;
use crate::taxonomy::{normalize_term, Specialty};

/// One sub-specialty and the interests matched for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub sub_specialty: String,
    pub matched_interests: Vec<String>,
}

/// Sub-specialty → matched interests, valid for one specialty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub specialty: String,
    pub entries: Vec<MappingEntry>,
}

/// An unvalidated sub-specialty claim, as proposed by a matcher
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProposedEntry {
    #[serde(alias = "subSpecialty", alias = "sub-specialty", alias = "name")]
    pub sub_specialty: String,
    #[serde(
        default,
        alias = "clinicalInterests",
        alias = "matched_interests",
        alias = "matchedInterests",
        alias = "interests"
    )]
    pub clinical_interests: Vec<String>,
}

impl Mapping {
    /// Keep only names that exist in `specialty`
    ///
    /// Unknown sub-specialties and interests are dropped, matches are
    /// rewritten to the taxonomy spelling, duplicates are merged, entries
    /// with no remaining interests are removed, and the result follows
    /// taxonomy order.
    pub fn constrain(specialty: &Specialty, proposed: Vec<ProposedEntry>) -> Self {
        let mut matched: HashMap<&str, HashSet<&str>> = HashMap::new();

        for entry in &proposed {
            let Some(sub) = specialty.find_sub_specialty(&entry.sub_specialty) else {
                debug!(
                    "Rejected sub-specialty '{}' not in {}",
                    entry.sub_specialty, specialty.name
                );
                continue;
            };

            for interest in &entry.clinical_interests {
                match sub.find_interest(interest) {
                    Some(canonical) => {
                        matched.entry(sub.name.as_str()).or_default().insert(canonical);
                    }
                    None => debug!("Rejected interest '{}' for {}", interest, sub.name),
                }
            }
        }

        let entries = specialty
            .sub_specialties
            .iter()
            .filter_map(|sub| {
                let found = matched.get(sub.name.as_str())?;
                let matched_interests: Vec<String> = sub
                    .clinical_interests
                    .iter()
                    .filter(|i| found.contains(i.as_str()))
                    .cloned()
                    .collect();
                Some(MappingEntry {
                    sub_specialty: sub.name.clone(),
                    matched_interests,
                })
            })
            .collect();

        Self {
            specialty: specialty.name.clone(),
            entries,
        }
    }

    /// Look up the entry for a sub-specialty
    pub fn get(&self, sub_specialty: &str) -> Option<&MappingEntry> {
        let key = normalize_term(sub_specialty);
        self.entries
            .iter()
            .find(|e| normalize_term(&e.sub_specialty) == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn interest_count(&self) -> usize {
        self.entries.iter().map(|e| e.matched_interests.len()).sum()
    }
}

impl fmt::Display for Mapping {
    /// Renders the line format used by the command-line front end
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Sub-specialty: {}", entry.sub_specialty)?;
            for interest in &entry.matched_interests {
                writeln!(f, "→ Clinical Interest: {}", interest)?;
            }
        }
        Ok(())
    }
}

/// Errors raised by a mapping engine
#[derive(Debug, Error)]
pub enum MappingError {
    /// The model provider was unreachable or returned an error
    #[error("Model call failed: {0}")]
    ModelCall(#[from] LlmError),

    /// The model answered, but not in the expected structure
    #[error("Unparseable model output: {reason}")]
    Unparseable { reason: String, raw: String },
}
