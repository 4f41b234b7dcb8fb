// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the clinical taxonomy

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A sub-specialty and the clinical interests it declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSpecialty {
    /// Display name, e.g. "Joint Reconstruction"
    pub name: String,
    /// Declared interests (set semantics, first-seen order)
    #[serde(alias = "clinicalInterests")]
    pub clinical_interests: Vec<String>,
}

impl SubSpecialty {
    /// Look up an interest by name, ignoring case and surrounding whitespace.
    ///
    /// Returns the canonical spelling from the taxonomy.
    pub fn find_interest(&self, candidate: &str) -> Option<&str> {
        let key = normalize_term(candidate);
        self.clinical_interests
            .iter()
            .find(|i| normalize_term(i) == key)
            .map(String::as_str)
    }
}

/// A specialty with its ordered sub-specialties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    /// Specialty name, e.g. "Orthopedics"
    #[serde(rename = "specialty")]
    pub name: String,
    /// Ordered sub-specialties
    #[serde(alias = "subSpecialties")]
    pub sub_specialties: Vec<SubSpecialty>,
}

impl Specialty {
    /// Look up a sub-specialty by name, ignoring case and surrounding whitespace
    pub fn find_sub_specialty(&self, candidate: &str) -> Option<&SubSpecialty> {
        let key = normalize_term(candidate);
        self.sub_specialties
            .iter()
            .find(|s| normalize_term(&s.name) == key)
    }

    /// Total number of interests declared across all sub-specialties
    pub fn interest_count(&self) -> usize {
        self.sub_specialties
            .iter()
            .map(|s| s.clinical_interests.len())
            .sum()
    }
}

/// Errors raised while loading or querying the taxonomy
///
/// All of these are configuration-class failures: they are reported before
/// any search or model work starts.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// The dataset file could not be read
    #[error("Failed to read taxonomy from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The dataset does not match the expected schema
    #[error("Malformed taxonomy: {0}")]
    Schema(#[from] serde_json::Error),

    /// The dataset parsed but violates a structural rule
    #[error("Invalid taxonomy: {0}")]
    Invalid(String),

    /// The requested specialty is not in the dataset
    #[error("Unknown specialty: {0}")]
    UnknownSpecialty(String),
}

/// Case-fold and collapse whitespace so that lookups are spelling-tolerant
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
