// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Immutable in-memory taxonomy with a specialty index

use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

use super::types::{normalize_term, Specialty, TaxonomyError};

/// The closed vocabulary of specialties, sub-specialties and interests
///
/// Built once at startup and shared read-only (wrap in `Arc`).
#[derive(Debug, Clone)]
pub struct Taxonomy {
    specialties: Vec<Specialty>,
    index: HashMap<String, usize>,
}

impl Taxonomy {
    /// Load the taxonomy from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let taxonomy = Self::from_json_str(&raw)?;
        info!(
            "Loaded taxonomy from {}: {} specialties",
            path.display(),
            taxonomy.len()
        );
        Ok(taxonomy)
    }

    /// Parse the taxonomy from a JSON document
    pub fn from_json_str(raw: &str) -> Result<Self, TaxonomyError> {
        let specialties: Vec<Specialty> = serde_json::from_str(raw)?;
        Self::from_specialties(specialties)
    }

    /// Build the taxonomy from already-parsed specialties
    ///
    /// Validates names, removes duplicate interests and builds the index.
    pub fn from_specialties(mut specialties: Vec<Specialty>) -> Result<Self, TaxonomyError> {
        let mut index = HashMap::with_capacity(specialties.len());

        for (position, specialty) in specialties.iter_mut().enumerate() {
            specialty.name = specialty.name.trim().to_string();
            if specialty.name.is_empty() {
                return Err(TaxonomyError::Invalid(format!(
                    "specialty at position {} has an empty name",
                    position
                )));
            }

            let mut sub_names = HashSet::new();
            for sub in specialty.sub_specialties.iter_mut() {
                sub.name = sub.name.trim().to_string();
                if sub.name.is_empty() {
                    return Err(TaxonomyError::Invalid(format!(
                        "specialty '{}' has a sub-specialty with an empty name",
                        specialty.name
                    )));
                }
                if !sub_names.insert(normalize_term(&sub.name)) {
                    return Err(TaxonomyError::Invalid(format!(
                        "duplicate sub-specialty '{}' in '{}'",
                        sub.name, specialty.name
                    )));
                }

                let mut seen = HashSet::new();
                let before = sub.clinical_interests.len();
                sub.clinical_interests = std::mem::take(&mut sub.clinical_interests)
                    .into_iter()
                    .map(|i| i.trim().to_string())
                    .filter(|i| !i.is_empty() && seen.insert(normalize_term(i)))
                    .collect();
                if sub.clinical_interests.len() != before {
                    debug!(
                        "Dropped {} duplicate or blank interests from {}/{}",
                        before - sub.clinical_interests.len(),
                        specialty.name,
                        sub.name
                    );
                }
            }

            if index
                .insert(normalize_term(&specialty.name), position)
                .is_some()
            {
                return Err(TaxonomyError::Invalid(format!(
                    "duplicate specialty '{}'",
                    specialty.name
                )));
            }
        }

        Ok(Self { specialties, index })
    }

    /// Look up a specialty by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Specialty> {
        self.index
            .get(&normalize_term(name))
            .map(|&i| &self.specialties[i])
    }

    /// Look up a specialty, failing with a configuration-class error when absent
    pub fn require(&self, name: &str) -> Result<&Specialty, TaxonomyError> {
        self.get(name)
            .ok_or_else(|| TaxonomyError::UnknownSpecialty(name.to_string()))
    }

    /// Sorted, unique specialty names for presentation
    pub fn specialty_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specialties.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Specialties in dataset order
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn len(&self) -> usize {
        self.specialties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specialties.is_empty()
    }
}
