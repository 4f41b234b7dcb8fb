// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Clinical taxonomy store
//!
//! Read-only dataset of specialties → sub-specialties → clinical interests.
//! It is the closed vocabulary every mapping is validated against.

pub mod store;
pub mod types;

pub use store::Taxonomy;
pub use types::{normalize_term, SubSpecialty, Specialty, TaxonomyError};
