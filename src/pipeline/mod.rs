// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! The request pipeline and its settings

pub mod config;
pub mod mapper;

pub use config::{EvidenceStrategy, PipelineConfig};
pub use mapper::{ClinicalMapper, MappingOutcome};
