// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::MapperConfig;
use crate::error::MapperError;
use crate::mapping::KeywordMappingEngine;
use crate::pipeline::{ClinicalMapper, MappingOutcome};
use crate::taxonomy::Taxonomy;

/// Printed when nothing usable was found for the expert
pub const NO_CONTENT_MESSAGE: &str = "No relevant clinical content found.";

/// Arguments for the map command
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Expert name, e.g. "Jane Doe"
    #[arg(long)]
    pub name: String,

    /// Specialty name as it appears in the taxonomy
    #[arg(long)]
    pub specialty: String,

    /// Taxonomy dataset (overrides CLINICAL_TAXONOMY_PATH)
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the aggregated evidence text
    #[arg(long)]
    pub show_corpus: bool,

    /// Match interests by keyword instead of calling the language model
    #[arg(long)]
    pub keyword: bool,
}

/// Arguments for the specialties command
#[derive(Args, Debug)]
pub struct SpecialtiesArgs {
    /// Taxonomy dataset (overrides CLINICAL_TAXONOMY_PATH)
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,
}

/// Map one expert and print the result
pub async fn map_expert(args: MapArgs) -> Result<()> {
    dotenv::dotenv().ok();

    let mut config = MapperConfig::from_env();
    if let Some(path) = args.taxonomy {
        config.taxonomy_path = path;
    }

    let mapper = if args.keyword {
        ClinicalMapper::from_config_with_engine(&config, Arc::new(KeywordMappingEngine::new()))?
    } else {
        ClinicalMapper::from_config(&config)?
    };

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling");
            ctrl_c.cancel();
        }
    });

    let outcome = match mapper
        .map_with_cancellation(&args.name, &args.specialty, token)
        .await
    {
        Ok(outcome) => outcome,
        Err(MapperError::UnparseableMappingOutput { reason, raw }) => {
            eprintln!("Model output:\n{}", raw);
            return Err(anyhow!("Unparseable mapping output: {}", reason));
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        if outcome.is_insufficient() {
            return Err(anyhow!(NO_CONTENT_MESSAGE));
        }
        return Ok(());
    }

    match outcome {
        MappingOutcome::Mapped { mapping, corpus } => {
            if args.show_corpus {
                println!("📄 Evidence ({} chars):", corpus.char_count());
                println!("{}\n", corpus.text());
            }
            if mapping.is_empty() {
                println!("No matching clinical interests for {} in {}.", args.name.trim(), mapping.specialty);
            } else {
                print!("{}", mapping);
            }
            Ok(())
        }
        MappingOutcome::InsufficientEvidence { .. } => Err(anyhow!(NO_CONTENT_MESSAGE)),
    }
}

/// List the specialties in the taxonomy
pub async fn list_specialties(args: SpecialtiesArgs) -> Result<()> {
    dotenv::dotenv().ok();

    let path = args
        .taxonomy
        .unwrap_or_else(|| MapperConfig::from_env().taxonomy_path);
    let taxonomy = Taxonomy::load(&path)?;

    for name in taxonomy.specialty_names() {
        println!("{}", name);
    }
    Ok(())
}
