// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod map;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::version;

/// Clinical Interest Mapper CLI
#[derive(Parser, Debug)]
#[command(name = "clinical-mapper")]
#[command(version)]
#[command(about = "Map a medical expert to clinical sub-specialties and interests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map an expert to clinical interests within a specialty
    Map(map::MapArgs),

    /// List the specialties in the taxonomy
    Specialties(map::SpecialtiesArgs),

    /// Show version and supported features
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print version info as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Map(args) => map::map_expert(args).await,
        Commands::Specialties(args) => map::list_specialties(args).await,
        Commands::Version(args) => show_version(args),
    }
}

fn show_version(args: VersionArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&version::get_version_info())?);
    } else {
        println!("{}", version::get_version_string());
        println!("Features: {}", version::FEATURES.join(", "));
    }
    Ok(())
}
