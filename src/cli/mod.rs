//! Command-line interface for amr-locator.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **locate**: Classify each AMR gene call on the assembly it was called on
//! - **map**: Re-locate each call onto a second, independent assembly by homology search
//!
//! ## Usage
//!
//! ```text
//! # Single-assembly mode
//! amr-locator locate --sample-id S1 --gamma S1.gamma --amrfinder S1_amr.tsv \
//!     --assembly S1.scaffolds.fa.gz \
//!     --output-locations S1_locations.tsv --output-detailed S1_detailed.tsv
//!
//! # Cross-assembly mode against a closed long-read assembly
//! amr-locator map --sample-id S1 --gamma S1.gamma --assembly S1.scaffolds.fa.gz \
//!     --target S1_flye.fasta \
//!     --output-locations S1_locations.tsv --output-detailed S1_detailed.tsv
//!
//! # JSON run summary for scripting
//! amr-locator --format json locate ...
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::catalog::store::ContigCatalog;
use crate::core::types::{AssemblyKind, ToolSource};
use crate::matching::engine::MappingOutcome;
use crate::parsing::{read_gene_calls, read_optional_gene_calls, ParsedCalls};
use crate::report::summary::RunSummary;
use crate::report::{ReportAssembler, ReportMode};

pub mod locate;
pub mod map;

#[derive(Parser)]
#[command(name = "amr-locator")]
#[command(version)]
#[command(about = "Locate AMR gene calls on chromosomes or plasmids")]
#[command(
    long_about = "amr-locator merges the AMR gene calls of GAMMA and AMRFinder for one sample and decides whether each gene sits on a chromosome or a plasmid.\n\nCalls can be classified on the assembly they were made on, or re-located by BLAST onto a second assembly of the same isolate (for example a closed long-read genome) and classified there."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Format of the run summary printed to stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify gene calls on the assembly they were called on
    Locate(locate::LocateArgs),

    /// Re-locate gene calls onto a second assembly, then classify them
    Map(map::MapArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Inputs and outputs shared by every mode
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Sample identifier written to every output row
    #[arg(long)]
    pub sample_id: String,

    /// GAMMA report (.gamma)
    #[arg(long)]
    pub gamma: PathBuf,

    /// AMRFinder report; skipped when absent
    #[arg(long)]
    pub amrfinder: Option<PathBuf>,

    /// Assembly the gene calls were made on (FASTA, optionally gzipped)
    #[arg(long)]
    pub assembly: PathBuf,

    /// Summary table of gene locations (TSV)
    #[arg(long)]
    pub output_locations: PathBuf,

    /// Detailed table of gene locations (TSV)
    #[arg(long)]
    pub output_detailed: PathBuf,

    /// Classification profile of the assembly
    #[arg(long, value_enum, default_value = "draft")]
    pub assembly_kind: AssemblyKind,
}

/// Parsed inputs of one sample
pub(crate) struct SampleInputs {
    pub gamma: ParsedCalls,
    pub amrfinder: ParsedCalls,
    pub assembly: ContigCatalog,
}

impl SampleInputs {
    /// Load everything, degrading unreadable inputs to empty ones
    pub fn load(args: &SampleArgs) -> Self {
        let gamma = read_gene_calls(&args.gamma, ToolSource::Gamma);
        let amrfinder = read_optional_gene_calls(args.amrfinder.as_deref(), ToolSource::AmrFinder);
        let assembly = ContigCatalog::load(&args.assembly);

        Self {
            gamma,
            amrfinder,
            assembly,
        }
    }
}

/// Write both tables and print the run summary
pub(crate) fn finish(
    args: &SampleArgs,
    mode: ReportMode,
    inputs: &SampleInputs,
    outcome: &MappingOutcome,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let assembler = ReportAssembler::new(&args.sample_id, mode);
    write_table(
        &args.output_locations,
        &assembler.summary(&outcome.records),
    )?;
    write_table(
        &args.output_detailed,
        &assembler.detailed(&outcome.records),
    )?;

    let summary = RunSummary::new(
        &args.sample_id,
        mode,
        &inputs.gamma,
        &inputs.amrfinder,
        inputs.assembly.len(),
        outcome,
    );

    match format {
        OutputFormat::Text => println!("{}", summary.to_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

fn write_table(path: &Path, table: &crate::report::Table) -> anyhow::Result<()> {
    table
        .write_tsv_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}
