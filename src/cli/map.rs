use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::catalog::store::ContigCatalog;
use crate::cli::{finish, OutputFormat, SampleArgs, SampleInputs};
use crate::core::types::AssemblyKind;
use crate::matching::engine::{
    GeneLocationMapper, MappingConfig, DEFAULT_MIN_COVERAGE_PCT, DEFAULT_MIN_IDENTITY_PCT,
};
use crate::report::ReportMode;
use crate::search::blast::{BlastConfig, BlastSearch};
use crate::search::{HomologySearch, Unavailable, DEFAULT_MAX_EVALUE};

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    /// Second assembly of the same isolate to re-locate calls onto (FASTA, optionally gzipped)
    #[arg(long)]
    pub target: PathBuf,

    /// Classification profile of the target assembly
    #[arg(long, value_enum, default_value = "complete")]
    pub target_kind: AssemblyKind,

    /// Minimum percent identity of an accepted hit
    #[arg(long, default_value_t = DEFAULT_MIN_IDENTITY_PCT)]
    pub min_identity: f64,

    /// Minimum percent of the gene covered by an accepted hit
    #[arg(long, default_value_t = DEFAULT_MIN_COVERAGE_PCT)]
    pub min_coverage: f64,

    /// Maximum e-value of reported alignments
    #[arg(long, default_value_t = DEFAULT_MAX_EVALUE)]
    pub evalue: f64,

    /// blastn executable
    #[arg(long, default_value = "blastn")]
    pub blastn: PathBuf,

    /// makeblastdb executable
    #[arg(long, default_value = "makeblastdb")]
    pub makeblastdb: PathBuf,

    /// Threads per blastn search
    #[arg(long, default_value = "1")]
    pub threads: usize,

    /// Search an existing BLAST database next to the target instead of building one
    #[arg(long)]
    pub reuse_index: bool,
}

pub fn run(args: MapArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inputs = SampleInputs::load(&args.sample);
    let target = ContigCatalog::load(&args.target);

    if verbose {
        eprintln!(
            "Loaded {} GAMMA calls, {} AMRFinder calls, {} source contigs, {} target contigs",
            inputs.gamma.calls.len(),
            inputs.amrfinder.calls.len(),
            inputs.assembly.len(),
            target.len()
        );
    }

    let blast_config = BlastConfig {
        blastn: args.blastn.clone(),
        makeblastdb: args.makeblastdb.clone(),
        max_evalue: args.evalue,
        threads: args.threads,
        reuse_existing_index: args.reuse_index,
    };

    // A target that cannot be searched leaves every call unmapped
    let search: Box<dyn HomologySearch> = match BlastSearch::new(&args.target, blast_config) {
        Ok(search) => Box::new(search),
        Err(e) => {
            warn!("Cannot search target genome: {e}");
            Box::new(Unavailable {
                reason: e.to_string(),
            })
        }
    };

    let config = MappingConfig {
        source_kind: args.sample.assembly_kind,
        target_kind: args.target_kind,
        min_identity_pct: args.min_identity,
        min_coverage_pct: args.min_coverage,
    };
    let mapper = GeneLocationMapper::new(&inputs.assembly, config);
    let outcome = mapper.map_cross(
        &inputs.gamma.calls,
        &inputs.amrfinder.calls,
        &target,
        search.as_ref(),
    );

    finish(
        &args.sample,
        ReportMode::CrossAssembly,
        &inputs,
        &outcome,
        format,
    )
}
