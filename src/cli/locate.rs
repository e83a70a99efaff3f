use clap::Args;

use crate::cli::{finish, OutputFormat, SampleArgs, SampleInputs};
use crate::matching::engine::{GeneLocationMapper, MappingConfig};
use crate::report::ReportMode;

#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub sample: SampleArgs,
}

pub fn run(args: LocateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inputs = SampleInputs::load(&args.sample);

    if verbose {
        eprintln!(
            "Loaded {} GAMMA calls, {} AMRFinder calls, {} contigs",
            inputs.gamma.calls.len(),
            inputs.amrfinder.calls.len(),
            inputs.assembly.len()
        );
    }

    let config = MappingConfig {
        source_kind: args.sample.assembly_kind,
        ..MappingConfig::default()
    };
    let mapper = GeneLocationMapper::new(&inputs.assembly, config);
    let outcome = mapper.map_single(&inputs.gamma.calls, &inputs.amrfinder.calls);

    finish(
        &args.sample,
        ReportMode::SingleAssembly,
        &inputs,
        &outcome,
        format,
    )
}
