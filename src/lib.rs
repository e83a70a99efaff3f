//! # amr-locator
//!
//! A library for deciding whether antimicrobial-resistance genes sit on a
//! chromosome or a plasmid.
//!
//! Short-read draft assemblies rarely say which contigs are plasmids, and the
//! two common AMR detectors (GAMMA and AMRFinder) report overlapping but not
//! identical gene sets. `amr-locator` merges both tools' calls for one sample,
//! classifies the contig each gene lives on, and can re-locate every gene onto a
//! second, independent assembly of the same isolate (typically a closed
//! long-read genome) where topology is far more reliable.
//!
//! ## Features
//!
//! - **Two-tool merge**: GAMMA calls first, AMRFinder calls only for genes GAMMA missed
//! - **Quality filtering**: GAMMA calls below 90% length or 98% identity are dropped
//! - **Topology heuristics**: contig names first, then size bands per assembly type
//! - **Cross-assembly mapping**: BLAST best hit, accepted at 95% identity over 90% of the gene
//! - **Fail-soft inputs**: missing or malformed inputs degrade the report, never abort it
//!
//! ## Example
//!
//! ```rust
//! use amr_locator::{ContigCatalog, ContigRecord, GeneLocationMapper, MappingConfig};
//! use amr_locator::parsing::parse_gene_calls;
//! use amr_locator::report::{ReportAssembler, ReportMode};
//! use amr_locator::ToolSource;
//!
//! let gamma = "Gene\tContig\tStart\tStop\tMatch_Type\tDescription\tCodon_Changes\tBP_Changes\tAA_Changes\tCodon_Percent\tBP_Percent\tPercent_Length\n\
//!              ResGANNCBI__20230517__blaKPC-2__NG_049253.1__BETA-LACTAM\tcontig_1\t100\t1000\tNative\tx\t0\t0\t0\t0.99\t0.99\t0.95\n";
//! let calls = parse_gene_calls(gamma, ToolSource::Gamma);
//! let assembly = ContigCatalog::from_records(vec![ContigRecord::new("contig_1", vec![b'A'; 50_000])]);
//!
//! let mapper = GeneLocationMapper::new(&assembly, MappingConfig::default());
//! let outcome = mapper.map_single(&calls.calls, &[]);
//!
//! let table = ReportAssembler::new("S1", ReportMode::SingleAssembly).summary(&outcome.records);
//! assert_eq!(table.rows[0][3], "plasmid");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Gene calls, contigs and shared enums
//! - [`parsing`]: Parsers for GAMMA, AMRFinder and FASTA inputs
//! - [`catalog`]: Contig catalog and sequence extraction
//! - [`matching`]: Contig classifier and the gene location mapper
//! - [`search`]: Homology search against a second assembly
//! - [`report`]: Output tables and run summaries
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod report;
pub mod search;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::ContigCatalog;
pub use core::call::{Coordinates, GeneCall};
pub use core::contig::ContigRecord;
pub use core::types::*;
pub use matching::engine::{GeneLocationMapper, MappedGeneCall, MappingConfig};
pub use search::HomologySearch;
