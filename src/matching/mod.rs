//! Gene location engine and contig classification.
//!
//! This module provides the core location functionality:
//!
//! - [`GeneLocationMapper`]: Main entry point; resolves where each gene call lives
//! - [`classify`]: Chromosome / plasmid classification of a contig
//! - [`CallIdentityIndex`]: Cross-tool duplicate detection
//!
//! ## Modes
//!
//! 1. **Single assembly**: every call is classified on the assembly it was called
//!    on; no re-location is attempted.
//! 2. **Cross assembly**: every call's sequence is extracted from the source
//!    assembly and searched in a second, independent assembly. A best hit with at
//!    least 95% identity over 90% of the query is `Mapped` and classified on the
//!    target; anything else is `NotMapped`.
//!
//! In both modes primary-tool (GAMMA) calls come first, in source order, followed
//! by secondary-tool (AMRFinder) calls that do not share contig and gene name
//! (ignoring case) with any primary call.
//!
//! ## Example
//!
//! ```rust
//! use amr_locator::catalog::store::ContigCatalog;
//! use amr_locator::core::call::GeneCall;
//! use amr_locator::core::contig::ContigRecord;
//! use amr_locator::core::types::{ToolSource, TopologyClass};
//! use amr_locator::matching::{GeneLocationMapper, MappingConfig};
//!
//! let catalog = ContigCatalog::from_records(vec![ContigRecord::new("contig_1", vec![b'A'; 1_000])]);
//! let calls = vec![GeneCall::new(ToolSource::Gamma, "blaKPC-2", "contig_1", 100, 900)];
//!
//! let mapper = GeneLocationMapper::new(&catalog, MappingConfig::default());
//! let outcome = mapper.map_single(&calls, &[]);
//! assert_eq!(outcome.records[0].topology, Some(TopologyClass::Plasmid));
//! ```

pub mod classifier;
pub mod engine;

pub use classifier::classify;
pub use engine::{
    CallIdentityIndex, GeneLocationMapper, MappedGeneCall, MappingConfig, MappingOutcome,
    MappingStats,
};
