//! Core data types for AMR gene location.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`GeneCall`]: A normalized gene call from one of the upstream annotation tools
//! - [`ContigRecord`]: A single contig from an assembly FASTA (id, length, sequence)
//! - [`ToolSource`], [`Metric`]: Provenance and optional quality metrics of a call
//! - [`TopologyClass`], [`MappingStatus`], [`AssemblyKind`]: Result classification types
//!
//! ## Upstream Tools
//!
//! | Tool      | Role               | Quality metrics         | Composite id |
//! |-----------|--------------------|-------------------------|--------------|
//! | GAMMA     | database matcher   | identity, length (0-1)  | yes          |
//! | AMRFinder | protein families   | not reported            | synthesized  |
//!
//! Missing metrics are carried as [`Metric::NotApplicable`], never as `0`, so that
//! "no data" cannot be mistaken for a 0% match.
//!
//! [`GeneCall`]: call::GeneCall
//! [`ContigRecord`]: contig::ContigRecord
//! [`ToolSource`]: types::ToolSource
//! [`Metric`]: types::Metric
//! [`Metric::NotApplicable`]: types::Metric::NotApplicable
//! [`TopologyClass`]: types::TopologyClass
//! [`MappingStatus`]: types::MappingStatus
//! [`AssemblyKind`]: types::AssemblyKind

pub mod call;
pub mod contig;
pub mod types;
