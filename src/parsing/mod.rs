//! Parsers for the pipeline's inputs.
//!
//! This module provides parsers for:
//!
//! - **GAMMA reports** (`.gamma`): curated-database gene calls, quality filtered on read
//! - **AMRFinder reports**: protein-family gene calls, optional input
//! - **Assembly FASTA files**: contig ids, lengths and sequences
//!
//! ## Failure policy
//!
//! Gene-call parsers never fail on a single row. Rows with too few columns are
//! skipped and counted in [`ParsedCalls::skipped_rows`]. A row whose start or stop
//! is not a usable position is kept without coordinates;
//! an unreadable file yields an empty [`ParsedCalls`] with the error recorded and a
//! logged warning, so that a missing collaborator report degrades the run instead
//! of aborting it.
//!
//! ## Example
//!
//! ```rust
//! use amr_locator::core::types::ToolSource;
//! use amr_locator::parsing::parse_gene_calls;
//!
//! let report = "header\nPROT_1\tcontig_1\t100\t900\t+\tblaCTX-M-15\n";
//! let parsed = parse_gene_calls(report, ToolSource::AmrFinder);
//! assert_eq!(parsed.calls.len(), 1);
//! assert_eq!(parsed.calls[0].gene_id, "AMRFinder_blaCTX-M-15");
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::call::GeneCall;
use crate::core::types::ToolSource;
use crate::utils::validation::MAX_CONTIGS;

pub mod amrfinder;
pub mod fasta;
pub mod gamma;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many contigs: {0} exceeds maximum allowed ({MAX_CONTIGS})")]
    TooManyContigs(usize),
}

/// Outcome of parsing one data row of a gene-call table
#[derive(Debug)]
pub enum RowOutcome {
    /// Row produced a call that passed the tool's own filter
    Call(GeneCall),
    /// Row was well formed but failed the tool's quality filter
    Filtered,
    /// Row was structurally unusable
    Malformed,
}

/// Gene calls read from one tool's report, with row accounting
#[derive(Debug, Clone, Default)]
pub struct ParsedCalls {
    pub calls: Vec<GeneCall>,

    /// Data rows seen (header excluded)
    pub rows_read: usize,

    /// Rows skipped for missing columns or unparseable metrics
    pub skipped_rows: usize,

    /// Rows dropped by the tool's quality filter
    pub filtered_rows: usize,

    /// Why the report could not be read, if it could not
    pub error: Option<String>,
}

impl ParsedCalls {
    fn failed(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Parse a tool's report text. The first line is always a header.
#[must_use]
pub fn parse_gene_calls(text: &str, tool: ToolSource) -> ParsedCalls {
    let mut parsed = ParsedCalls::default();

    for (i, line) in text.lines().enumerate().skip(1) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        parsed.rows_read += 1;

        let fields: Vec<&str> = line.split('\t').collect();
        let outcome = match tool {
            ToolSource::Gamma => gamma::parse_row(&fields),
            ToolSource::AmrFinder => amrfinder::parse_row(line, &fields),
        };

        match outcome {
            RowOutcome::Call(call) => parsed.calls.push(call),
            RowOutcome::Filtered => parsed.filtered_rows += 1,
            RowOutcome::Malformed => {
                // Line numbers are 1-based for user friendliness
                debug!("Skipping malformed {tool} row on line {}", i + 1);
                parsed.skipped_rows += 1;
            }
        }
    }

    parsed
}

/// Read and parse a tool's report, failing soft on I/O errors.
#[must_use]
pub fn read_gene_calls(path: &Path, tool: ToolSource) -> ParsedCalls {
    match std::fs::read(path) {
        Ok(bytes) => {
            let parsed = parse_gene_calls(&String::from_utf8_lossy(&bytes), tool);
            info!(
                "Read {} {tool} calls from {} ({} skipped, {} filtered)",
                parsed.calls.len(),
                path.display(),
                parsed.skipped_rows,
                parsed.filtered_rows
            );
            parsed
        }
        Err(e) => {
            warn!("Error parsing {tool} file {}: {e}", path.display());
            ParsedCalls::failed(e.to_string())
        }
    }
}

/// Read an optional report; absence is not an error and yields zero calls.
#[must_use]
pub fn read_optional_gene_calls(path: Option<&Path>, tool: ToolSource) -> ParsedCalls {
    match path {
        Some(path) if path.exists() => read_gene_calls(path, tool),
        Some(path) => {
            info!("No {tool} report at {}, continuing without it", path.display());
            ParsedCalls::default()
        }
        None => ParsedCalls::default(),
    }
}
