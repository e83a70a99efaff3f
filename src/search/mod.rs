//! Homology search against a second assembly.
//!
//! The location pipeline only needs one thing from an aligner: the best hit of a
//! gene sequence in the target genome. [`HomologySearch`] is that seam;
//! [`BlastSearch`] implements it with NCBI BLAST+ run as external processes.
//!
//! ## Resource model
//!
//! - The target index is built once per run (lazily, on the first query) inside a
//!   [`tempfile::TempDir`] owned by the client, and reused by every query.
//! - Each query gets its own nested temporary directory for the query FASTA and
//!   the search output; it is removed on every exit path, including aligner failure.
//! - Aligners are invoked with explicit argument vectors, never through a shell.
//!
//! The client returns the raw best hit. Deciding whether a hit is an acceptable
//! mapping (identity and coverage thresholds) belongs to the caller.
//!
//! [`BlastSearch`]: blast::BlastSearch

use std::path::PathBuf;

use thiserror::Error;

use crate::search::hit::HomologyHit;

pub mod blast;
pub mod hit;

/// Default significance cutoff for reported alignments
pub const DEFAULT_MAX_EVALUE: f64 = 1e-10;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} failed (exit code: {code:?}): {stderr}")]
    ToolFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Target genome not found: {0}")]
    MissingTarget(PathBuf),

    #[error("Target index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Query is not a nucleotide sequence")]
    InvalidQuery,

    #[error("Invalid hit line: {0}")]
    InvalidHit(String),
}

/// Finds the best hit of a nucleotide query in a fixed target genome
pub trait HomologySearch {
    /// Best hit of `sequence`, or `None` when nothing significant aligns.
    ///
    /// `name` labels the query in aligner inputs and logs only.
    ///
    /// # Errors
    ///
    /// Returns a `SearchError` when the aligner cannot be run, exits with failure,
    /// or produces output that cannot be parsed.
    fn search(&self, name: &str, sequence: &str) -> Result<Option<HomologyHit>, SearchError>;

    /// Like [`search`](Self::search), folding every failure into `None`.
    fn locate(&self, name: &str, sequence: &str) -> Option<HomologyHit> {
        match self.search(name, sequence) {
            Ok(hit) => hit,
            // Already reported once when the index was built
            Err(e @ SearchError::IndexUnavailable(_)) => {
                tracing::debug!("Homology search for {name} skipped: {e}");
                None
            }
            Err(e) => {
                tracing::warn!("Homology search for {name} failed: {e}");
                None
            }
        }
    }
}

/// Stand-in for a target that could not be prepared; every query is unavailable
#[derive(Debug, Clone)]
pub struct Unavailable {
    pub reason: String,
}

impl HomologySearch for Unavailable {
    fn search(&self, _name: &str, _sequence: &str) -> Result<Option<HomologyHit>, SearchError> {
        Err(SearchError::IndexUnavailable(self.reason.clone()))
    }
}
