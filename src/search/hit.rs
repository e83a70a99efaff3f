//! Best-hit records parsed from BLAST tabular output.
//!
//! The search is run with a fixed custom tabular layout (`-outfmt 6` with the
//! fields below), so every line has the same columns:
//!
//! ```text
//! Col  Field     Description
//! 1    sseqid    Subject (target contig) id
//! 2    sstart    Subject start, 1-based
//! 3    send      Subject end, 1-based (smaller than sstart on the minus strand)
//! 4    pident    Percent identity
//! 5    length    Alignment length
//! 6    qlen      Query length
//! 7    evalue    Expect value
//! 8    bitscore  Bit score
//! 9    qcovhsp   Percent of the query covered by this HSP
//! ```

use serde::Serialize;

use crate::search::SearchError;

/// Output fields requested from `blastn -outfmt`
pub const BLAST_OUTPUT_FIELDS: &str = "sseqid sstart send pident length qlen evalue bitscore qcovhsp";

/// Minimum number of columns in a hit line (qcovhsp is optional)
const MIN_HIT_COLUMNS: usize = 8;

/// Best alignment of one query in the target genome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomologyHit {
    pub subject_contig: String,
    /// 1-based, always `<= subject_end`
    pub subject_start: u64,
    pub subject_end: u64,
    /// '+' or '-'
    pub strand: char,
    pub identity_pct: f64,
    /// Percent of the query length covered by the alignment
    pub coverage_pct: f64,
    pub e_value: f64,
    pub bit_score: f64,
}

impl HomologyHit {
    /// Parses a hit from a tab-separated line in [`BLAST_OUTPUT_FIELDS`] order.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidHit` if the line has fewer than 8 fields or a
    /// numeric field cannot be parsed.
    pub fn parse_line(line: &str) -> Result<Self, SearchError> {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() < MIN_HIT_COLUMNS {
            return Err(SearchError::InvalidHit(format!(
                "expected at least {MIN_HIT_COLUMNS} fields, found {}",
                fields.len()
            )));
        }

        let sstart: u64 = parse_field(fields[1], "sstart")?;
        let send: u64 = parse_field(fields[2], "send")?;
        let identity_pct: f64 = parse_field(fields[3], "pident")?;
        let length: f64 = parse_field(fields[4], "length")?;
        let qlen: f64 = parse_field(fields[5], "qlen")?;
        let e_value: f64 = parse_field(fields[6], "evalue")?;
        let bit_score: f64 = parse_field(fields[7], "bitscore")?;

        let coverage_pct = match fields.get(8) {
            Some(qcov) => parse_field(qcov, "qcovhsp")?,
            None if qlen > 0.0 => (length / qlen * 100.0).min(100.0),
            None => 0.0,
        };

        Ok(Self {
            subject_contig: fields[0].to_string(),
            subject_start: sstart.min(send),
            subject_end: sstart.max(send),
            strand: if send < sstart { '-' } else { '+' },
            identity_pct,
            coverage_pct,
            e_value,
            bit_score,
        })
    }

    /// Whether this hit is good enough to count as the gene's location
    #[must_use]
    pub fn is_acceptable(&self, min_identity_pct: f64, min_coverage_pct: f64) -> bool {
        self.identity_pct >= min_identity_pct && self.coverage_pct >= min_coverage_pct
    }
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, SearchError> {
    value
        .trim()
        .parse()
        .map_err(|_| SearchError::InvalidHit(format!("invalid {name} '{value}'")))
}

/// Parse the top-ranked hit of a search output, ignoring the rest.
///
/// # Errors
///
/// Returns `SearchError::InvalidHit` if the first non-comment line is malformed.
pub fn parse_best_hit(output: &str) -> Result<Option<HomologyHit>, SearchError> {
    output
        .lines()
        .find(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(HomologyHit::parse_line)
        .transpose()
}
