//! Report tables and run summaries.
//!
//! - [`ReportAssembler`]: projects mapped calls into the summary and detailed tables
//! - [`Table`]: a header plus rows, written as tab-separated text
//! - [`RunSummary`]: per-sample counts, including skipped and dropped records
//!
//! Row order always follows the mapper's encounter order. Values that do not
//! apply print as `N/A`; unknown contig lengths print as `unknown`; a call that
//! could not be mapped onto the target has location type `not_found`.
//!
//! [`RunSummary`]: summary::RunSummary

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::core::call::Coordinates;
use crate::core::types::{MappingStatus, Metric};
use crate::matching::engine::MappedGeneCall;

pub mod summary;

/// Location type printed for calls without a resolved topology
pub const NOT_FOUND: &str = "not_found";

const NOT_APPLICABLE: &str = "N/A";

/// Start and end cells, `N/A` for an unplaced call
fn position_cells(coordinates: Option<Coordinates>) -> [String; 2] {
    coordinates.map_or_else(
        || [NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string()],
        |c| [c.start.to_string(), c.end.to_string()],
    )
}

/// E-value as BLAST prints it: exact zero is `0.0`, everything else in exponent form
fn format_evalue(e_value: f64) -> String {
    if e_value == 0.0 {
        "0.0".to_string()
    } else {
        format!("{e_value:e}")
    }
}

/// Which columns the tables carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    SingleAssembly,
    CrossAssembly,
}

/// A tab-separated table with one header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a column by header name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| *h == name)
    }

    /// Write as TSV.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.header.join("\t"))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|cell| sanitize_cell(cell)).collect();
            writeln!(writer, "{}", cells.join("\t"))?;
        }
        Ok(())
    }

    /// Write as a TSV file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_tsv_file(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_tsv(&mut writer)?;
        writer.flush()
    }
}

/// Keep each cell on one line and inside one column
fn sanitize_cell(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}

/// Projects mapped calls into the two output tables
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    sample_id: String,
    mode: ReportMode,
}

impl ReportAssembler {
    pub fn new(sample_id: impl Into<String>, mode: ReportMode) -> Self {
        Self {
            sample_id: sample_id.into(),
            mode,
        }
    }

    #[must_use]
    pub fn summary_header(&self) -> Vec<&'static str> {
        match self.mode {
            ReportMode::SingleAssembly => vec![
                "sample_id",
                "gene_name",
                "gene_id",
                "location_type",
                "contig_name",
                "contig_length",
                "start_position",
                "end_position",
                "percent_identity",
                "percent_length",
                "is_beta_lactam",
                "source",
            ],
            ReportMode::CrossAssembly => vec![
                "sample_id",
                "gene_name",
                "gene_id",
                "location_type",
                "mapping_status",
                "source_contig",
                "source_start",
                "source_end",
                "target_contig",
                "target_contig_length",
                "target_start",
                "target_end",
                "percent_identity",
                "percent_length",
                "is_beta_lactam",
                "source",
            ],
        }
    }

    #[must_use]
    pub fn detailed_header(&self) -> Vec<&'static str> {
        let mut header = self.summary_header();
        header.extend(["category", "database", "accession", "is_point_mutation"]);
        if self.mode == ReportMode::CrossAssembly {
            header.extend(["hit_identity", "hit_coverage", "hit_evalue"]);
        }
        header
    }

    #[must_use]
    pub fn summary_row(&self, record: &MappedGeneCall) -> Vec<String> {
        let call = &record.call;
        let location_type = record
            .topology
            .map_or_else(|| NOT_FOUND.to_string(), |t| t.to_string());
        let contig_length = record
            .contig_length
            .map_or_else(|| "unknown".to_string(), |len| len.to_string());

        let mut row = vec![
            self.sample_id.clone(),
            call.gene_name.clone(),
            call.gene_id.clone(),
            location_type,
        ];

        match self.mode {
            ReportMode::SingleAssembly => {
                row.extend([call.contig.clone(), contig_length]);
                row.extend(position_cells(call.coordinates));
            }
            ReportMode::CrossAssembly => {
                let mapped = record
                    .hit
                    .as_ref()
                    .filter(|_| record.mapping_status == MappingStatus::Mapped);
                row.extend([record.mapping_status.to_string(), call.contig.clone()]);
                row.extend(position_cells(call.coordinates));
                match mapped {
                    Some(hit) => row.extend([
                        hit.subject_contig.clone(),
                        contig_length,
                        hit.subject_start.to_string(),
                        hit.subject_end.to_string(),
                    ]),
                    None => row.extend(std::iter::repeat(NOT_APPLICABLE.to_string()).take(4)),
                }
            }
        }

        row.extend([
            call.percent_identity.to_string(),
            call.percent_length.to_string(),
            call.is_beta_lactam.to_string(),
            call.source.to_string(),
        ]);
        row
    }

    #[must_use]
    pub fn detailed_row(&self, record: &MappedGeneCall) -> Vec<String> {
        let call = &record.call;
        let mut row = self.summary_row(record);
        row.extend([
            call.category.clone(),
            call.database.clone(),
            call.accession.clone(),
            call.is_point_mutation.to_string(),
        ]);

        if self.mode == ReportMode::CrossAssembly {
            match &record.hit {
                Some(hit) => row.extend([
                    Metric::from_percent(hit.identity_pct).to_string(),
                    Metric::from_percent(hit.coverage_pct).to_string(),
                    format_evalue(hit.e_value),
                ]),
                None => row.extend(std::iter::repeat(NOT_APPLICABLE.to_string()).take(3)),
            }
        }
        row
    }

    #[must_use]
    pub fn summary(&self, records: &[MappedGeneCall]) -> Table {
        Table {
            header: self.summary_header(),
            rows: records.iter().map(|r| self.summary_row(r)).collect(),
        }
    }

    #[must_use]
    pub fn detailed(&self, records: &[MappedGeneCall]) -> Table {
        Table {
            header: self.detailed_header(),
            rows: records.iter().map(|r| self.detailed_row(r)).collect(),
        }
    }
}
