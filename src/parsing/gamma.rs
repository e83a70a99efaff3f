//! Parser for GAMMA gene-call reports.
//!
//! Columns used (0-based):
//!
//! | Col | Content |
//! |-----|---------|
//! | 0   | `database__version__gene__accession__category` composite id |
//! | 1   | contig |
//! | 2   | start (1-based) |
//! | 3   | end (1-based, inclusive) |
//! | 9   | identity fraction (0-1) |
//! | 11  | length fraction (0-1) |
//!
//! Rows with fewer than 12 columns are skipped; rows without usable start/end
//! values are kept unplaced. A call is kept only when both
//! fractions clear [`MIN_LENGTH_FRACTION`] and [`MIN_IDENTITY_FRACTION`].

use crate::core::call::{Coordinates, GeneCall, UNKNOWN_FIELD};
use crate::core::types::{Metric, ToolSource};
use crate::parsing::RowOutcome;

/// Minimum fraction of the reference gene length covered by the call
pub const MIN_LENGTH_FRACTION: f64 = 0.90;

/// Minimum fraction of identical bases
pub const MIN_IDENTITY_FRACTION: f64 = 0.98;

const COL_GENE_ID: usize = 0;
const COL_CONTIG: usize = 1;
const COL_START: usize = 2;
const COL_END: usize = 3;
const COL_IDENTITY: usize = 9;
const COL_LENGTH: usize = 11;

/// Fields decomposed from a GAMMA composite gene id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeId {
    pub database: String,
    pub version: String,
    pub gene_name: String,
    pub accession: String,
    pub category: String,
}

impl CompositeId {
    /// Split a `__`-joined id. With fewer than five parts the raw id becomes the
    /// gene name and every other field is [`UNKNOWN_FIELD`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split("__").collect();
        if let [database, version, gene_name, accession, category, ..] = parts.as_slice() {
            Self {
                database: (*database).to_string(),
                version: (*version).to_string(),
                gene_name: (*gene_name).to_string(),
                accession: (*accession).to_string(),
                category: (*category).to_string(),
            }
        } else {
            Self {
                database: UNKNOWN_FIELD.to_string(),
                version: UNKNOWN_FIELD.to_string(),
                gene_name: raw.to_string(),
                accession: UNKNOWN_FIELD.to_string(),
                category: UNKNOWN_FIELD.to_string(),
            }
        }
    }
}

/// Parse a 0-1 fraction column. An empty cell counts as 0.
fn parse_fraction(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(0.0);
    }
    field.parse().ok()
}

/// Whether a call with these fractions clears the quality gate
#[must_use]
pub fn passes_filter(identity_fraction: f64, length_fraction: f64) -> bool {
    length_fraction >= MIN_LENGTH_FRACTION && identity_fraction >= MIN_IDENTITY_FRACTION
}

pub(crate) fn parse_row(fields: &[&str]) -> RowOutcome {
    if fields.len() < ToolSource::Gamma.min_columns() {
        return RowOutcome::Malformed;
    }

    let (Some(identity), Some(length)) = (
        parse_fraction(fields[COL_IDENTITY]),
        parse_fraction(fields[COL_LENGTH]),
    ) else {
        return RowOutcome::Malformed;
    };

    if !passes_filter(identity, length) {
        return RowOutcome::Filtered;
    }

    let raw_id = fields[COL_GENE_ID];
    let id = CompositeId::parse(raw_id);

    let coordinates = Coordinates::parse(fields[COL_START], fields[COL_END]);
    let mut call = GeneCall::at(ToolSource::Gamma, id.gene_name, fields[COL_CONTIG], coordinates)
        .with_category(id.category)
        .with_metrics(Metric::from_fraction(identity), Metric::from_fraction(length));
    call.gene_id = raw_id.to_string();
    call.database = id.database;
    call.accession = id.accession;

    RowOutcome::Call(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_gene_calls;

    const HEADER: &str = "Gene\tContig\tStart\tStop\tMatch_Type\tDescription\tCodon_Changes\tBP_Changes\tAA_Changes\tCodon_Percent\tBP_Percent\tPercent_Length\tMatch_Length\tTarget_Length\tStrand";

    fn row(gene: &str, contig: &str, identity: &str, length: &str) -> String {
        format!("{gene}\t{contig}\t100\t1000\tNative\tdesc\t0\t0\t0\t{identity}\t1.0\t{length}\t900\t900\t+")
    }

    fn report(rows: &[String]) -> String {
        let mut text = String::from(HEADER);
        for r in rows {
            text.push('\n');
            text.push_str(r);
        }
        text.push('\n');
        text
    }

    #[test]
    fn test_composite_id_five_parts() {
        let id = CompositeId::parse("ResGANNCBI__20230517__blaKPC-2__NG_049253.1__BETA-LACTAM");
        assert_eq!(id.database, "ResGANNCBI");
        assert_eq!(id.version, "20230517");
        assert_eq!(id.gene_name, "blaKPC-2");
        assert_eq!(id.accession, "NG_049253.1");
        assert_eq!(id.category, "BETA-LACTAM");
    }

    #[test]
    fn test_composite_id_malformed() {
        let id = CompositeId::parse("db__v1__geneX");
        assert_eq!(id.gene_name, "db__v1__geneX");
        assert_eq!(id.database, UNKNOWN_FIELD);
        assert_eq!(id.version, UNKNOWN_FIELD);
        assert_eq!(id.accession, UNKNOWN_FIELD);
        assert_eq!(id.category, UNKNOWN_FIELD);
    }

    #[test]
    fn test_filter_boundaries() {
        assert!(passes_filter(0.98, 0.90));
        assert!(!passes_filter(0.9799, 0.95));
        assert!(!passes_filter(0.99, 0.8999));
        assert!(passes_filter(1.0, 1.0));
    }

    #[test]
    fn test_filter_boundaries_from_text() {
        let text = report(&[
            row("a__1__geneA__acc__CAT", "c1", "0.98", "0.90"),
            row("a__1__geneB__acc__CAT", "c1", "0.9799", "0.95"),
            row("a__1__geneC__acc__CAT", "c1", "0.99", "0.8999"),
        ]);
        let parsed = parse_gene_calls(&text, ToolSource::Gamma);
        assert_eq!(parsed.calls.len(), 1);
        assert_eq!(parsed.calls[0].gene_name, "geneA");
        assert_eq!(parsed.filtered_rows, 2);
        assert_eq!(parsed.skipped_rows, 0);
    }

    #[test]
    fn test_parse_full_row() {
        let text = report(&[row(
            "ResGANNCBI__20230517__blaKPC-2__NG_049253.1__BETA-LACTAM",
            "contig_1",
            "0.99",
            "0.95",
        )]);
        let parsed = parse_gene_calls(&text, ToolSource::Gamma);
        assert_eq!(parsed.calls.len(), 1);

        let call = &parsed.calls[0];
        assert_eq!(call.gene_name, "blaKPC-2");
        assert_eq!(
            call.gene_id,
            "ResGANNCBI__20230517__blaKPC-2__NG_049253.1__BETA-LACTAM"
        );
        assert_eq!(call.contig, "contig_1");
        assert_eq!(call.coordinates, Some(Coordinates { start: 100, end: 1000 }));
        assert_eq!(call.percent_identity, Metric::Value(99.0));
        assert_eq!(call.percent_length, Metric::Value(95.0));
        assert_eq!(call.database, "ResGANNCBI");
        assert_eq!(call.accession, "NG_049253.1");
        assert!(call.is_beta_lactam);
        assert!(!call.is_point_mutation);
        assert_eq!(call.source, ToolSource::Gamma);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = format!(
            "{HEADER}\nonly\tfour\tcolumns\there\n{}\n",
            row("x__1__geneA__acc__CAT", "c1", "1.0", "1.0")
        );
        let parsed = parse_gene_calls(&text, ToolSource::Gamma);
        assert_eq!(parsed.calls.len(), 1);
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn test_empty_fractions_fail_filter() {
        let text = report(&[row("x__1__geneA__acc__CAT", "c1", "", "")]);
        let parsed = parse_gene_calls(&text, ToolSource::Gamma);
        assert!(parsed.calls.is_empty());
        assert_eq!(parsed.filtered_rows, 1);
    }

    #[test]
    fn test_non_numeric_fraction_is_malformed() {
        let text = report(&[row("x__1__geneA__acc__CAT", "c1", "high", "1.0")]);
        let parsed = parse_gene_calls(&text, ToolSource::Gamma);
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn test_unusable_position_keeps_call() {
        let text = report(&[row("x__1__geneA__acc__CAT", "c1", "1.0", "1.0")
            .replacen("\t100\t1000\t", "\t?\t0\t", 1)]);
        let parsed = parse_gene_calls(&text, ToolSource::Gamma);
        assert_eq!(parsed.skipped_rows, 0);
        assert_eq!(parsed.calls.len(), 1);
        assert!(parsed.calls[0].coordinates.is_none());
    }

    #[test]
    fn test_malformed_id_keeps_raw_name() {
        let text = report(&[row("blaTEM-1", "c1", "1.0", "1.0")]);
        let parsed = parse_gene_calls(&text, ToolSource::Gamma);
        let call = &parsed.calls[0];
        assert_eq!(call.gene_name, "blaTEM-1");
        assert_eq!(call.gene_id, "blaTEM-1");
        assert_eq!(call.category, UNKNOWN_FIELD);
        assert!(!call.is_beta_lactam);
    }
}
