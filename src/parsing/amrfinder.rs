//! Parser for AMRFinderPlus reports.
//!
//! Columns used (0-based): 1 contig, 2 start, 3 stop, 5 gene symbol and, when
//! present, 10 class. Every row with at least 6 columns is kept, including rows
//! whose start/stop are `NA` (those calls carry no coordinates); AMRFinder does not report identity or length in the same
//! form as GAMMA, so both metrics are [`Metric::NotApplicable`].
//!
//! [`Metric::NotApplicable`]: crate::core::types::Metric::NotApplicable

use crate::core::call::{Coordinates, GeneCall};
use crate::core::types::ToolSource;
use crate::parsing::RowOutcome;

/// Token marking a point-mutation row anywhere in the line
pub const POINT_MUTATION_MARKER: &str = "POINT";

/// Category, database and accession value for AMRFinder-only calls
pub const AMRFINDER_LABEL: &str = "AMRFinder";

const COL_CONTIG: usize = 1;
const COL_START: usize = 2;
const COL_END: usize = 3;
const COL_SYMBOL: usize = 5;
const COL_CLASS: usize = 10;

pub(crate) fn parse_row(line: &str, fields: &[&str]) -> RowOutcome {
    if fields.len() < ToolSource::AmrFinder.min_columns() {
        return RowOutcome::Malformed;
    }

    let category = fields
        .get(COL_CLASS)
        .map(|class| class.trim())
        .filter(|class| !class.is_empty() && *class != "NA")
        .unwrap_or(AMRFINDER_LABEL);

    let mut call = GeneCall::at(
        ToolSource::AmrFinder,
        fields[COL_SYMBOL].trim(),
        fields[COL_CONTIG],
        Coordinates::parse(fields[COL_START], fields[COL_END]),
    )
    .with_category(category);
    call.database = AMRFINDER_LABEL.to_string();
    call.accession = "N/A".to_string();
    call.is_point_mutation = line.contains(POINT_MUTATION_MARKER);

    RowOutcome::Call(call)
}
