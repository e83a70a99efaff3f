use serde::Serialize;

use crate::core::types::{Metric, ToolSource};

/// Placeholder for identifier fields the source tool did not supply
pub const UNKNOWN_FIELD: &str = "Unknown";

/// 1-based inclusive position on the source assembly, with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coordinates {
    pub start: u64,
    pub end: u64,
}

impl Coordinates {
    /// Parse a start/end pair, swapping reverse-oriented values.
    ///
    /// Returns `None` for non-numeric values or a zero coordinate.
    #[must_use]
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start: u64 = start.trim().parse().ok()?;
        let end: u64 = end.trim().parse().ok()?;
        if start == 0 || end == 0 {
            return None;
        }
        Some(Self {
            start: start.min(end),
            end: start.max(end),
        })
    }
}

/// A normalized AMR gene call from one upstream tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneCall {
    pub gene_name: String,

    /// Composite identifier from the tool, or `<Tool>_<gene_name>` when absent
    pub gene_id: String,

    pub contig: String,

    /// `None` when the tool reported no usable position (e.g. protein-only runs)
    pub coordinates: Option<Coordinates>,

    pub percent_identity: Metric,
    pub percent_length: Metric,

    pub category: String,
    pub database: String,
    pub accession: String,

    pub is_beta_lactam: bool,
    pub is_point_mutation: bool,
    pub source: ToolSource,
}

impl GeneCall {
    /// Create a call at `start..=end` with every optional field unset.
    ///
    /// The gene id is synthesized from the tool name; identifier fields default to
    /// [`UNKNOWN_FIELD`] and metrics to [`Metric::NotApplicable`].
    pub fn new(
        source: ToolSource,
        gene_name: impl Into<String>,
        contig: impl Into<String>,
        start: u64,
        end: u64,
    ) -> Self {
        Self::at(
            source,
            gene_name,
            contig,
            Some(Coordinates {
                start: start.min(end),
                end: start.max(end),
            }),
        )
    }

    /// Create a call at an optional position, as read from a report
    pub fn at(
        source: ToolSource,
        gene_name: impl Into<String>,
        contig: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        let gene_name = gene_name.into();
        Self {
            gene_id: format!("{}_{gene_name}", source.name()),
            gene_name,
            contig: contig.into(),
            coordinates,
            percent_identity: Metric::NotApplicable,
            percent_length: Metric::NotApplicable,
            category: UNKNOWN_FIELD.to_string(),
            database: UNKNOWN_FIELD.to_string(),
            accession: UNKNOWN_FIELD.to_string(),
            is_beta_lactam: false,
            is_point_mutation: false,
            source,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self.is_beta_lactam = is_beta_lactam_category(&self.category);
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, percent_identity: Metric, percent_length: Metric) -> Self {
        self.percent_identity = percent_identity;
        self.percent_length = percent_length;
        self
    }

    /// Key of the cross-tool identity relation: same contig, same gene name ignoring case
    #[must_use]
    pub fn identity_key(&self) -> (String, String) {
        (self.contig.clone(), self.gene_name.to_lowercase())
    }
}

/// A category names a beta-lactam class when it contains "LACTAM" in any case
#[must_use]
pub fn is_beta_lactam_category(category: &str) -> bool {
    category.to_uppercase().contains("LACTAM")
}
