use serde::{Serialize, Serializer};

/// Upstream annotation tool that produced a gene call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ToolSource {
    /// Curated-database matcher; primary source
    #[serde(rename = "GAMMA")]
    Gamma,
    /// Curated-protein-family matcher; secondary source
    #[serde(rename = "AMRFinder")]
    AmrFinder,
}

impl ToolSource {
    /// Name used in reports and in synthesized gene ids
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Gamma => "GAMMA",
            Self::AmrFinder => "AMRFinder",
        }
    }

    /// Minimum number of tab-separated columns for a row to be usable
    #[must_use]
    pub fn min_columns(self) -> usize {
        match self {
            Self::Gamma => 12,
            Self::AmrFinder => 6,
        }
    }
}

impl std::fmt::Display for ToolSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A percentage metric that may not be reported by the source tool
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Metric {
    /// Percentage in `[0, 100]`, rounded to two decimals
    Value(f64),
    /// The tool does not report this metric
    #[default]
    NotApplicable,
}

impl Metric {
    /// Build a percentage from a 0-1 fraction
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        Self::from_percent(fraction * 100.0)
    }

    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        Self::Value((percent * 100.0).round() / 100.0)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.2}"),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotApplicable => serializer.serialize_none(),
        }
    }
}

/// Location class of a contig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyClass {
    Chromosome,
    Plasmid,
    Unknown,
}

impl std::fmt::Display for TopologyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chromosome => write!(f, "chromosome"),
            Self::Plasmid => write!(f, "plasmid"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of re-locating a call onto the target assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    /// Best hit passed the identity and coverage thresholds
    Mapped,
    /// No hit, or the best hit failed a threshold
    NotMapped,
    /// Single-assembly mode; no re-location attempted
    NotApplicable,
}

impl std::fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mapped => write!(f, "mapped"),
            Self::NotMapped => write!(f, "not_mapped"),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Assembly technology, which selects the contig classification profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyKind {
    /// Fragmented short-read assembly (e.g. Phoenix/SPAdes output)
    #[default]
    Draft,
    /// Closed long-read or hybrid assembly
    Complete,
}
