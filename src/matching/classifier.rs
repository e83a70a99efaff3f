use crate::core::types::{AssemblyKind, TopologyClass};

/// Name tokens marking a plasmid contig in any assembly
const PLASMID_TOKENS: &[&str] = &["plasmid", "plas", "p1", "p2", "p3", "p4", "p5"];

/// Name tokens marking a chromosome contig in any assembly
const CHROMOSOME_TOKENS: &[&str] = &["chromosome", "chr", "chrom"];

/// Extra plasmid tokens used by long-read assemblers (e.g. Flye/Unicycler)
const COMPLETE_PLASMID_TOKENS: &[&str] = &["unnamed"];

/// Extra chromosome tokens used by NCBI-style complete genome headers
const COMPLETE_CHROMOSOME_TOKENS: &[&str] = &["complete", "genome"];

/// Size bands for contigs whose names carry no topology token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeThresholds {
    /// Longer than this is a chromosome
    pub chromosome_above: u64,
    /// Shorter than this is a plasmid
    pub plasmid_below: u64,
}

impl AssemblyKind {
    /// Size bands differ because draft assemblies fragment chromosomes into many
    /// short contigs while complete assemblies close them.
    #[must_use]
    pub fn size_thresholds(self) -> SizeThresholds {
        match self {
            Self::Draft => SizeThresholds {
                chromosome_above: 1_000_000,
                plasmid_below: 500_000,
            },
            Self::Complete => SizeThresholds {
                chromosome_above: 2_000_000,
                plasmid_below: 1_000_000,
            },
        }
    }

    fn plasmid_tokens(self) -> impl Iterator<Item = &'static str> {
        let extra = match self {
            Self::Draft => &[][..],
            Self::Complete => COMPLETE_PLASMID_TOKENS,
        };
        PLASMID_TOKENS.iter().chain(extra).copied()
    }

    fn chromosome_tokens(self) -> impl Iterator<Item = &'static str> {
        let extra = match self {
            Self::Draft => &[][..],
            Self::Complete => COMPLETE_CHROMOSOME_TOKENS,
        };
        CHROMOSOME_TOKENS.iter().chain(extra).copied()
    }
}

/// Classify a contig as chromosome or plasmid from its id and length.
///
/// Name tokens win over size: plasmid tokens are checked first, then chromosome
/// tokens, then the size bands of the assembly kind.
#[must_use]
pub fn classify(contig_id: &str, length: u64, kind: AssemblyKind) -> TopologyClass {
    let name = contig_id.to_lowercase();

    if kind.plasmid_tokens().any(|token| name.contains(token)) {
        return TopologyClass::Plasmid;
    }
    if kind.chromosome_tokens().any(|token| name.contains(token)) {
        return TopologyClass::Chromosome;
    }

    let thresholds = kind.size_thresholds();
    if length > thresholds.chromosome_above {
        TopologyClass::Chromosome
    } else if length < thresholds.plasmid_below {
        TopologyClass::Plasmid
    } else {
        TopologyClass::Unknown
    }
}
