use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::extract::extract;
use crate::catalog::store::ContigCatalog;
use crate::core::call::GeneCall;
use crate::core::types::{AssemblyKind, MappingStatus, TopologyClass};
use crate::matching::classifier::classify;
use crate::search::hit::HomologyHit;
use crate::search::HomologySearch;

/// Default minimum identity of an acceptable hit, in percent
pub const DEFAULT_MIN_IDENTITY_PCT: f64 = 95.0;

/// Default minimum query coverage of an acceptable hit, in percent
pub const DEFAULT_MIN_COVERAGE_PCT: f64 = 90.0;

/// A gene call with its resolved location
#[derive(Debug, Clone, Serialize)]
pub struct MappedGeneCall {
    pub call: GeneCall,

    /// Best hit in the target genome (cross-assembly mode), kept even when rejected
    pub hit: Option<HomologyHit>,

    pub mapping_status: MappingStatus,

    /// Topology of the authoritative contig; `None` when the call was not mapped
    pub topology: Option<TopologyClass>,

    /// Length of the authoritative contig, when known
    pub contig_length: Option<u64>,
}

/// Configuration for the mapper
#[derive(Debug, Clone)]
pub struct MappingConfig {
    /// Classification profile of the assembly the calls were made on
    pub source_kind: AssemblyKind,
    /// Classification profile of the re-location target
    pub target_kind: AssemblyKind,
    pub min_identity_pct: f64,
    pub min_coverage_pct: f64,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            source_kind: AssemblyKind::Draft,
            target_kind: AssemblyKind::Complete,
            min_identity_pct: DEFAULT_MIN_IDENTITY_PCT,
            min_coverage_pct: DEFAULT_MIN_COVERAGE_PCT,
        }
    }
}

/// Per-run counters of the mapping stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingStats {
    /// Secondary-tool calls already represented by a primary-tool call
    pub duplicates_suppressed: usize,
    /// Calls dropped because their sequence could not be extracted
    pub extraction_failures: usize,
    pub mapped: usize,
    pub not_mapped: usize,
}

/// Mapped calls in encounter order, with counters
#[derive(Debug, Clone, Default)]
pub struct MappingOutcome {
    pub records: Vec<MappedGeneCall>,
    pub stats: MappingStats,
}

/// Lookup of primary-tool calls by `(contig, lowercase gene name)`
#[derive(Debug, Default)]
pub struct CallIdentityIndex {
    keys: HashSet<(String, String)>,
}

impl CallIdentityIndex {
    #[must_use]
    pub fn from_calls(calls: &[GeneCall]) -> Self {
        Self {
            keys: calls.iter().map(GeneCall::identity_key).collect(),
        }
    }

    /// Whether `call` is the same biological gene as an indexed call
    #[must_use]
    pub fn represents(&self, call: &GeneCall) -> bool {
        self.keys.contains(&call.identity_key())
    }
}

/// Resolves where each gene call lives, on the source assembly or on a target
pub struct GeneLocationMapper<'a> {
    source: &'a ContigCatalog,
    config: MappingConfig,
}

impl<'a> GeneLocationMapper<'a> {
    pub fn new(source: &'a ContigCatalog, config: MappingConfig) -> Self {
        Self { source, config }
    }

    /// Primary calls in order, then secondary calls not represented by a primary call
    fn admitted<'c>(
        primary: &'c [GeneCall],
        secondary: &'c [GeneCall],
        stats: &mut MappingStats,
    ) -> Vec<&'c GeneCall> {
        let index = CallIdentityIndex::from_calls(primary);
        let mut admitted: Vec<&GeneCall> = primary.iter().collect();

        for call in secondary {
            if index.represents(call) {
                debug!(
                    "{} {} on {} already reported by primary tool",
                    call.source, call.gene_name, call.contig
                );
                stats.duplicates_suppressed += 1;
            } else {
                admitted.push(call);
            }
        }
        admitted
    }

    /// Classify every call against the source assembly, without re-location.
    #[must_use]
    pub fn map_single(&self, primary: &[GeneCall], secondary: &[GeneCall]) -> MappingOutcome {
        let mut stats = MappingStats::default();
        let records = Self::admitted(primary, secondary, &mut stats)
            .into_iter()
            .map(|call| {
                let contig_length = self.source.length(&call.contig);
                let topology = classify(
                    &call.contig,
                    contig_length.unwrap_or(0),
                    self.config.source_kind,
                );
                MappedGeneCall {
                    call: call.clone(),
                    hit: None,
                    mapping_status: MappingStatus::NotApplicable,
                    topology: Some(topology),
                    contig_length,
                }
            })
            .collect();

        MappingOutcome { records, stats }
    }

    /// Re-locate every call onto `target` by homology search.
    ///
    /// Calls without coordinates, or whose sequence cannot be extracted from the
    /// source assembly, are dropped and counted; every other call yields exactly one record, either
    /// `Mapped` or `NotMapped`.
    pub fn map_cross(
        &self,
        primary: &[GeneCall],
        secondary: &[GeneCall],
        target: &ContigCatalog,
        search: &dyn HomologySearch,
    ) -> MappingOutcome {
        let mut stats = MappingStats::default();
        let admitted = Self::admitted(primary, secondary, &mut stats);
        let mut records = Vec::with_capacity(admitted.len());

        for call in admitted {
            let Some(position) = call.coordinates else {
                warn!(
                    "Skipping {} ({}): no coordinates on {}",
                    call.gene_name, call.source, call.contig
                );
                stats.extraction_failures += 1;
                continue;
            };
            let Some(sequence) = extract(self.source, &call.contig, position.start, position.end)
            else {
                warn!(
                    "Skipping {} ({}): cannot extract {}:{}-{} from source assembly",
                    call.gene_name, call.source, call.contig, position.start, position.end
                );
                stats.extraction_failures += 1;
                continue;
            };

            let hit = search.locate(&call.gene_name, &sequence);
            let record = self.resolve(call, hit, target);
            match record.mapping_status {
                MappingStatus::Mapped => stats.mapped += 1,
                _ => stats.not_mapped += 1,
            }
            records.push(record);
        }

        info!(
            "Mapped {} of {} calls to target ({} not mapped, {} not extractable)",
            stats.mapped,
            records.len() + stats.extraction_failures,
            stats.not_mapped,
            stats.extraction_failures
        );

        MappingOutcome { records, stats }
    }

    fn resolve(
        &self,
        call: &GeneCall,
        hit: Option<HomologyHit>,
        target: &ContigCatalog,
    ) -> MappedGeneCall {
        match hit {
            Some(hit)
                if hit.is_acceptable(self.config.min_identity_pct, self.config.min_coverage_pct) =>
            {
                let contig_length = target.length(&hit.subject_contig);
                if contig_length.is_none() {
                    warn!(
                        "Hit contig {} for {} is not in the target assembly, classifying with length 0",
                        hit.subject_contig, call.gene_name
                    );
                }
                let topology = classify(
                    &hit.subject_contig,
                    contig_length.unwrap_or(0),
                    self.config.target_kind,
                );
                MappedGeneCall {
                    call: call.clone(),
                    hit: Some(hit),
                    mapping_status: MappingStatus::Mapped,
                    topology: Some(topology),
                    contig_length,
                }
            }
            hit => MappedGeneCall {
                call: call.clone(),
                hit,
                mapping_status: MappingStatus::NotMapped,
                topology: None,
                contig_length: None,
            },
        }
    }
}
