use std::collections::BTreeMap;

use serde::Serialize;

use crate::matching::engine::{MappedGeneCall, MappingOutcome, MappingStats};
use crate::parsing::ParsedCalls;
use crate::report::{ReportMode, NOT_FOUND};

/// Row accounting for one gene-call report
#[derive(Debug, Clone, Default, Serialize)]
pub struct InputCounts {
    pub calls: usize,
    pub skipped_rows: usize,
    pub filtered_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ParsedCalls> for InputCounts {
    fn from(parsed: &ParsedCalls) -> Self {
        Self {
            calls: parsed.calls.len(),
            skipped_rows: parsed.skipped_rows,
            filtered_rows: parsed.filtered_rows,
            error: parsed.error.clone(),
        }
    }
}

/// What happened to one sample
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub sample_id: String,
    pub mode: ReportMode,
    pub total_genes: usize,
    /// Records per location type, including `not_found`
    pub by_location: BTreeMap<String, usize>,
    pub beta_lactam_genes: usize,
    /// Records per originating tool
    pub by_source: BTreeMap<String, usize>,
    pub gamma: InputCounts,
    pub amrfinder: InputCounts,
    pub contigs: usize,
    pub mapping: MappingStats,
}

impl RunSummary {
    pub fn new(
        sample_id: &str,
        mode: ReportMode,
        gamma: &ParsedCalls,
        amrfinder: &ParsedCalls,
        contigs: usize,
        outcome: &MappingOutcome,
    ) -> Self {
        let mut by_location = BTreeMap::new();
        let mut by_source = BTreeMap::new();
        for record in &outcome.records {
            *by_location.entry(location_label(record)).or_insert(0) += 1;
            *by_source.entry(record.call.source.to_string()).or_insert(0) += 1;
        }

        Self {
            sample_id: sample_id.to_string(),
            mode,
            total_genes: outcome.records.len(),
            by_location,
            beta_lactam_genes: outcome.records.iter().filter(|r| r.call.is_beta_lactam).count(),
            by_source,
            gamma: InputCounts::from(gamma),
            amrfinder: InputCounts::from(amrfinder),
            contigs,
            mapping: outcome.stats.clone(),
        }
    }

    /// Human-readable report, one line per fact
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Sample: {}", self.sample_id),
            format!("Total AMR genes: {}", self.total_genes),
        ];

        if !self.by_location.is_empty() {
            lines.push("Location distribution:".to_string());
            for (location, count) in &self.by_location {
                lines.push(format!("  {location}: {count}"));
            }
        }

        lines.push(format!("Beta-lactam genes: {}", self.beta_lactam_genes));

        if !self.by_source.is_empty() {
            lines.push("Source distribution:".to_string());
            for (source, count) in &self.by_source {
                lines.push(format!("  {source}: {count}"));
            }
        }

        for (tool, counts) in [("GAMMA", &self.gamma), ("AMRFinder", &self.amrfinder)] {
            let mut line = format!(
                "{tool} input: {} calls, {} malformed rows skipped, {} below quality thresholds",
                counts.calls, counts.skipped_rows, counts.filtered_rows
            );
            if let Some(error) = &counts.error {
                line.push_str(&format!(" (unreadable: {error})"));
            }
            lines.push(line);
        }

        lines.push(format!("Assembly contigs: {}", self.contigs));
        lines.push(format!(
            "Duplicates suppressed: {}",
            self.mapping.duplicates_suppressed
        ));

        if self.mode == ReportMode::CrossAssembly {
            lines.push(format!(
                "Not extractable: {}",
                self.mapping.extraction_failures
            ));
            lines.push(format!(
                "Mapped to target: {} ({} not mapped)",
                self.mapping.mapped, self.mapping.not_mapped
            ));
        }

        lines.join("\n")
    }
}

fn location_label(record: &MappedGeneCall) -> String {
    record
        .topology
        .map_or_else(|| NOT_FOUND.to_string(), |t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::call::GeneCall;
    use crate::core::types::{MappingStatus, ToolSource, TopologyClass};

    fn record(source: ToolSource, category: &str, topology: Option<TopologyClass>) -> MappedGeneCall {
        MappedGeneCall {
            call: GeneCall::new(source, "gene", "contig_1", 1, 10).with_category(category),
            hit: None,
            mapping_status: if topology.is_some() {
                MappingStatus::Mapped
            } else {
                MappingStatus::NotMapped
            },
            topology,
            contig_length: None,
        }
    }

    #[test]
    fn test_counts() {
        let outcome = MappingOutcome {
            records: vec![
                record(ToolSource::Gamma, "BETA-LACTAM", Some(TopologyClass::Plasmid)),
                record(ToolSource::Gamma, "AMINOGLYCOSIDE", Some(TopologyClass::Chromosome)),
                record(ToolSource::AmrFinder, "beta-lactam", None),
            ],
            stats: MappingStats {
                duplicates_suppressed: 1,
                extraction_failures: 2,
                mapped: 2,
                not_mapped: 1,
            },
        };
        let gamma = ParsedCalls {
            skipped_rows: 3,
            ..ParsedCalls::default()
        };

        let summary = RunSummary::new(
            "S1",
            ReportMode::CrossAssembly,
            &gamma,
            &ParsedCalls::default(),
            12,
            &outcome,
        );

        assert_eq!(summary.total_genes, 3);
        assert_eq!(summary.beta_lactam_genes, 2);
        assert_eq!(summary.by_location.get("plasmid"), Some(&1));
        assert_eq!(summary.by_location.get("chromosome"), Some(&1));
        assert_eq!(summary.by_location.get(NOT_FOUND), Some(&1));
        assert_eq!(summary.by_source.get("GAMMA"), Some(&2));
        assert_eq!(summary.by_source.get("AMRFinder"), Some(&1));
        assert_eq!(summary.gamma.skipped_rows, 3);

        let text = summary.to_text();
        assert!(text.contains("Total AMR genes: 3"));
        assert!(text.contains("Beta-lactam genes: 2"));
        assert!(text.contains("Mapped to target: 2 (1 not mapped)"));
        assert!(text.contains("Not extractable: 2"));
    }

    #[test]
    fn test_json_shape() {
        let summary = RunSummary::new(
            "S1",
            ReportMode::SingleAssembly,
            &ParsedCalls::default(),
            &ParsedCalls {
                error: Some("No such file".to_string()),
                ..ParsedCalls::default()
            },
            0,
            &MappingOutcome::default(),
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["sample_id"], "S1");
        assert_eq!(json["mode"], "single_assembly");
        assert_eq!(json["total_genes"], 0);
        assert!(json["gamma"].get("error").is_none());
        assert_eq!(json["amrfinder"]["error"], "No such file");
        assert!(!summary.to_text().contains("Mapped to target"));
    }
}
