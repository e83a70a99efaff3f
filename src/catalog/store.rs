use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::contig::ContigRecord;
use crate::parsing::fasta::{is_fasta_file, parse_fasta_file};

/// Contigs of one assembly, indexed by id
#[derive(Debug, Default)]
pub struct ContigCatalog {
    /// All contigs, in FASTA order
    pub contigs: Vec<ContigRecord>,

    /// Index: contig id -> index in contigs vec
    id_to_index: HashMap<String, usize>,
}

impl ContigCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<ContigRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.add_contig(record);
        }
        catalog
    }

    /// Build a catalog from an assembly FASTA.
    ///
    /// Fails soft: an unreadable or unparseable file yields an empty catalog and a
    /// logged warning, so the pipeline can continue with degraded location data.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !is_fasta_file(path) {
            debug!("{} has no FASTA extension, reading it as FASTA", path.display());
        }
        match parse_fasta_file(path) {
            Ok(records) => {
                let catalog = Self::from_records(records);
                info!(
                    "Found {} contigs ({} bp) in {}",
                    catalog.len(),
                    catalog.total_length(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                warn!("Error reading assembly file {}: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Add a contig. A repeated id replaces the earlier record in the index.
    pub fn add_contig(&mut self, record: ContigRecord) {
        let index = self.contigs.len();
        if let Some(previous) = self.id_to_index.insert(record.id.clone(), index) {
            warn!(
                "Duplicate contig id '{}' (record {} replaced by record {})",
                record.id,
                previous + 1,
                index + 1
            );
        }
        self.contigs.push(record);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContigRecord> {
        self.id_to_index.get(id).map(|&idx| &self.contigs[idx])
    }

    #[must_use]
    pub fn length(&self, id: &str) -> Option<u64> {
        self.get(id).map(|c| c.length)
    }

    /// Number of distinct contig ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_index.is_empty()
    }

    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.contigs.iter().map(|c| c.length).sum()
    }
}
