use serde::Serialize;

/// A single contig from an assembly FASTA
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContigRecord {
    /// Sequence id (first word of the FASTA header)
    pub id: String,

    /// Sequence length in bases
    pub length: u64,

    /// Raw sequence bytes, case preserved
    #[serde(skip)]
    pub sequence: Vec<u8>,
}

impl ContigRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        let sequence = sequence.into();
        Self {
            id: id.into(),
            length: sequence.len() as u64,
            sequence,
        }
    }

    /// Length-only record, for catalogs built without sequence data
    #[cfg(test)]
    pub fn with_length(id: impl Into<String>, length: u64) -> Self {
        Self {
            id: id.into(),
            length,
            sequence: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_length() {
        let record = ContigRecord::new("contig_1", b"ACGTacgt".to_vec());
        assert_eq!(record.length, 8);
        assert_eq!(record.id, "contig_1");
    }
}
