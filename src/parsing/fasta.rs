//! Assembly FASTA reader built on noodles.
//!
//! Assemblies arrive either plain or compressed (`.gz`, or `.bgz` from bgzip);
//! both compressed forms are read through a multi-member gzip decoder.
//!
//! Recognised FASTA suffixes: `fa`, `fasta`, `fna`, `fas`, `fsa`, `scaffolds`,
//! each optionally followed by `.gz`/`.bgz`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::core::contig::ContigRecord;
use crate::parsing::ParseError;
use crate::utils::validation::contig_limit_reached;

const FASTA_EXTENSIONS: &[&str] = &["fa", "fasta", "fna", "fas", "fsa", "scaffolds"];

const COMPRESSED_EXTENSIONS: &[&str] = &["gz", "bgz"];

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether the file name ends in a FASTA suffix, compressed or not
#[must_use]
pub fn is_fasta_file(path: &Path) -> bool {
    let inner = if is_gzipped(path) {
        path.file_stem().map(Path::new)
    } else {
        Some(path)
    };

    inner
        .and_then(lowercase_extension)
        .is_some_and(|ext| FASTA_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the file name ends in a gzip or bgzip suffix
#[must_use]
pub fn is_gzipped(path: &Path) -> bool {
    lowercase_extension(path).is_some_and(|ext| COMPRESSED_EXTENSIONS.contains(&ext.as_str()))
}

/// Read every contig of an assembly, in file order.
///
/// # Errors
///
/// - `ParseError::Io` when the file cannot be opened
/// - `ParseError::Noodles` when a record is malformed
/// - `ParseError::InvalidFormat` when the file holds no records
/// - `ParseError::TooManyContigs` past the contig limit
pub fn parse_fasta_file(path: &Path) -> Result<Vec<ContigRecord>, ParseError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        let mut reader = fasta::io::Reader::new(BufReader::new(MultiGzDecoder::new(file)));
        parse_fasta_reader(&mut reader)
    } else {
        let mut reader = fasta::io::Reader::new(BufReader::new(file));
        parse_fasta_reader(&mut reader)
    }
}

/// Collect contig records from an open noodles reader
///
/// # Errors
///
/// Same as [`parse_fasta_file`], minus `Io` on open.
pub fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<ContigRecord>, ParseError> {
    let mut records = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Noodles(format!("bad FASTA record: {e}")))?;

        if contig_limit_reached(records.len()) {
            return Err(ParseError::TooManyContigs(records.len()));
        }

        let name = String::from_utf8_lossy(record.name()).into_owned();
        let bases: &[u8] = record.sequence().as_ref();
        records.push(ContigRecord::new(name, bases.to_vec()));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "assembly contains no FASTA records".to_string(),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fasta_fixture(suffix: &str, bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_is_fasta_file() {
        for name in [
            "assembly.fa",
            "assembly.fasta",
            "assembly.fna",
            "S1.scaffolds.fa.gz",
            "S1.scaffolds.gz",
            "/path/to/Hybrid.FASTA",
            "flye.fasta.bgz",
        ] {
            assert!(is_fasta_file(Path::new(name)), "{name}");
        }

        for name in ["sample.gamma", "amrfinder.tsv", "reads.fastq.gz", "fasta"] {
            assert!(!is_fasta_file(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("a.fa.gz")));
        assert!(is_gzipped(Path::new("a.FA.BGZ")));
        assert!(!is_gzipped(Path::new("a.fa")));
        assert!(!is_gzipped(Path::new("gz")));
    }

    #[test]
    fn test_multiline_records_keep_case() {
        let file = fasta_fixture(".fa", b">contig_1 length=12\nACGTACGT\nacgt\n>plasmid_2\nGGGG\n");

        let contigs = parse_fasta_file(file.path()).unwrap();
        assert_eq!(contigs.len(), 2);
        assert_eq!(contigs[0].id, "contig_1");
        assert_eq!(contigs[0].length, 12);
        assert_eq!(contigs[0].sequence, b"ACGTACGTacgt".to_vec());
        assert_eq!(contigs[1].id, "plasmid_2");
        assert_eq!(contigs[1].length, 4);
    }

    #[test]
    fn test_gzipped_assembly() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">chromosome_1\nACGTNNNN\n").unwrap();
        let file = fasta_fixture(".fa.gz", &encoder.finish().unwrap());

        let contigs = parse_fasta_file(file.path()).unwrap();
        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].id, "chromosome_1");
        assert_eq!(contigs[0].length, 8);
    }

    #[test]
    fn test_empty_assembly_is_an_error() {
        let file = fasta_fixture(".fa", b"");
        assert!(matches!(
            parse_fasta_file(file.path()),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
