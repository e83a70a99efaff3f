//! Input limits and sanitisation shared by the parsers and the aligner client.

/// Upper bound on contigs read from one assembly
pub const MAX_CONTIGS: usize = 1_000_000;

/// Maximum length of a query name handed to the aligner
pub const MAX_QUERY_NAME_LENGTH: usize = 64;

/// Whether a catalog already holding `count` contigs is full
#[must_use]
pub fn contig_limit_reached(count: usize) -> bool {
    count >= MAX_CONTIGS
}

/// Turn an arbitrary gene name into a single-word FASTA identifier.
///
/// Whitespace and characters outside `[A-Za-z0-9._-]` become `_`, so gene
/// symbols such as `aac(6')-Ib` or names containing `>` cannot break the
/// query record. Empty input maps to `query`.
///
/// # Examples
///
/// ```
/// use amr_locator::utils::validation::fasta_safe_name;
///
/// assert_eq!(fasta_safe_name("blaKPC-2"), "blaKPC-2");
/// assert_eq!(fasta_safe_name("aac(6')-Ib cr"), "aac_6__-Ib_cr");
/// assert_eq!(fasta_safe_name(""), "query");
/// ```
#[must_use]
pub fn fasta_safe_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .take(MAX_QUERY_NAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "query".to_string()
    } else {
        sanitized
    }
}

/// Whether a byte string looks like nucleotide sequence (IUPAC codes, any case)
#[must_use]
pub fn is_nucleotide_sequence(sequence: &[u8]) -> bool {
    !sequence.is_empty()
        && sequence.iter().all(|b| {
            matches!(
                b.to_ascii_uppercase(),
                b'A' | b'C'
                    | b'G'
                    | b'T'
                    | b'U'
                    | b'N'
                    | b'R'
                    | b'Y'
                    | b'S'
                    | b'W'
                    | b'K'
                    | b'M'
                    | b'B'
                    | b'D'
                    | b'H'
                    | b'V'
            )
        })
}
