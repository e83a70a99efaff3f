use crate::catalog::store::ContigCatalog;

/// Extract the bases between two 1-based inclusive coordinates.
///
/// `start` is converted to 0-based (`start - 1`, floored at 0) and `end` is clamped
/// to the contig length, since upstream tools occasionally report coordinates a few
/// bases past a contig end. Returns `None` for an unknown contig or when the clamped
/// span is empty or inverted.
#[must_use]
pub fn extract(catalog: &ContigCatalog, contig_id: &str, start: u64, end: u64) -> Option<String> {
    let contig = catalog.get(contig_id)?;

    let begin = usize::try_from(start.saturating_sub(1)).ok()?;
    let end = usize::try_from(end.min(contig.length)).ok()?;
    if begin >= end {
        return None;
    }

    contig
        .sequence
        .get(begin..end)
        .map(|bases| String::from_utf8_lossy(bases).into_owned())
}
