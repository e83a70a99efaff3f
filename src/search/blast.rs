//! [`HomologySearch`] backed by NCBI BLAST+ (`makeblastdb` + `blastn`).

use std::cell::OnceCell;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::parsing::fasta::is_gzipped;
use crate::search::hit::{parse_best_hit, HomologyHit, BLAST_OUTPUT_FIELDS};
use crate::search::{HomologySearch, SearchError, DEFAULT_MAX_EVALUE};
use crate::utils::validation::{fasta_safe_name, is_nucleotide_sequence};

/// Extensions of an existing nucleotide BLAST database next to a FASTA
const EXISTING_INDEX_EXTENSIONS: &[&str] = &["nin", "00.nin", "nal"];

/// How to run BLAST+
#[derive(Debug, Clone)]
pub struct BlastConfig {
    /// `blastn` executable (looked up on `PATH` when not absolute)
    pub blastn: PathBuf,
    /// `makeblastdb` executable
    pub makeblastdb: PathBuf,
    /// Alignments above this e-value are not reported
    pub max_evalue: f64,
    pub threads: usize,
    /// Search a database already built next to the target instead of building one
    pub reuse_existing_index: bool,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            blastn: PathBuf::from("blastn"),
            makeblastdb: PathBuf::from("makeblastdb"),
            max_evalue: DEFAULT_MAX_EVALUE,
            threads: 1,
            reuse_existing_index: false,
        }
    }
}

/// BLAST search against one target genome.
///
/// Owns a temporary workspace that holds the target database and per-query
/// scratch directories; everything is deleted when the client is dropped.
#[derive(Debug)]
pub struct BlastSearch {
    target: PathBuf,
    config: BlastConfig,
    workspace: TempDir,
    /// Database prefix, or why it could not be built. Set on first query.
    index: OnceCell<Result<PathBuf, String>>,
}

impl BlastSearch {
    /// Prepare a client for `target`. The index is built on the first query.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::MissingTarget` if the target does not exist, or
    /// `SearchError::Io` if the temporary workspace cannot be created.
    pub fn new(target: &Path, config: BlastConfig) -> Result<Self, SearchError> {
        if !target.is_file() {
            return Err(SearchError::MissingTarget(target.to_path_buf()));
        }

        let workspace = tempfile::Builder::new().prefix("amr-locator-").tempdir()?;
        debug!("BLAST workspace: {}", workspace.path().display());

        Ok(Self {
            target: target.to_path_buf(),
            config,
            workspace,
            index: OnceCell::new(),
        })
    }

    #[must_use]
    pub fn workspace(&self) -> &Path {
        self.workspace.path()
    }

    /// Database prefix, building it on first use. A failed build is not retried.
    fn index(&self) -> Result<&Path, SearchError> {
        let built = self.index.get_or_init(|| {
            self.build_index().map_err(|e| {
                warn!(
                    "Could not index target genome {}: {e}",
                    self.target.display()
                );
                e.to_string()
            })
        });

        match built {
            Ok(prefix) => Ok(prefix.as_path()),
            Err(reason) => Err(SearchError::IndexUnavailable(reason.clone())),
        }
    }

    fn build_index(&self) -> Result<PathBuf, SearchError> {
        if self.config.reuse_existing_index {
            if let Some(prefix) = existing_index(&self.target) {
                info!("Reusing BLAST database at {}", prefix.display());
                return Ok(prefix);
            }
            debug!(
                "No BLAST database next to {}, building one",
                self.target.display()
            );
        }

        // makeblastdb reads plain FASTA only
        let input = if is_gzipped(&self.target) {
            let plain = self.workspace.path().join("target.fa");
            decompress(&self.target, &plain)?;
            plain
        } else {
            self.target.clone()
        };

        let prefix = self.workspace.path().join("target_db");
        let mut command = Command::new(&self.config.makeblastdb);
        command
            .arg("-in")
            .arg(&input)
            .arg("-dbtype")
            .arg("nucl")
            .arg("-out")
            .arg(&prefix);
        run(&mut command)?;

        info!("Indexed target genome {}", self.target.display());
        Ok(prefix)
    }
}

impl HomologySearch for BlastSearch {
    fn search(&self, name: &str, sequence: &str) -> Result<Option<HomologyHit>, SearchError> {
        if !is_nucleotide_sequence(sequence.as_bytes()) {
            return Err(SearchError::InvalidQuery);
        }
        let db = self.index()?;

        let scratch = tempfile::Builder::new()
            .prefix("query-")
            .tempdir_in(self.workspace.path())?;
        let query_path = scratch.path().join("query.fa");
        let hits_path = scratch.path().join("hits.tsv");

        write_query(&query_path, name, sequence)?;

        let mut command = Command::new(&self.config.blastn);
        command
            .arg("-query")
            .arg(&query_path)
            .arg("-db")
            .arg(db)
            .arg("-evalue")
            .arg(format!("{:e}", self.config.max_evalue))
            .arg("-max_hsps")
            .arg("1")
            .arg("-num_threads")
            .arg(self.config.threads.max(1).to_string())
            .arg("-outfmt")
            .arg(format!("6 {BLAST_OUTPUT_FIELDS}"))
            .arg("-out")
            .arg(&hits_path);
        run(&mut command)?;

        let output = std::fs::read_to_string(&hits_path)?;
        let hit = parse_best_hit(&output)?;
        match &hit {
            Some(h) => debug!(
                "{name}: best hit {}:{}-{} ({:.2}% identity, {:.2}% coverage)",
                h.subject_contig, h.subject_start, h.subject_end, h.identity_pct, h.coverage_pct
            ),
            None => debug!("{name}: no significant hit"),
        }
        Ok(hit)
    }
}

/// Run a command to completion, turning failure into a `SearchError`.
fn run(command: &mut Command) -> Result<(), SearchError> {
    let program = command.get_program().to_string_lossy().into_owned();
    let output = command.output().map_err(|source| SearchError::Spawn {
        program: program.clone(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SearchError::ToolFailed {
            program,
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }
    Ok(())
}

/// BLAST database prefix already built alongside `target`, if any
fn existing_index(target: &Path) -> Option<PathBuf> {
    EXISTING_INDEX_EXTENSIONS
        .iter()
        .any(|ext| PathBuf::from(format!("{}.{ext}", target.display())).is_file())
        .then(|| target.to_path_buf())
}

fn decompress(source: &Path, destination: &Path) -> Result<(), SearchError> {
    let mut reader = BufReader::new(MultiGzDecoder::new(File::open(source)?));
    let mut writer = BufWriter::new(File::create(destination)?);
    std::io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_query(path: &Path, name: &str, sequence: &str) -> Result<(), SearchError> {
    let record = fasta::Record::new(
        fasta::record::Definition::new(fasta_safe_name(name), None),
        fasta::record::Sequence::from(sequence.as_bytes().to_vec()),
    );

    let mut buf = Vec::new();
    fasta::io::Writer::new(&mut buf).write_record(&record)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_target(dir: &Path) -> PathBuf {
        let path = dir.join("target.fasta");
        std::fs::write(&path, b">chromosome\nACGTACGTACGT\n").unwrap();
        path
    }

    #[test]
    fn test_missing_target() {
        let result = BlastSearch::new(Path::new("/nonexistent/target.fa"), BlastConfig::default());
        assert!(matches!(result, Err(SearchError::MissingTarget(_))));
    }

    #[test]
    fn test_existing_index_detection() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_target(dir.path());
        assert_eq!(existing_index(&target), None);

        std::fs::write(dir.path().join("target.fasta.nin"), b"").unwrap();
        assert_eq!(existing_index(&target), Some(target.clone()));
    }

    #[test]
    fn test_write_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.fa");
        write_query(&path, "aac(6')-Ib", "ACGTN").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(">aac_6__-Ib\n"));
        assert!(text.contains("ACGTN"));
    }

    #[test]
    fn test_unavailable_aligner_yields_no_hit() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_target(dir.path());
        let config = BlastConfig {
            blastn: dir.path().join("no-such-blastn"),
            makeblastdb: dir.path().join("no-such-makeblastdb"),
            ..BlastConfig::default()
        };

        let search = BlastSearch::new(&target, config).unwrap();
        assert!(matches!(
            search.search("geneA", "ACGTACGT"),
            Err(SearchError::IndexUnavailable(_))
        ));
        assert_eq!(search.locate("geneA", "ACGTACGT"), None);
        assert_eq!(search.locate("geneB", "ACGT"), None);
    }

    #[test]
    fn test_invalid_query_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_target(dir.path());
        let search = BlastSearch::new(&target, BlastConfig::default()).unwrap();
        assert!(matches!(
            search.search("geneA", "not dna"),
            Err(SearchError::InvalidQuery)
        ));
    }

    /// Write an executable shell script standing in for a BLAST+ program
    #[cfg(unix)]
    fn write_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_search_with_stand_in_tools() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_target(dir.path());
        let builds = dir.path().join("builds.log");

        let makeblastdb = write_tool(
            dir.path(),
            "makeblastdb",
            &format!("echo \"$@\" >> '{}'\n", builds.display()),
        );
        let blastn = write_tool(
            dir.path(),
            "blastn",
            r#"while [ $# -gt 0 ]; do
  case "$1" in
    -query) query="$2"; shift ;;
    -out) out="$2"; shift ;;
  esac
  shift
done
if grep -q fail "$query"; then
  echo "query rejected" >&2
  exit 3
fi
if grep -q absent "$query"; then
  : > "$out"
  exit 0
fi
printf 'chromosome\t10\t1\t99.5\t10\t10\t1e-5\t20\t100\n' > "$out"
"#,
        );

        let config = BlastConfig {
            blastn,
            makeblastdb,
            ..BlastConfig::default()
        };
        let search = BlastSearch::new(&target, config).unwrap();

        let hit = search.search("blaKPC-2", "ACGTACGTAC").unwrap().unwrap();
        assert_eq!(hit.subject_contig, "chromosome");
        assert_eq!((hit.subject_start, hit.subject_end), (1, 10));
        assert_eq!(hit.strand, '-');
        assert_eq!(hit.identity_pct, 99.5);

        assert_eq!(search.search("absent_gene", "ACGT").unwrap(), None);

        match search.search("fail_gene", "ACGT") {
            Err(SearchError::ToolFailed { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "query rejected");
            }
            other => panic!("expected aligner failure, got {other:?}"),
        }
        assert_eq!(search.locate("fail_gene", "ACGT"), None);

        // One index build for four searches
        let log = std::fs::read_to_string(&builds).unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.contains("-dbtype nucl"));

        // Scratch directories are gone, including the failed queries'
        let leftovers: Vec<_> = std::fs::read_dir(search.workspace())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("query-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_workspace_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_target(dir.path());
        let search = BlastSearch::new(&target, BlastConfig::default()).unwrap();
        let workspace = search.workspace().to_path_buf();
        assert!(workspace.is_dir());

        drop(search);
        assert!(!workspace.exists());
    }
}
