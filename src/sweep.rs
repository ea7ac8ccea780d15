//! Stale bytecode sweep
//!
//! Deletes every regular file under the application root whose name ends with
//! one of the configured suffixes. The sweep is best-effort: failures are
//! collected in a [`SweepReport`] and never stop the bootstrap.
//!
//! The filesystem is reached only through [`CacheFs`], so the walk and the
//! failure handling can be exercised without touching a real tree.

use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File name predicate for stale compiled artifacts
#[derive(Debug, Clone)]
pub struct StaleArtifacts {
    suffixes: Vec<String>,
}

impl StaleArtifacts {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` ends with any configured suffix
    ///
    /// Compared byte-wise, so non-UTF-8 names still match.
    pub fn matches(&self, name: &OsStr) -> bool {
        let name = name.as_encoded_bytes();
        self.suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_bytes()))
    }

    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.matches(name))
    }
}

/// Filesystem operations the sweep needs
pub trait CacheFs {
    /// Every regular file under `root`, recursively, each exactly once.
    ///
    /// Symlinks are not followed and not reported. Entries that cannot be
    /// read are reported as failures in place of a path.
    fn regular_files(&self, root: &Path) -> Vec<Result<PathBuf, SweepFailure>>;

    /// Remove a single file
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`CacheFs`] backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl CacheFs for DiskFs {
    fn regular_files(&self, root: &Path) -> Vec<Result<PathBuf, SweepFailure>> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    Some(Err(SweepFailure::new(path, io::Error::from(e))))
                }
            })
            .collect()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// A path the sweep could not read or delete
#[derive(Debug)]
pub struct SweepFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

impl SweepFailure {
    pub fn new(path: PathBuf, source: io::Error) -> Self {
        Self { path, source }
    }
}

impl fmt::Display for SweepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

/// Outcome of one sweep
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Matching files a deletion was attempted on, in walk order
    pub attempted: Vec<PathBuf>,
    /// Files that are gone afterwards (including ones that vanished first)
    pub removed: Vec<PathBuf>,
    /// Read and delete failures
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delete every file under `root` accepted by `matcher`
pub fn sweep<F: CacheFs + ?Sized>(fs: &F, root: &Path, matcher: &StaleArtifacts) -> SweepReport {
    let mut report = SweepReport::default();

    for entry in fs.regular_files(root) {
        let path = match entry {
            Ok(path) => path,
            Err(failure) => {
                debug!("Sweep skipped {}", failure);
                report.failures.push(failure);
                continue;
            }
        };

        if !matcher.matches_path(&path) {
            continue;
        }

        report.attempted.push(path.clone());
        match fs.remove_file(&path) {
            Ok(()) => report.removed.push(path),
            // Another sweep got there first
            Err(e) if e.kind() == io::ErrorKind::NotFound => report.removed.push(path),
            Err(e) => {
                let failure = SweepFailure::new(path, e);
                debug!("Sweep could not remove {}", failure);
                report.failures.push(failure);
            }
        }
    }

    debug!(
        "Swept {}: removed {} of {} stale files, {} failures",
        root.display(),
        report.removed.len(),
        report.attempted.len(),
        report.failures.len()
    );
    report
}
