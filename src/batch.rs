//! Batch driver: one destination directory, many sources.
//!
//! ```text
//! includes/              dest/
//! ├── users.inc          ├── postinst.sh   ← scripts/postinst.sh, expanded
//! └── systemd.inc        └── preun.sh      ← scripts/preun.sh, expanded
//! ```
//!
//! Sources are processed in the order given. The first failure stops the
//! batch; artifacts already written stay on disk.

use crate::config::ExpandConfig;
use crate::events::{EventSink, ExpandEvent};
use crate::expand::{self, ArtifactReport, ExpandError};
use crate::fragment::IncludesDir;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Need at least three arguments: <includesDir> <destDir> <src>...")]
    Arguments,
    #[error("Could not create destination dir {}", path.display())]
    CreateDestDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Expand(#[from] ExpandError),
}

/// The three positional inputs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub includes_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Never empty.
    pub sources: Vec<PathBuf>,
}

impl Invocation {
    /// Build from positional arguments: `<includesDir> <destDir> <src>...`.
    pub fn from_args<I, P>(args: I) -> Result<Self, BatchError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut args = args.into_iter().map(Into::into);
        let includes_dir = args.next().ok_or(BatchError::Arguments)?;
        let dest_dir = args.next().ok_or(BatchError::Arguments)?;
        let sources: Vec<PathBuf> = args.collect();
        if sources.is_empty() {
            return Err(BatchError::Arguments);
        }
        Ok(Self {
            includes_dir,
            dest_dir,
            sources,
        })
    }
}

/// Everything written by one run, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub artifacts: Vec<ArtifactReport>,
}

impl BatchReport {
    pub fn total_directives(&self) -> usize {
        self.artifacts.iter().map(|a| a.directives).sum()
    }

    pub fn missing_sources(&self) -> usize {
        self.artifacts.iter().filter(|a| a.source_missing).count()
    }
}

/// Create `dest_dir` and any missing parents. An existing directory is fine;
/// an existing file or other non-directory is an error.
///
/// Returns whether the directory was created.
pub fn ensure_dest_dir(dest_dir: &Path, sink: &impl EventSink) -> Result<bool, BatchError> {
    if dest_dir.is_dir() {
        return Ok(false);
    }
    if dest_dir.exists() {
        return Err(BatchError::CreateDestDir {
            path: dest_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "exists and is not a directory"),
        });
    }
    let path = std::path::absolute(dest_dir).unwrap_or_else(|_| dest_dir.to_path_buf());
    sink.emit(ExpandEvent::DestDirCreated { path });
    std::fs::create_dir_all(dest_dir).map_err(|e| BatchError::CreateDestDir {
        path: dest_dir.to_path_buf(),
        source: e,
    })?;
    Ok(true)
}

/// Expand every source of `invocation` into its destination directory.
pub fn run(
    invocation: &Invocation,
    config: &ExpandConfig,
    sink: &impl EventSink,
) -> Result<BatchReport, BatchError> {
    ensure_dest_dir(&invocation.dest_dir, sink)?;

    let includes = IncludesDir::new(&invocation.includes_dir);
    let mut report = BatchReport::default();
    for source in &invocation.sources {
        let artifact = expand::expand_file(
            source,
            &includes,
            &invocation.dest_dir,
            config.missing_source,
            sink,
        )?;
        report.artifacts.push(artifact);
    }
    Ok(report)
}
