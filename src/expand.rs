//! Expansion of one source file into one artifact.
//!
//! ## Algorithm
//!
//! 1. Read the source. If it does not exist, the text is empty (or the run
//!    fails, depending on [`MissingSource`]).
//! 2. [`scan`](crate::directive::scan) the text for directives.
//! 3. Load the fragment for every directive, in source order. Identical
//!    directive literals collapse to a single replacement.
//! 4. Walk the text once, left to right, swapping every occurrence of a
//!    directive literal for its fragment. Fragment bytes are copied to the
//!    output and never looked at again, so includes don't nest.
//! 5. Write the result to `dest_dir/<source file name>`, truncating.
//!
//! Step 4 replaces *every* occurrence of a literal, not only the line-leading
//! one that was scanned. A source containing `#include <a.inc>` at the start
//! of one line and `echo "#include <a.inc>"` on another gets both replaced.
//! A literal that only ever appears mid-line is never scanned, so it is left
//! alone.

use crate::config::MissingSource;
use crate::directive::{self, Directive};
use crate::events::{EventSink, ExpandEvent};
use crate::fragment::{FragmentError, FragmentSource};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Could not read source file {}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Source file not found: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("Source path has no file name: {}", .0.display())]
    NoFileName(PathBuf),
    #[error("Could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to expand {}", file.display())]
    Fragment {
        file: PathBuf,
        #[source]
        source: FragmentError,
    },
}

impl ExpandError {
    /// True when a referenced fragment (or, under the `error` policy, the
    /// source itself) does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Fragment { source, .. } => source.is_not_found(),
            Self::SourceMissing(_) => true,
            _ => false,
        }
    }
}

/// Result of expanding a text in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: Vec<u8>,
    /// Directive occurrences found by the scanner.
    pub directives: usize,
}

/// What was written for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub directives: usize,
    pub bytes: usize,
    /// Lowercase hex SHA-256 of the artifact contents.
    pub sha256: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub source_missing: bool,
}

/// Expand every directive in `text`.
///
/// Fails on the first fragment that can't be loaded.
pub fn expand_text(
    text: &[u8],
    fragments: &impl FragmentSource,
) -> Result<Expansion, FragmentError> {
    let found = directive::scan(text);
    let replacements = load_replacements(&found, fragments)?;
    Ok(Expansion {
        text: substitute(text, &replacements),
        directives: found.len(),
    })
}

/// Load fragments keyed by directive literal, in first-seen order.
///
/// Every occurrence triggers a load; a repeated literal keeps its original
/// position and takes the latest bytes.
fn load_replacements<'t>(
    found: &[Directive<'t>],
    fragments: &impl FragmentSource,
) -> Result<Vec<(&'t [u8], Vec<u8>)>, FragmentError> {
    let mut replacements: Vec<(&[u8], Vec<u8>)> = Vec::new();
    for d in found {
        let bytes = fragments.load(&d.name)?;
        match replacements.iter_mut().find(|(lit, _)| *lit == d.literal) {
            Some(entry) => entry.1 = bytes,
            None => replacements.push((d.literal, bytes)),
        }
    }
    Ok(replacements)
}

/// Single left-to-right replacement of every literal occurrence.
///
/// All literals start with `#`, so only those positions are tested. No
/// literal is a prefix of another (each ends at its first `>`), so at most
/// one can match at any position.
fn substitute(text: &[u8], replacements: &[(&[u8], Vec<u8>)]) -> Vec<u8> {
    if replacements.is_empty() {
        return text.to_vec();
    }
    let mut out = Vec::with_capacity(text.len());
    let mut rest = text;
    while let Some(hash) = rest.iter().position(|&b| b == b'#') {
        out.extend_from_slice(&rest[..hash]);
        rest = &rest[hash..];
        match replacements.iter().find(|(lit, _)| rest.starts_with(lit)) {
            Some((lit, fragment)) => {
                out.extend_from_slice(fragment);
                rest = &rest[lit.len()..];
            }
            None => {
                out.push(b'#');
                rest = &rest[1..];
            }
        }
    }
    out.extend_from_slice(rest);
    out
}

/// Artifact path for a source: `dest_dir/<file name>`.
pub fn artifact_path(source: &Path, dest_dir: &Path) -> Result<PathBuf, ExpandError> {
    source
        .file_name()
        .map(|name| dest_dir.join(name))
        .ok_or_else(|| ExpandError::NoFileName(source.to_path_buf()))
}

/// Expand one source file and write its artifact into `dest_dir`.
///
/// `dest_dir` must already exist; see [`batch::ensure_dest_dir`](crate::batch::ensure_dest_dir).
pub fn expand_file(
    source: &Path,
    fragments: &impl FragmentSource,
    dest_dir: &Path,
    missing_source: MissingSource,
    sink: &impl EventSink,
) -> Result<ArtifactReport, ExpandError> {
    let output = artifact_path(source, dest_dir)?;

    let (expansion, source_missing) = match std::fs::read(source) {
        Ok(text) => {
            let expansion =
                expand_text(&text, fragments).map_err(|e| ExpandError::Fragment {
                    file: source.to_path_buf(),
                    source: e,
                })?;
            (expansion, false)
        }
        // A path through a regular file (`plain/child.sh`) doesn't exist either.
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            let path = std::path::absolute(source).unwrap_or_else(|_| source.to_path_buf());
            if missing_source == MissingSource::Error {
                return Err(ExpandError::SourceMissing(path));
            }
            sink.emit(ExpandEvent::SourceMissing { path });
            let empty = Expansion {
                text: Vec::new(),
                directives: 0,
            };
            (empty, true)
        }
        Err(e) => {
            return Err(ExpandError::ReadSource {
                path: source.to_path_buf(),
                source: e,
            });
        }
    };

    std::fs::write(&output, &expansion.text).map_err(|e| ExpandError::Write {
        path: output.clone(),
        source: e,
    })?;

    sink.emit(ExpandEvent::Expanded {
        source: source.to_path_buf(),
        output: output.clone(),
        directives: expansion.directives,
    });

    Ok(ArtifactReport {
        source: source.to_path_buf(),
        output,
        directives: expansion.directives,
        bytes: expansion.text.len(),
        sha256: format!("{:x}", Sha256::digest(&expansion.text)),
        source_missing,
    })
}
