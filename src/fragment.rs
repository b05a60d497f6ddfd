//! Include fragment loading.
//!
//! The [`FragmentSource`] trait is the seam between expansion and storage.
//! The production implementation is [`IncludesDir`], which resolves a name
//! against a directory and reads the file. Tests drive the expander with an
//! in-memory source instead.
//!
//! Names are joined onto the includes directory as-is. There is no
//! normalization, so `../x.inc` resolves outside the directory. Includes are
//! trusted build inputs.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Include fragment '{name}' not found: {}", path.display())]
    NotFound {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Include fragment '{name}' could not be read: {}", path.display())]
    Unreadable {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FragmentError {
    fn from_io(name: &str, path: PathBuf, source: io::Error) -> Self {
        let name = name.to_string();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { name, path, source }
        } else {
            Self::Unreadable { name, path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Path the fragment name resolved to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. } | Self::Unreadable { path, .. } => path,
        }
    }
}

/// Something that can produce fragment bytes for an include name.
pub trait FragmentSource {
    /// Load the fragment for `name`. Bytes come back verbatim, trailing
    /// newline included. An empty fragment is `Ok(vec![])`.
    fn load(&self, name: &str) -> Result<Vec<u8>, FragmentError>;
}

/// Fragments stored as files under a directory.
#[derive(Debug, Clone)]
pub struct IncludesDir {
    root: PathBuf,
}

impl IncludesDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a fragment name resolves to. Does not check existence.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl FragmentSource for IncludesDir {
    fn load(&self, name: &str) -> Result<Vec<u8>, FragmentError> {
        let path = self.resolve(name);
        std::fs::read(&path).map_err(|e| FragmentError::from_io(name, path, e))
    }
}
