//! Shared test utilities.
//!
//! The fixture tree mirrors a typical packaging layout:
//!
//! ```text
//! fixtures/
//! ├── includes/    # fragments referenced by #include
//! ├── scripts/     # sources to expand
//! └── expected/    # expected artifact for each script
//! ```
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fx = setup_fixtures();
//! let inv = Invocation {
//!     includes_dir: fx.includes(),
//!     dest_dir: fx.dest(),
//!     sources: vec![fx.script("one-include-middle.txt")],
//! };
//! run(&inv, &ExpandConfig::default(), &NullSink).unwrap();
//! assert_eq!(read(&fx.dest().join("one-include-middle.txt")),
//!            read(&fx.expected("one-include-middle.txt")));
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated copy of `fixtures/`. The destination directory is not created.
pub struct Fixtures {
    tmp: TempDir,
}

impl Fixtures {
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn includes(&self) -> PathBuf {
        self.root().join("includes")
    }

    pub fn dest(&self) -> PathBuf {
        self.root().join("dest")
    }

    pub fn script(&self, name: &str) -> PathBuf {
        self.root().join("scripts").join(name)
    }

    pub fn expected(&self, name: &str) -> PathBuf {
        self.root().join("expected").join(name)
    }
}

/// Copy `fixtures/` to a temp directory.
///
/// Tests get a copy they can write into without touching the source
/// fixtures or each other.
pub fn setup_fixtures() -> Fixtures {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    Fixtures { tmp }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Read a file's bytes. Panics with the path on failure.
pub fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| panic!("could not read {}: {e}", path.display()))
}
