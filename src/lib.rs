//! # rpm-scripts
//!
//! Build-time `#include` expansion for RPM scriptlets. Shared shell snippets
//! live in an includes directory; scriptlet sources pull them in with a
//! line-leading directive:
//!
//! ```text
//! #!/bin/sh
//! #include <create-service-user.inc>
//! systemctl daemon-reload
//! ```
//!
//! Each source is expanded into a file of the same name in a destination
//! directory, ready for the spec file to pick up.
//!
//! # Pipeline
//!
//! ```text
//! source  →  scan directives  →  load fragments  →  substitute  →  dest/<name>
//! ```
//!
//! One pass per file. Fragments are pasted in verbatim and never scanned
//! themselves, so includes don't nest.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`directive`] | Finds `#include <NAME>` directives at line starts |
//! | [`fragment`] | Resolves include names to fragment bytes ([`fragment::FragmentSource`]) |
//! | [`expand`] | Expands one source file into one artifact |
//! | [`batch`] | Creates the destination and expands every source in order |
//! | [`events`] | Diagnostic events and the pluggable [`events::EventSink`] |
//! | [`output`] | Console formatting of events and the run summary |
//! | [`config`] | Optional TOML config: missing-source policy, quiet mode |
//!
//! # Failure Policy
//!
//! A source file that doesn't exist produces an empty artifact and a
//! diagnostic. That is the only recovered condition. A missing fragment, an
//! unreadable file, an uncreatable destination or a failed write stops the
//! run with the offending path in the error.
//!
//! # Embedding
//!
//! ```no_run
//! use rpm_scripts::{batch, config::ExpandConfig, events::NullSink};
//!
//! let inv = batch::Invocation::from_args(["includes", "build/scripts", "src/postinst.sh"])?;
//! let report = batch::run(&inv, &ExpandConfig::default(), &NullSink)?;
//! assert_eq!(report.artifacts.len(), 1);
//! # Ok::<(), batch::BatchError>(())
//! ```

pub mod batch;
pub mod config;
pub mod directive;
pub mod events;
pub mod expand;
pub mod fragment;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
