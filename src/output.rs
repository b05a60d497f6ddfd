//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Creating destination dir: /build/rpm/SCRIPTS
//! Source file /build/src/preun.sh not found; creating empty file in destination.
//! src/postinst.sh → /build/rpm/SCRIPTS/postinst.sh (2 directives)
//! src/preun.sh → /build/rpm/SCRIPTS/preun.sh (0 directives)
//! Expanded 2 files, 2 directives, 1 missing source
//! ```
//!
//! The first two lines are fixed wording that build logs get grepped for.
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O. `print_*`
//! wrappers and [`StdoutSink`] write their lines to stdout.

use crate::batch::BatchReport;
use crate::events::{EventSink, ExpandEvent};

/// `1 directive`, `2 directives`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Format a single event as display lines.
pub fn format_event(event: &ExpandEvent) -> Vec<String> {
    match event {
        ExpandEvent::DestDirCreated { path } => {
            vec![format!("Creating destination dir: {}", path.display())]
        }
        ExpandEvent::SourceMissing { path } => vec![format!(
            "Source file {} not found; creating empty file in destination.",
            path.display()
        )],
        ExpandEvent::Expanded {
            source,
            output,
            directives,
        } => vec![format!(
            "{} \u{2192} {} ({})",
            source.display(),
            output.display(),
            count(*directives, "directive")
        )],
    }
}

/// Format the end-of-run summary.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let mut line = format!(
        "Expanded {}, {}",
        count(report.artifacts.len(), "file"),
        count(report.total_directives(), "directive")
    );
    let missing = report.missing_sources();
    if missing > 0 {
        line.push_str(&format!(", {}", count(missing, "missing source")));
    }
    vec![line]
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

/// Prints every event to stdout as it happens.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, event: ExpandEvent) {
        for line in format_event(&event) {
            println!("{}", line);
        }
    }
}
