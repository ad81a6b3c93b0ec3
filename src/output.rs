//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`, no I/O) for
//! testability and a `print_*` wrapper that writes to stdout. Diagnostics
//! (skipped files, warnings) go through `tracing` instead; this module is
//! only the user-facing summary.
//!
//! ## Scan
//!
//! ```text
//! Assets (2 images)
//! 001 cat (200×100, png)
//!     Source: https://cdn.example.com/memes/cat.png
//! 002 logo (800×400, svg)
//!     Source: https://cdn.example.com/memes/logo.svg
//! ```
//!
//! ## Publish
//!
//! ```text
//! Published list.json (commit 1a2b3c4)
//! ```

use crate::manifest::ManifestEntry;
use crate::publish::PublishOutcome;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "image" } else { "images" }
}

fn entry_line(index: usize, entry: &ManifestEntry) -> String {
    match &entry.kind {
        Some(kind) => format!(
            "{} {} ({}×{}, {})",
            format_index(index),
            entry.title,
            entry.width,
            entry.height,
            kind
        ),
        None => format!(
            "{} {} ({}×{})",
            format_index(index),
            entry.title,
            entry.width,
            entry.height
        ),
    }
}

pub fn format_scan_output(entries: &[ManifestEntry]) -> Vec<String> {
    let mut lines = vec![format!("Assets ({} {})", entries.len(), plural(entries.len()))];
    for (i, entry) in entries.iter().enumerate() {
        lines.push(entry_line(i + 1, entry));
        lines.push(format!("{}Source: {}", indent(1), entry.src));
    }
    lines
}

pub fn print_scan_output(entries: &[ManifestEntry]) {
    for line in format_scan_output(entries) {
        println!("{}", line);
    }
}

/// Commit SHAs are shown abbreviated, like `git log --oneline`.
fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

pub fn format_publish_outcome(target: &str, outcome: &PublishOutcome) -> Vec<String> {
    match outcome {
        PublishOutcome::Success {
            commit_sha: Some(sha),
        } => vec![format!("Published {} (commit {})", target, short_sha(sha))],
        PublishOutcome::Success { commit_sha: None } => vec![format!("Published {}", target)],
        PublishOutcome::Failure(reason) => vec![
            format!("Publish of {} failed", target),
            format!("{}{}", indent(1), reason),
        ],
    }
}

pub fn print_publish_outcome(target: &str, outcome: &PublishOutcome) {
    for line in format_publish_outcome(target, outcome) {
        println!("{}", line);
    }
}
