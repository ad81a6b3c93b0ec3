//! Asset directory scanning.
//!
//! Stage 1 of the publish pipeline. Lists a single flat directory, keeps the
//! entries whose extension is accepted (see [`crate::naming`]), probes each
//! one and turns the result into a [`ManifestEntry`].
//!
//! ## Directory Structure
//!
//! ```text
//! assets/memes/
//! ├── cat.png          # probed → entry
//! ├── Banner.JPEG      # extension match is case-insensitive
//! ├── a.b.gif          # title "a.b"
//! ├── notes.txt        # ignored silently
//! ├── broken.jpg       # probe fails → logged, skipped
//! └── drafts/          # not descended into
//! ```
//!
//! ## Failure policy
//!
//! Only failing to list the directory itself is an error. A file that can't
//! be probed is logged at `warn` and left out of the manifest; one bad image
//! never aborts the run.
//!
//! ## Ordering
//!
//! [`EntryOrder::Filesystem`] keeps whatever order `read_dir` yields, which
//! differs across platforms. [`EntryOrder::ByName`] sorts by file name first.
//! Probes run one at a time either way, so the manifest follows the chosen
//! order exactly.

use crate::imaging::{ImageProber, ProbedImage};
use crate::manifest::ManifestEntry;
use crate::naming::{self, Classification};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read asset directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Width used when the prober can't tell.
pub const DEFAULT_WIDTH: u32 = 800;
/// Height used when the prober can't tell.
pub const DEFAULT_HEIGHT: u32 = 400;

/// Order in which directory entries become manifest entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrder {
    /// Directory enumeration order, as returned by the OS.
    #[default]
    Filesystem,
    /// Sorted by file name (byte order).
    #[serde(rename = "name")]
    ByName,
}

pub fn scan<P: ImageProber + ?Sized>(
    dir: &Path,
    base_url: &str,
    prober: &P,
    order: EntryOrder,
) -> Result<Vec<ManifestEntry>, ScanError> {
    let names = collect_entries(dir, order)?;
    let mut entries = Vec::new();

    for name in &names {
        if let Classification::Rejected = naming::classify(name) {
            continue;
        }

        let path = dir.join(name);
        match prober.probe(&path) {
            Ok(probed) => {
                debug!(entry = %name, "probed image");
                entries.push(apply_defaults(name, base_url, probed));
            }
            Err(e) => {
                warn!(entry = %name, error = %e.reason, "skipping image that could not be probed");
            }
        }
    }

    Ok(entries)
}

/// File names in the directory, non-recursive.
fn collect_entries(dir: &Path, order: EntryOrder) -> Result<Vec<String>, ScanError> {
    let read = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = read
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    if order == EntryOrder::ByName {
        names.sort();
    }
    Ok(names)
}

/// Turn a probe result into a manifest entry.
///
/// This is the only place the fallback dimensions are applied: a missing
/// (or zero) width becomes [`DEFAULT_WIDTH`], a missing height
/// [`DEFAULT_HEIGHT`]. `src` is always exactly `base_url + "/" + file_name`.
pub fn apply_defaults(file_name: &str, base_url: &str, probed: ProbedImage) -> ManifestEntry {
    ManifestEntry {
        kind: probed.kind,
        height: probed.height.filter(|h| *h > 0).unwrap_or(DEFAULT_HEIGHT),
        width: probed.width.filter(|w| *w > 0).unwrap_or(DEFAULT_WIDTH),
        src: format!("{base_url}/{file_name}"),
        title: naming::derive_title(file_name),
    }
}
