//! Prober trait and shared types.
//!
//! The [`ImageProber`] trait is the seam between the scanner and whatever
//! actually opens image files. The production implementation is
//! [`RustProber`](super::rust_backend::RustProber); tests use [`tests::MockProber`]
//! so scanning logic can run against plain placeholder files.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file whose metadata could not be extracted.
///
/// Always carries the path so the scanner can report which entry it skipped.
#[derive(Error, Debug)]
#[error("failed to probe {}: {reason}", path.display())]
pub struct ProbeError {
    pub path: PathBuf,
    pub reason: ProbeFailure,
}

#[derive(Error, Debug)]
pub enum ProbeFailure {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported or corrupt image: {0}")]
    Format(String),
}

impl ProbeError {
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: ProbeFailure::Io(err),
        }
    }

    pub fn format(path: &Path, detail: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: ProbeFailure::Format(detail.into()),
        }
    }
}

/// What a prober could tell about an image.
///
/// Either dimension may be unknown (e.g. an SVG with no size attributes).
/// `kind` is the short format label (`png`, `jpg`, `svg`, …) when known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbedImage {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub kind: Option<String>,
}

/// Extract intrinsic metadata from an image file.
pub trait ImageProber {
    fn probe(&self, path: &Path) -> Result<ProbedImage, ProbeError>;
}
