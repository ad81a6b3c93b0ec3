//! The full run: scan → build → publish, strictly in sequence.
//!
//! Each stage finishes before the next starts and hands its output on by
//! value. Per-file probe failures are absorbed by the scan stage; anything
//! that fails here aborts the run.

use crate::config::AppConfig;
use crate::imaging::ImageProber;
use crate::manifest::{self, ManifestEntry, ManifestError};
use crate::publish::{ContentApi, PublishError, PublishOutcome, Publisher};
use crate::scan::{self, ScanError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub entries: Vec<ManifestEntry>,
    pub outcome: PublishOutcome,
}

pub fn run<P, A>(
    config: &AppConfig,
    assets_dir: &Path,
    prober: &P,
    api: &A,
) -> Result<RunSummary, PipelineError>
where
    P: ImageProber + ?Sized,
    A: ContentApi + ?Sized,
{
    let entries = scan::scan(assets_dir, &config.public_url, prober, config.scan.order)?;
    info!(count = entries.len(), dir = %assets_dir.display(), "scan complete");

    let payload = manifest::build(&entries)?;

    let publisher = Publisher::new(api, config.commit.identity());
    let outcome = publisher.publish(&config.target_file, &payload)?;

    Ok(RunSummary { entries, outcome })
}
