//! # asset-manifest
//!
//! Publishes a JSON manifest of an image directory to a file in a GitHub
//! repository. Each image becomes one entry with its public URL, a display
//! title, pixel dimensions and format.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      assets/   →  Vec<ManifestEntry>   (probe each accepted file)
//! 2. Build     entries   →  Payload              (JSON, then base64)
//! 3. Publish   payload   →  list.json            (read sha, then conditional PUT)
//! ```
//!
//! The stages run strictly one after another on a single thread, and each
//! one hands its whole output to the next. Nothing is cached or read back
//! between runs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: list the directory, filter by extension, probe, apply dimension defaults |
//! | [`manifest`] | Stage 2: entry type and payload encoding |
//! | [`publish`] | Stage 3: resolve the version token, then a SHA-gated update |
//! | [`pipeline`] | Runs the three stages in order |
//! | [`naming`] | Extension classification and title derivation |
//! | [`imaging`] | The prober seam and its `image`-crate implementation |
//! | [`config`] | Layered configuration: defaults, `manifest.toml`, environment |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Update, Never Create
//!
//! The target file must already exist in the repository root. A missing
//! target is a failed publish, not a reason to create one. A mistyped owner,
//! repo or file name then shows up as a failure instead of quietly creating a
//! stray file.
//!
//! ## Compare-and-Swap via the Version Token
//!
//! The update request carries the blob SHA read moments earlier. If another
//! writer changed the file in between, the remote rejects the write. That is
//! the whole concurrency story: no local locking, no retry, no merge.
//!
//! ## Degrade, Don't Drop
//!
//! A file the prober can read but can't fully size (an SVG with no size
//! attributes) still gets an entry, with an 800×400 fallback. A file the
//! prober can't read at all is logged and left out.

pub mod config;
pub mod imaging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod publish;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
