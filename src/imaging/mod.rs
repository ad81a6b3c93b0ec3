//! Image probing in pure Rust, with no external tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Raster dimensions + type** | `image::ImageReader` (format sniffing, header-only read) |
//! | **SVG dimensions** | root-element attribute parsing |
//!
//! The module is split into:
//! - **Backend**: [`ImageProber`] trait, [`ProbedImage`], [`ProbeError`]
//! - **Rust backend**: [`RustProber`], the production implementation
//! - **SVG**: attribute-based size detection used by `RustProber`

pub mod backend;
pub mod rust_backend;
mod svg;

pub use backend::{ImageProber, ProbeError, ProbeFailure, ProbedImage};
pub use rust_backend::RustProber;
