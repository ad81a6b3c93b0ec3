//! Shared test utilities: synthetic image files and fixture directories.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = asset_dir(&[("cat.png", Fixture::Png(200, 100)), ("ignore.txt", Fixture::Text)]);
//! let entries = scan(tmp.path(), BASE_URL, &RustProber::new(), EntryOrder::ByName).unwrap();
//! assert_eq!(titles(&entries), vec!["cat"]);
//! ```

use image::{ImageEncoder, RgbImage};
use std::path::Path;
use tempfile::TempDir;

use crate::manifest::ManifestEntry;

pub const BASE_URL: &str = "https://cdn.example.com/memes";

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Fixture directories
// =========================================================================

/// What to write for one fixture entry.
pub enum Fixture {
    Png(u32, u32),
    Jpeg(u32, u32),
    /// Arbitrary non-image bytes (a "broken" image when given an image extension).
    Text,
    Svg(&'static str),
    Dir,
}

/// Build a temp directory holding the given entries.
pub fn asset_dir(entries: &[(&str, Fixture)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, fixture) in entries {
        let path = tmp.path().join(name);
        match fixture {
            Fixture::Png(w, h) => create_test_png(&path, *w, *h),
            Fixture::Jpeg(w, h) => create_test_jpeg(&path, *w, *h),
            Fixture::Text => std::fs::write(&path, "not an image").unwrap(),
            Fixture::Svg(body) => std::fs::write(&path, body).unwrap(),
            Fixture::Dir => std::fs::create_dir_all(&path).unwrap(),
        }
    }
    tmp
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All entry titles in manifest order.
pub fn titles(entries: &[ManifestEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

/// Find an entry by title. Panics if not found.
pub fn find_entry<'a>(entries: &'a [ManifestEntry], title: &str) -> &'a ManifestEntry {
    entries.iter().find(|e| e.title == title).unwrap_or_else(|| {
        panic!("entry '{title}' not found. Available: {:?}", titles(entries))
    })
}
