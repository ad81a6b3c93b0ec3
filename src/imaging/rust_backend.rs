//! Pure Rust prober built on the `image` crate.
//!
//! | Format | How dimensions are read |
//! |---|---|
//! | JPEG, PNG, GIF, BMP, WebP | `image::ImageReader::into_dimensions` (header only, no decode) |
//! | SVG | root `<svg>` attributes, see [`super::svg`] |
//!
//! The raster format is guessed from the file contents, not the extension,
//! so a PNG saved as `.jpg` still reports `png`. Contents that sniff as a
//! format without a compiled-in decoder (TIFF, AVIF) are a format error.
//! Contents that no raster decoder accepts are retried as SVG markup.

use super::backend::{ImageProber, ProbeError, ProbeFailure, ProbedImage};
use super::svg;
use image::{ImageFormat, ImageReader};
use std::path::Path;

/// Production prober. Stateless.
pub struct RustProber;

impl RustProber {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustProber {
    fn default() -> Self {
        Self::new()
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Short type label for a format with a compiled-in decoder.
///
/// Matches the labels the published manifest has always carried (`jpg`, not
/// `jpeg`), so consumers filtering on `type` keep working. Formats sniffed
/// from the contents but not decodable here have no label.
pub fn format_label(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::Png => Some("png"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::Bmp => Some("bmp"),
        ImageFormat::WebP => Some("webp"),
        _ => None,
    }
}

fn probe_raster(path: &Path) -> Result<ProbedImage, ProbeError> {
    let reader = ImageReader::open(path)
        .map_err(|e| ProbeError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| ProbeError::io(path, e))?;

    let format = reader
        .format()
        .ok_or_else(|| ProbeError::format(path, "unrecognized image format"))?;
    let kind = format_label(format)
        .ok_or_else(|| ProbeError::format(path, format!("unsupported format {format:?}")))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ProbeError::format(path, e.to_string()))?;

    Ok(ProbedImage {
        width: Some(width),
        height: Some(height),
        kind: Some(kind.to_string()),
    })
}

impl ImageProber for RustProber {
    /// SVG goes by extension first. Any other file that no raster decoder
    /// accepts gets a second try as SVG, so a mislabeled `.png` holding SVG
    /// markup is still sized. When that also fails the raster error stands.
    fn probe(&self, path: &Path) -> Result<ProbedImage, ProbeError> {
        if is_svg(path) {
            return svg::probe_svg(path);
        }
        match probe_raster(path) {
            Err(err @ ProbeError {
                reason: ProbeFailure::Format(_),
                ..
            }) => svg::probe_svg(path).map_err(|_| err),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_jpeg, create_test_png};

    #[test]
    fn probe_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let probed = RustProber::new().probe(&path).unwrap();
        assert_eq!(probed.width, Some(200));
        assert_eq!(probed.height, Some(150));
        assert_eq!(probed.kind.as_deref(), Some("jpg"));
    }

    #[test]
    fn probe_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("cat.png");
        create_test_png(&path, 200, 100);

        let probed = RustProber::new().probe(&path).unwrap();
        assert_eq!(probed.width, Some(200));
        assert_eq!(probed.height, Some(100));
        assert_eq!(probed.kind.as_deref(), Some("png"));
    }

    #[test]
    fn format_comes_from_contents_not_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("mislabeled.jpg");
        create_test_png(&path, 10, 20);

        let probed = RustProber::new().probe(&path).unwrap();
        assert_eq!(probed.kind.as_deref(), Some("png"));
        assert_eq!((probed.width, probed.height), (Some(10), Some(20)));
    }

    #[test]
    fn probe_nonexistent_file_is_io_error() {
        let err = RustProber::new()
            .probe(Path::new("/nonexistent/image.jpg"))
            .unwrap_err();
        assert!(matches!(err.reason, ProbeFailure::Io(_)));
    }

    #[test]
    fn probe_garbage_bytes_is_format_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = RustProber::new().probe(&path).unwrap_err();
        assert!(matches!(err.reason, ProbeFailure::Format(_)));
        assert_eq!(err.path, path);
    }

    #[test]
    fn probe_dispatches_svg_by_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.SVG");
        std::fs::write(&path, r#"<svg width="64" height="32"></svg>"#).unwrap();

        let probed = RustProber::new().probe(&path).unwrap();
        assert_eq!((probed.width, probed.height), (Some(64), Some(32)));
        assert_eq!(probed.kind.as_deref(), Some("svg"));
    }

    #[test]
    fn format_labels() {
        assert_eq!(format_label(ImageFormat::Jpeg), Some("jpg"));
        assert_eq!(format_label(ImageFormat::Png), Some("png"));
        assert_eq!(format_label(ImageFormat::Gif), Some("gif"));
        assert_eq!(format_label(ImageFormat::Bmp), Some("bmp"));
        assert_eq!(format_label(ImageFormat::WebP), Some("webp"));
    }

    #[test]
    fn formats_without_a_decoder_have_no_label() {
        assert_eq!(format_label(ImageFormat::Tiff), None);
        assert_eq!(format_label(ImageFormat::Avif), None);
    }

    #[test]
    fn sniffed_tiff_is_a_format_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("scan.png");
        // Little-endian TIFF magic, no decoder compiled in
        std::fs::write(&path, b"II*\x00\x08\x00\x00\x00").unwrap();

        let err = RustProber::new().probe(&path).unwrap_err();
        assert!(matches!(err.reason, ProbeFailure::Format(_)));
    }

    #[test]
    fn svg_markup_under_raster_extension_is_sized() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        std::fs::write(
            &path,
            r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"/>"#,
        )
        .unwrap();

        let probed = RustProber::new().probe(&path).unwrap();
        assert_eq!((probed.width, probed.height), (Some(40), Some(20)));
        assert_eq!(probed.kind.as_deref(), Some("svg"));
    }

    #[test]
    fn failed_svg_fallback_keeps_raster_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, "<html>not an image</html>").unwrap();

        let err = RustProber::new().probe(&path).unwrap_err();
        assert!(matches!(err.reason, ProbeFailure::Format(ref msg) if !msg.contains("svg")));
    }
}
