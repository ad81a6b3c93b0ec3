//! Filename rules shared by the scanner: extension classification and title
//! derivation.
//!
//! Both functions are pure. They look only at the entry name, never at the
//! filesystem, so the filtering policy can be tested without a directory.
//!
//! ## Classification
//!
//! The extension is everything after the **last** `.`, compared
//! case-insensitively against [`ACCEPTED_EXTENSIONS`]:
//!
//! - `cat.png` → Accepted("png")
//! - `Banner.JPEG` → Accepted("jpeg")
//! - `notes.txt` → Rejected
//! - `README` → Rejected (no extension)
//!
//! ## Titles
//!
//! Only the final extension segment is stripped, so dots inside the stem survive:
//!
//! - `cat.png` → "cat"
//! - `a.b.png` → "a.b"
//! - `.png` → ".png" (nothing left after stripping, raw name wins)

/// Extensions the scanner hands to the prober. Lower-case.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];

/// Outcome of classifying a directory entry by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Extension is in the accepted set; carries the lower-cased extension.
    Accepted(String),
    /// No extension, or one we don't probe.
    Rejected,
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted(_))
    }
}

/// Lower-cased text after the last `.`, or `None` when the name has no dot.
pub fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Decide whether an entry should be probed.
pub fn classify(file_name: &str) -> Classification {
    match extension_of(file_name) {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Classification::Accepted(ext),
        _ => Classification::Rejected,
    }
}

/// Display title for an entry: the name minus its final extension segment,
/// or the raw name when stripping would leave it empty.
pub fn derive_title(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}
