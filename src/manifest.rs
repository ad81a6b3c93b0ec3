//! Manifest entries and the transport payload built from them.
//!
//! The published file is a JSON array, one object per image:
//!
//! ```json
//! [{"type":"png","height":100,"width":200,"src":"https://cdn.example.com/memes/cat.png","title":"cat"}]
//! ```
//!
//! Field order is fixed by the struct definition (`type`, `height`, `width`,
//! `src`, `title`) and `type` is left out when the prober didn't report one.
//! The content API only accepts file contents as base64, so [`build`] returns
//! the encoded text, never raw JSON.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One successfully probed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub height: u32,
    pub width: u32,
    /// Public URL: base URL + `/` + file name.
    pub src: String,
    /// File name minus its final extension; never empty.
    pub title: String,
}

/// Base64-encoded manifest JSON, ready to embed in a commit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(String);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Serialize entries (in order) and encode them for transport.
pub fn build(entries: &[ManifestEntry]) -> Result<Payload, ManifestError> {
    let json = serde_json::to_string(entries)?;
    Ok(Payload(STANDARD.encode(json.as_bytes())))
}
