//! Archive manifest document.
//!
//! The manifest travels inside every exported archive and mirrors the
//! session's current asset list for preview purposes.

use crate::slice::SlicedFrame;
use serde::{Deserialize, Serialize};

/// Fixed manifest title.
pub const MANIFEST_TITLE: &str = "Auto Slices";
/// Fixed manifest schema version.
pub const MANIFEST_VERSION: &str = "1.0.0";
/// MIME type recorded for every sliced frame.
pub const FRAME_MIME: &str = "image/png";

/// Manifest id before any slicing has stamped a prefix on it.
const INITIAL_ID: &str = "auto-slices";

/// One manifest entry per sliced frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Frame file name.
    pub name: String,
    /// Path relative to the archive root, `assets/<prefix>/<name>`.
    pub path: String,
    /// Encoded byte length of the frame.
    pub size: usize,
    /// MIME type of the asset.
    #[serde(rename = "type")]
    pub mime: String,
}

impl AssetEntry {
    /// Builds the entry for one frame under the given prefix.
    #[must_use]
    pub fn for_frame(prefix: &str, frame: &SlicedFrame) -> Self {
        Self {
            name: frame.name.clone(),
            path: format!("assets/{prefix}/{}", frame.name),
            size: frame.byte_len(),
            mime: FRAME_MIME.to_string(),
        }
    }
}

/// The manifest document persisted as `<prefix>/manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Archive id; the sanitized prefix once frames exist.
    pub id: String,
    /// Fixed title constant.
    pub title: String,
    /// Fixed version constant.
    pub version: String,
    /// Entries in frame order.
    pub assets: Vec<AssetEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::empty()
    }
}

impl Manifest {
    /// An empty manifest with the initial id and no assets.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: INITIAL_ID.to_string(),
            title: MANIFEST_TITLE.to_string(),
            version: MANIFEST_VERSION.to_string(),
            assets: Vec::new(),
        }
    }

    /// Builds the manifest for a frame sequence, entries in input order.
    #[must_use]
    pub fn for_frames(prefix: &str, frames: &[SlicedFrame]) -> Self {
        Self {
            id: prefix.to_string(),
            title: MANIFEST_TITLE.to_string(),
            version: MANIFEST_VERSION.to_string(),
            assets: frames
                .iter()
                .map(|frame| AssetEntry::for_frame(prefix, frame))
                .collect(),
        }
    }

    /// Pretty-printed JSON, as written into the archive.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
