//! Error types for Spritecut operations.

use thiserror::Error;

/// Top-level error type for slicing operations.
#[derive(Debug, Error)]
pub enum SliceError {
    /// Image decoding or encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive assembly failed
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Manifest serialization failed
    #[error("Manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Detection or slicing requested before a sheet was loaded
    #[error("No sprite sheet loaded")]
    NoSheetLoaded,

    /// Detection ran to completion but produced no runs
    #[error("No frames detected; try lowering the alpha threshold or raising the gap tolerance")]
    NoFramesDetected,

    /// Archive export requested with no sliced frames available
    #[error("No slices to export; run detection first")]
    NothingToExport,
}

impl SliceError {
    /// Whether this error is a user-facing advisory rather than a hard
    /// failure. Advisories leave session state untouched and the caller is
    /// expected to surface them as a message, not abort.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            Self::NoSheetLoaded | Self::NoFramesDetected | Self::NothingToExport
        )
    }
}

/// Result type alias for Spritecut operations.
pub type SliceResult<T> = Result<T, SliceError>;
