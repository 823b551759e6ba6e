//! Slicing session state.
//!
//! A [`SliceSession`] owns the currently loaded sheet, the list of sliced
//! frames, and the manifest preview, and is the only thing that mutates
//! them. One active caller at a time is assumed; an embedding with several
//! callers must put the session behind a single writer.

use crate::archive::{build_archive, ArchiveBundle};
use crate::detect::{detect_frames, DetectParams, FrameRun};
use crate::error::{SliceError, SliceResult};
use crate::manifest::Manifest;
use crate::sheet::SpriteSheet;
use crate::slice::{sanitize_prefix, slice_frames, SlicedFrame};
use std::path::Path;
use tracing::info;

/// Mutable state for one slicing session.
#[derive(Debug, Default)]
pub struct SliceSession {
    sheet: Option<SpriteSheet>,
    frames: Vec<SlicedFrame>,
    manifest: Manifest,
}

impl SliceSession {
    /// Creates an empty session with no sheet loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a sheet from an image file, replacing any previous sheet and
    /// discarding previous slices. A file that fails to decode leaves the
    /// session exactly as it was.
    pub fn load_sheet_from_path(&mut self, path: &Path) -> SliceResult<(u32, u32)> {
        let sheet = SpriteSheet::from_path(path)?;
        Ok(self.install_sheet(sheet))
    }

    /// Loads a sheet from in-memory image bytes; same replacement and
    /// failure semantics as [`Self::load_sheet_from_path`].
    pub fn load_sheet_from_bytes(&mut self, bytes: &[u8]) -> SliceResult<(u32, u32)> {
        let sheet = SpriteSheet::from_bytes(bytes)?;
        Ok(self.install_sheet(sheet))
    }

    fn install_sheet(&mut self, sheet: SpriteSheet) -> (u32, u32) {
        let dims = (sheet.width(), sheet.height());
        self.clear();
        info!(width = dims.0, height = dims.1, "sheet loaded");
        self.sheet = Some(sheet);
        dims
    }

    /// Drops the sheet, all slices, and resets the manifest.
    pub fn clear(&mut self) {
        self.sheet = None;
        self.frames.clear();
        self.manifest = Manifest::empty();
    }

    /// The currently loaded sheet, if any.
    #[must_use]
    pub fn sheet(&self) -> Option<&SpriteSheet> {
        self.sheet.as_ref()
    }

    /// The frames produced by the last slicing pass, minus any removed.
    #[must_use]
    pub fn frames(&self) -> &[SlicedFrame] {
        &self.frames
    }

    /// The current manifest preview. Matches the frame list at all times.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Runs detection only, without touching session state.
    pub fn detect(&self, params: &DetectParams) -> SliceResult<Vec<FrameRun>> {
        let sheet = self.sheet.as_ref().ok_or(SliceError::NoSheetLoaded)?;
        Ok(detect_frames(sheet, params))
    }

    /// Detects, crops, and encodes frames, replacing the session's frame
    /// list and manifest. The prefix is sanitized here.
    pub fn detect_and_slice(
        &mut self,
        params: &DetectParams,
        raw_prefix: &str,
        zero_pad: usize,
    ) -> SliceResult<&[SlicedFrame]> {
        let sheet = self.sheet.as_ref().ok_or(SliceError::NoSheetLoaded)?;
        let prefix = sanitize_prefix(raw_prefix);

        let runs = detect_frames(sheet, params);
        if runs.is_empty() {
            return Err(SliceError::NoFramesDetected);
        }

        let frames = slice_frames(sheet, &runs, &prefix, zero_pad)?;
        info!(prefix = %prefix, frames = frames.len(), "sliced sheet");
        self.manifest = Manifest::for_frames(&prefix, &frames);
        self.frames = frames;
        Ok(&self.frames)
    }

    /// Removes a frame by name from both the frame list and the manifest.
    /// Returns whether anything was removed.
    pub fn remove_frame(&mut self, name: &str) -> bool {
        let before = self.frames.len();
        self.frames.retain(|frame| frame.name != name);
        let removed = self.frames.len() != before;
        if removed {
            self.manifest.assets.retain(|asset| asset.name != name);
            info!(name, "removed slice");
        }
        removed
    }

    /// Archives the frames currently held by the session, re-stamping the
    /// manifest with the prefix supplied at export time. Does not re-detect.
    pub fn export_archive(&mut self, raw_prefix: &str) -> SliceResult<ArchiveBundle> {
        if self.frames.is_empty() {
            return Err(SliceError::NothingToExport);
        }
        let prefix = sanitize_prefix(raw_prefix);
        let bundle = build_archive(&self.frames, &prefix)?;
        self.manifest = Manifest::for_frames(&prefix, &self.frames);
        Ok(bundle)
    }
}
