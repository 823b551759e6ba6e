//! Frame detection over column occupancy.
//!
//! The detector performs a left-to-right run-length scan of the sheet's
//! column occupancy vector. Transparent gaps narrower than the configured
//! tolerance are bridged into the surrounding run; runs narrower than the
//! configured minimum are discarded outright.

use crate::sheet::SpriteSheet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An inclusive range of sheet columns accepted as one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRun {
    /// First column of the run (0-indexed).
    pub start: u32,
    /// Last column of the run (0-indexed, inclusive).
    pub end: u32,
}

impl FrameRun {
    /// Creates a new run.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Run width in columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// Tunable parameters for frame detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectParams {
    /// Minimum alpha for a pixel to count as occupied (inclusive, 0-255).
    pub alpha_threshold: u8,
    /// Minimum accepted run width in columns (≥ 1).
    pub min_width: u32,
    /// Maximum unoccupied span bridged inside a run (in columns).
    pub gap_tolerance: u32,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            alpha_threshold: 1,
            min_width: 4,
            gap_tolerance: 4,
        }
    }
}

impl DetectParams {
    /// Clamps out-of-domain values: `min_width` is raised to at least 1.
    /// The alpha threshold and gap tolerance are already confined by their
    /// types.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            min_width: self.min_width.max(1),
            ..self
        }
    }
}

/// Detects frame runs in a sheet.
///
/// Recomputes column occupancy on every call and returns the ordered,
/// non-overlapping sequence of accepted runs. An empty result is valid and
/// means no frames were found under the given parameters.
#[must_use]
pub fn detect_frames(sheet: &SpriteSheet, params: &DetectParams) -> Vec<FrameRun> {
    let params = params.clamped();
    let occupied = sheet.column_occupancy(params.alpha_threshold);
    let runs = scan_runs(&occupied, params.min_width, params.gap_tolerance);
    debug!(
        columns = occupied.len(),
        runs = runs.len(),
        "frame detection complete"
    );
    runs
}

/// Run-length scan over an occupancy vector.
///
/// On hitting an unoccupied column mid-run, looks ahead up to
/// `gap_tolerance` columns; if an occupied column lies inside the sheet
/// within that span, the gap is internal to the run and scanning continues
/// past it. Otherwise the run closes at the last occupied column. Scanning
/// resumes immediately after the last column of every closed run, accepted
/// or not.
fn scan_runs(occupied: &[bool], min_width: u32, gap_tolerance: u32) -> Vec<FrameRun> {
    let width = occupied.len();
    let gap_tolerance = gap_tolerance as usize;
    let mut runs = Vec::new();

    let mut x = 0;
    while x < width {
        while x < width && !occupied[x] {
            x += 1;
        }
        if x >= width {
            break;
        }
        let start = x;
        let mut last = x;
        x += 1;

        while x < width {
            if occupied[x] {
                last = x;
                x += 1;
                continue;
            }
            let mut gap = 1;
            while x + gap < width && gap <= gap_tolerance && !occupied[x + gap] {
                gap += 1;
            }
            if x + gap < width && gap <= gap_tolerance && occupied[x + gap] {
                // Bridge the gap; the occupied lookahead column joins the run.
                x += gap + 1;
                last = x - 1;
                continue;
            }
            break;
        }

        if (last - start + 1) as u32 >= min_width {
            runs.push(FrameRun::new(start as u32, last as u32));
        }
        x = last + 1;
    }

    runs
}
