//! Sprite sheet raster access.
//!
//! A [`SpriteSheet`] is the immutable source of truth for one slicing pass:
//! both column occupancy and cropping read from the same decoded RGBA
//! buffer. Sheets are loaded once and replaced wholesale, never mutated.

use crate::error::SliceResult;
use image::RgbaImage;
use std::path::Path;
use tracing::debug;

/// An immutable RGBA sprite sheet.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pixels: RgbaImage,
}

impl SpriteSheet {
    /// Decodes a sheet from an image file on disk.
    pub fn from_path(path: &Path) -> SliceResult<Self> {
        let decoded = image::open(path)?;
        Ok(Self::from_image(decoded.to_rgba8()))
    }

    /// Decodes a sheet from in-memory image bytes (format is guessed).
    pub fn from_bytes(bytes: &[u8]) -> SliceResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_image(decoded.to_rgba8()))
    }

    /// Wraps an already-decoded RGBA buffer.
    #[must_use]
    pub fn from_image(pixels: RgbaImage) -> Self {
        debug!(
            width = pixels.width(),
            height = pixels.height(),
            "sheet ready"
        );
        Self { pixels }
    }

    /// Sheet width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Sheet height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Per-column occupancy: `true` iff at least one pixel in the column has
    /// alpha ≥ `alpha_threshold`. The comparison is inclusive, so a
    /// threshold of 0 marks every column occupied. Scans exit early on the
    /// first qualifying pixel; columns are independent reads over shared
    /// data, so this is safe to parallelize if it ever shows up in profiles.
    #[must_use]
    pub fn column_occupancy(&self, alpha_threshold: u8) -> Vec<bool> {
        let (width, height) = self.pixels.dimensions();
        let mut occupied = vec![false; width as usize];
        for x in 0..width {
            for y in 0..height {
                if self.pixels.get_pixel(x, y)[3] >= alpha_threshold {
                    occupied[x as usize] = true;
                    break;
                }
            }
        }
        occupied
    }

    /// Extracts the inclusive column range `[start, end]` across the full
    /// sheet height, preserving pixel data exactly.
    ///
    /// # Panics
    ///
    /// Panics if the range is reversed or runs past the sheet edge. The
    /// underlying crop would otherwise clamp silently and emit a frame
    /// narrower than the requested run.
    #[must_use]
    pub fn crop_columns(&self, start: u32, end: u32) -> RgbaImage {
        assert!(
            start <= end && end < self.width(),
            "column range [{start}, {end}] out of bounds for sheet width {}",
            self.width()
        );
        image::imageops::crop_imm(&self.pixels, start, 0, end - start + 1, self.height()).to_image()
    }
}
