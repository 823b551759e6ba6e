//! # Spritecut Core
//!
//! Sprite-sheet slicing for game asset pipelines.
//!
//! Given a sheet with frames laid out horizontally and separated by
//! transparent columns, this crate:
//! - detects frame boundaries with a gap-tolerant run-length scan over
//!   column occupancy ([`detect`]),
//! - crops each run losslessly and encodes it as PNG ([`slice`]),
//! - packages the frames with an asset manifest into a ZIP archive
//!   ([`manifest`], [`archive`]),
//! - and tracks the loaded sheet and produced frames for a single
//!   interactive caller ([`session`]).
//!
//! All operations are synchronous and sequential; nothing here spawns
//! background work.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod archive;
pub mod detect;
pub mod error;
pub mod manifest;
pub mod session;
pub mod sheet;
pub mod slice;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::archive::*;
    pub use crate::detect::*;
    pub use crate::error::*;
    pub use crate::manifest::*;
    pub use crate::session::*;
    pub use crate::sheet::*;
    pub use crate::slice::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    // End-to-end: sheet -> runs -> frames -> archive, per the documented
    // layout for a three-frame "hero" sheet.
    #[test]
    fn test_full_pipeline_layout() {
        let mut img = RgbaImage::new(26, 6);
        for x in (0..6).chain(10..16).chain(20..26) {
            for y in 0..6 {
                img.put_pixel(x, y, Rgba([10, 20, 30, 255]));
            }
        }
        let sheet = SpriteSheet::from_image(img);

        let runs = detect_frames(&sheet, &DetectParams::default());
        assert_eq!(runs.len(), 3);

        let prefix = sanitize_prefix("hero");
        let frames = slice_frames(&sheet, &runs, &prefix, 2).expect("slicing failed");
        let bundle = build_archive(&frames, &prefix).expect("archive build failed");
        assert_eq!(bundle.suggested_filename, "hero.zip");

        let archive = zip::ZipArchive::new(std::io::Cursor::new(&bundle.bytes[..]))
            .expect("not a valid zip");
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "hero/assets/hero/hero_01.png",
                "hero/assets/hero/hero_02.png",
                "hero/assets/hero/hero_03.png",
                "hero/manifest.json",
            ]
        );
    }
}
