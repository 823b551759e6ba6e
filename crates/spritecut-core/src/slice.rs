//! Run cropping, frame naming, and PNG encoding.

use crate::detect::FrameRun;
use crate::error::SliceResult;
use crate::sheet::SpriteSheet;
use image::RgbaImage;
use std::io::Cursor;
use tracing::debug;

/// Fallback token used when a prefix sanitizes down to nothing.
pub const DEFAULT_PREFIX: &str = "frames";

/// A single cropped frame, losslessly PNG-encoded.
#[derive(Debug, Clone)]
pub struct SlicedFrame {
    /// File name, `<prefix>_<index>.png` with the index zero-padded.
    pub name: String,
    /// Frame width in pixels (the run width).
    pub width: u32,
    /// Frame height in pixels (always the full sheet height).
    pub height: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl SlicedFrame {
    /// Encoded size in bytes, as recorded in the manifest.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.png.len()
    }
}

/// Makes a user-supplied prefix safe for folder and file names.
///
/// Surrounding whitespace is trimmed; each internal whitespace run and each
/// run of characters outside `[A-Za-z0-9_-]` collapses to a single
/// underscore. An empty result falls back to [`DEFAULT_PREFIX`].
#[must_use]
pub fn sanitize_prefix(raw: &str) -> String {
    #[derive(PartialEq, Clone, Copy)]
    enum Class {
        Valid,
        Space,
        Other,
    }

    let mut out = String::with_capacity(raw.len());
    let mut prev = Class::Valid;
    for ch in raw.trim().chars() {
        let class = if ch.is_whitespace() {
            Class::Space
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            Class::Valid
        } else {
            Class::Other
        };
        match class {
            Class::Valid => out.push(ch),
            Class::Space | Class::Other => {
                if prev != class {
                    out.push('_');
                }
            }
        }
        prev = class;
    }

    if out.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        out
    }
}

/// Builds a frame file name: `<prefix>_<index>.png`, index 1-based and
/// zero-padded to at least `pad` digits (minimum 1).
#[must_use]
pub fn frame_name(prefix: &str, index: usize, pad: usize) -> String {
    let pad = pad.max(1);
    format!("{prefix}_{index:0pad$}.png")
}

/// Crops and encodes every run into a named frame, in run order.
///
/// `prefix` must already be sanitized; the session and CLI layers call
/// [`sanitize_prefix`] before slicing.
pub fn slice_frames(
    sheet: &SpriteSheet,
    runs: &[FrameRun],
    prefix: &str,
    zero_pad: usize,
) -> SliceResult<Vec<SlicedFrame>> {
    let mut frames = Vec::with_capacity(runs.len());
    for (i, run) in runs.iter().enumerate() {
        let crop = sheet.crop_columns(run.start, run.end);
        let name = frame_name(prefix, i + 1, zero_pad);
        let png = encode_png(&crop)?;
        debug!(name = %name, width = crop.width(), bytes = png.len(), "frame encoded");
        frames.push(SlicedFrame {
            name,
            width: crop.width(),
            height: crop.height(),
            png,
        });
    }
    Ok(frames)
}

fn encode_png(img: &RgbaImage) -> SliceResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut bytes),
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_prefix("My Hero!! 2"), "My_Hero__2");
        assert_eq!(sanitize_prefix("walk  cycle"), "walk_cycle");
        assert_eq!(sanitize_prefix("idle-Set_3"), "idle-Set_3");
    }

    #[test]
    fn test_sanitize_blank_falls_back() {
        assert_eq!(sanitize_prefix("   "), DEFAULT_PREFIX);
        assert_eq!(sanitize_prefix(""), DEFAULT_PREFIX);
    }

    #[test]
    fn test_sanitize_trims_edges() {
        assert_eq!(sanitize_prefix("  hero  "), "hero");
    }

    #[test]
    fn test_frame_name_padding() {
        assert_eq!(frame_name("hero", 1, 2), "hero_01.png");
        assert_eq!(frame_name("hero", 12, 2), "hero_12.png");
        assert_eq!(frame_name("hero", 7, 4), "hero_0007.png");
        // Pad is clamped to at least one digit.
        assert_eq!(frame_name("hero", 3, 0), "hero_3.png");
    }

    #[test]
    fn test_slice_round_trips_pixels() {
        let mut img = RgbaImage::new(8, 3);
        for x in 2..=5 {
            img.put_pixel(x, 1, Rgba([x as u8 * 10, 0, 200, 255]));
        }
        let sheet = SpriteSheet::from_image(img);
        let runs = [FrameRun::new(2, 5)];

        let frames = slice_frames(&sheet, &runs, "hero", 2).expect("slicing failed");
        assert_eq!(frames.len(), 1);

        let frame = &frames[0];
        assert_eq!(frame.name, "hero_01.png");
        assert_eq!((frame.width, frame.height), (4, 3));

        let decoded = image::load_from_memory(&frame.png)
            .expect("frame is not valid PNG")
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(0, 1), &Rgba([20, 0, 200, 255]));
        assert_eq!(decoded.get_pixel(3, 1), &Rgba([50, 0, 200, 255]));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_slice_names_follow_run_order() {
        let sheet = SpriteSheet::from_image(RgbaImage::new(12, 2));
        let runs = [
            FrameRun::new(0, 2),
            FrameRun::new(4, 6),
            FrameRun::new(8, 11),
        ];
        let frames = slice_frames(&sheet, &runs, "walk", 2).expect("slicing failed");
        let names: Vec<_> = frames.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["walk_01.png", "walk_02.png", "walk_03.png"]);
    }
}
