//! ZIP archive assembly.
//!
//! Archives are built fresh on every export and never mutated in place.
//! Layout, with `prefix` as the root folder:
//!
//! ```text
//! <prefix>/manifest.json
//! <prefix>/assets/<prefix>/<frame name>  (one per frame, input order)
//! ```

use crate::error::SliceResult;
use crate::manifest::Manifest;
use crate::slice::SlicedFrame;
use std::io::{Cursor, Write};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// An assembled in-memory archive ready to be saved.
#[derive(Debug, Clone)]
pub struct ArchiveBundle {
    /// ZIP file contents.
    pub bytes: Vec<u8>,
    /// Suggested file name, `<prefix>.zip`.
    pub suggested_filename: String,
}

/// Builds an archive from the given frames.
///
/// `prefix` must already be sanitized. The manifest asset count always
/// equals the number of frames passed in; no deduplication is performed.
pub fn build_archive(frames: &[SlicedFrame], prefix: &str) -> SliceResult<ArchiveBundle> {
    let manifest = Manifest::for_frames(prefix, frames);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file(format!("{prefix}/manifest.json"), options)?;
    writer.write_all(manifest.to_json_pretty()?.as_bytes())?;

    for frame in frames {
        writer.start_file(format!("{prefix}/assets/{prefix}/{}", frame.name), options)?;
        writer.write_all(&frame.png)?;
    }

    let bytes = writer.finish()?.into_inner();
    info!(
        frames = frames.len(),
        bytes = bytes.len(),
        "archive assembled"
    );
    Ok(ArchiveBundle {
        bytes,
        suggested_filename: format!("{prefix}.zip"),
    })
}
