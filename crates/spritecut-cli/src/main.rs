//! # Spritecut CLI
//!
//! Thin command-line adapter over `spritecut-core`: loads a sheet, drives a
//! slicing session, and writes the resulting archive (or loose assets) to
//! disk. All logic lives in the core crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use clap::Parser;
use spritecut_core::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Slice a sprite sheet into frames and package them with a manifest.
#[derive(Parser, Debug)]
#[command(name = "spritecut", version, about)]
struct Cli {
    /// Sprite sheet image to slice.
    source: PathBuf,

    /// Base name for the archive root, asset folder, and frame files.
    #[arg(short, long, default_value = "frame")]
    prefix: String,

    /// Minimum alpha for a pixel to count as occupied (inclusive, 0-255).
    #[arg(long, default_value_t = 1)]
    alpha_threshold: u8,

    /// Minimum accepted frame width in columns.
    #[arg(long, default_value_t = 4)]
    min_width: u32,

    /// Maximum transparent gap bridged inside a frame, in columns.
    #[arg(long, default_value_t = 4)]
    gap_tolerance: u32,

    /// Zero-pad width for frame indices.
    #[arg(long, default_value_t = 2)]
    zero_pad: usize,

    /// Output directory.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Detect and report frame runs without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Write loose PNGs and manifest.json instead of a ZIP archive.
    #[arg(long)]
    unpacked: bool,

    /// Print the manifest document after slicing. No manifest exists on a
    /// dry run, so the two flags are mutually exclusive.
    #[arg(long, conflicts_with = "dry_run")]
    print_manifest: bool,
}

impl Cli {
    fn detect_params(&self) -> DetectParams {
        DetectParams {
            alpha_threshold: self.alpha_threshold,
            min_width: self.min_width,
            gap_tolerance: self.gap_tolerance,
        }
        .clamped()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("spritecut=info".parse()?))
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let mut session = SliceSession::new();
    let (width, height) = session.load_sheet_from_path(&cli.source)?;
    info!(source = %cli.source.display(), width, height, "sheet loaded");

    let params = cli.detect_params();

    if cli.dry_run {
        return report_runs(&session.detect(&params)?);
    }

    if let Err(err) = session.detect_and_slice(&params, &cli.prefix, cli.zero_pad) {
        if err.is_advisory() {
            println!("{err}");
            return Ok(());
        }
        return Err(err.into());
    }

    for frame in session.frames() {
        println!(
            "{:<24} {:>5}x{:<5} {:>8.1} KiB",
            frame.name,
            frame.width,
            frame.height,
            frame.byte_len() as f64 / 1024.0
        );
    }

    if cli.print_manifest {
        println!("{}", session.manifest().to_json_pretty()?);
    }

    if cli.unpacked {
        write_unpacked(&session, &cli.output, &cli.prefix)
    } else {
        write_archive(&mut session, &cli.output, &cli.prefix)
    }
}

fn report_runs(runs: &[FrameRun]) -> Result<()> {
    if runs.is_empty() {
        println!("No frames detected. Try lowering the alpha threshold or raising the gap tolerance.");
        return Ok(());
    }
    for (i, run) in runs.iter().enumerate() {
        println!(
            "frame {:>3}: columns {}..={} ({} px wide)",
            i + 1,
            run.start,
            run.end,
            run.width()
        );
    }
    Ok(())
}

fn write_archive(session: &mut SliceSession, output: &Path, raw_prefix: &str) -> Result<()> {
    let bundle = session.export_archive(raw_prefix)?;
    fs::create_dir_all(output)?;
    let path = output.join(&bundle.suggested_filename);
    fs::write(&path, &bundle.bytes)?;
    println!(
        "Wrote {} ({} frames, {} bytes)",
        path.display(),
        session.frames().len(),
        bundle.bytes.len()
    );
    Ok(())
}

fn write_unpacked(session: &SliceSession, output: &Path, raw_prefix: &str) -> Result<()> {
    let prefix = sanitize_prefix(raw_prefix);
    let asset_dir = output.join("assets").join(&prefix);
    fs::create_dir_all(&asset_dir)?;

    for frame in session.frames() {
        fs::write(asset_dir.join(&frame.name), &frame.png)?;
    }
    fs::write(
        output.join("manifest.json"),
        session.manifest().to_json_pretty()?,
    )?;
    println!(
        "Wrote {} frames to {}",
        session.frames().len(),
        asset_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn write_test_sheet(dir: &Path) -> PathBuf {
        let mut img = RgbaImage::new(16, 4);
        for x in (0..6).chain(10..16) {
            for y in 0..4 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        let mut bytes = Vec::new();
        image::write_buffer_with_format(
            &mut Cursor::new(&mut bytes),
            img.as_raw(),
            img.width(),
            img.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .expect("encoding test sheet failed");

        let path = dir.join("sheet.png");
        fs::write(&path, bytes).expect("writing test sheet failed");
        path
    }

    fn cli_for(source: PathBuf, output: PathBuf) -> Cli {
        Cli::parse_from([
            "spritecut",
            source.to_str().expect("non-utf8 temp path"),
            "--prefix",
            "hero",
            "--output",
            output.to_str().expect("non-utf8 temp path"),
        ])
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let cli = Cli::parse_from(["spritecut", "sheet.png"]);
        assert_eq!(cli.prefix, "frame");
        let params = cli.detect_params();
        assert_eq!(params.alpha_threshold, 1);
        assert_eq!(params.min_width, 4);
        assert_eq!(params.gap_tolerance, 4);
        assert_eq!(cli.zero_pad, 2);
    }

    #[test]
    fn test_dry_run_rejects_print_manifest() {
        let result =
            Cli::try_parse_from(["spritecut", "sheet.png", "--dry-run", "--print-manifest"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_writes_archive() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let source = write_test_sheet(dir.path());
        let cli = cli_for(source, dir.path().to_path_buf());

        run(&cli).expect("run failed");
        assert!(dir.path().join("hero.zip").is_file());
    }

    #[test]
    fn test_run_unpacked_writes_loose_assets() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let source = write_test_sheet(dir.path());
        let mut cli = cli_for(source, dir.path().to_path_buf());
        cli.unpacked = true;

        run(&cli).expect("run failed");
        assert!(dir.path().join("assets/hero/hero_01.png").is_file());
        assert!(dir.path().join("assets/hero/hero_02.png").is_file());
        assert!(dir.path().join("manifest.json").is_file());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let source = write_test_sheet(dir.path());
        let mut cli = cli_for(source, dir.path().to_path_buf());
        cli.dry_run = true;

        run(&cli).expect("run failed");
        assert!(!dir.path().join("hero.zip").exists());
        assert!(!dir.path().join("manifest.json").exists());
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let cli = cli_for(dir.path().join("nope.png"), dir.path().to_path_buf());
        assert!(run(&cli).is_err());
    }
}
