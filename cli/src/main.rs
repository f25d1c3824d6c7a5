//! Command-line converter from raster images to page-addressed 1-bpp C
//! bitmap arrays for OLED-style displays.

mod config;
mod emit;

use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use image::{DynamicImage, ImageReader};
use monobitmap::{BitmapArtifact, BitmapError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Args, Config};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let cfg = Config::resolve(args).context("resolving arguments")?;

    let img = open_image(&cfg.input).context("opening input image")?;
    info!(path = %cfg.input.display(), "Opened image");

    let grid = monobitmap::convert(&img, cfg.target_height).context("converting image")?;
    info!(
        width = grid.width(),
        height = grid.height(),
        pages = grid.pages(),
        "Image converted"
    );

    let artifact = BitmapArtifact {
        name: cfg.array_name.clone(),
        grid,
    };
    emit::write_artifacts(&cfg.output_base, &artifact).context("writing output files")?;

    let grid = &artifact.grid;
    println!(
        "Complete!\nImage size: {}x{}\nMemory usage: {} bytes",
        grid.width(),
        grid.height(),
        grid.footprint()
    );
    Ok(())
}

/// Open and decode the input image.
///
/// A missing file reports as [`BitmapError::InputNotFound`]; an unreadable
/// or undecodable one propagates as `Io`/`Decode`.
fn open_image(path: &Path) -> monobitmap::Result<DynamicImage> {
    let reader = ImageReader::open(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            BitmapError::InputNotFound(path.to_owned())
        } else {
            BitmapError::Io(err)
        }
    })?;
    Ok(reader.decode()?)
}
