//! CLI surface and resolved run configuration.

use std::path::{Path, PathBuf};

use clap::Parser;
use monobitmap::{BitmapError, Result};

/// Image to OLED-style bitmap converter.
#[derive(Debug, Parser)]
#[command(name = "img2oled", version, about = "Image to OLED-style bitmap converter")]
pub struct Args {
    /// Input image file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file name (defaults to the input file name without extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Vertical output bitmap size (height)
    #[arg(short = 's', long)]
    pub size: Option<String>,

    /// Bitmap array name (defaults to the output name)
    #[arg(short = 'n', long = "bmname")]
    pub bmname: Option<String>,
}

/// Fully resolved run configuration.
///
/// Every optional argument is settled here, once, before any work starts:
/// explicit value first, then the derived default. Only the input path has
/// no derivation and stays required.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    /// Base path for the emitted artifacts; `.h`/`.c` extensions are added.
    pub output_base: PathBuf,
    /// Target bitmap height; `None` keeps the source height.
    pub target_height: Option<u32>,
    /// C identifier for the emitted array.
    pub array_name: String,
}

impl Config {
    pub fn resolve(args: Args) -> Result<Self> {
        let target_height = args.size.as_deref().map(parse_height).transpose()?;

        let output_base = args
            .output
            .unwrap_or_else(|| args.input.with_extension(""));

        let array_name = match args.bmname {
            Some(name) => name,
            None => file_stem(&output_base),
        };

        Ok(Self {
            input: args.input,
            output_base,
            target_height,
            array_name,
        })
    }
}

/// Parse the user-supplied bitmap height.
///
/// Anything that is not a positive integer ("abc", "-5", "0") is an
/// [`BitmapError::InvalidSize`].
fn parse_height(raw: &str) -> Result<u32> {
    let height = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| BitmapError::InvalidSize(raw.into()))?;
    if height == 0 {
        return Err(BitmapError::InvalidSize(raw.into()));
    }
    Ok(height)
}

/// Final path component without its extension, for deriving the array name.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bitmap".to_string())
}
