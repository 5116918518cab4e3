use pnmconvert::{convert, default_extension};
use std::path::PathBuf;
use tracing::{info, Level};

use anyhow::{bail, Result};
use clap::Parser;
use libnetpbm::{GrayscaleConversion, ImageType};

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

fn parse_image_type(s: &str) -> Result<ImageType, String> {
    s.parse().map_err(|_| {
        format!("unknown image type {s:?} (expected one of plain-pbm, plain-pgm, plain-ppm, pbm, pgm, ppm, pam, big-pam)")
    })
}

fn parse_grayscale(s: &str) -> Result<GrayscaleConversion, String> {
    s.parse()
        .map_err(|_| format!("unknown grayscale conversion {s:?} (expected none, white-to-black, or black-to-white)"))
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// The Netpbm image to read
    input: PathBuf,

    /// The Netpbm image type into which to convert the given image
    #[arg(short = 't', long, value_parser = parse_image_type)]
    to_type: ImageType,

    /// Grayscale polarity conversion applied before encoding
    #[arg(short, long, default_value = "none", value_parser = parse_grayscale)]
    grayscale: GrayscaleConversion,

    /// The output file name
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .init();

    let output = match cli.output {
        Some(o) => o,
        None => {
            let mut output = PathBuf::new();
            let Some(dir) = cli.input.parent() else {
                bail!("Invalid input file");
            };
            let Some(Some(filename)) = cli.input.file_stem().map(|os| os.to_str()) else {
                bail!("Invalid input file");
            };
            let suffix = default_extension(cli.to_type);
            output.push(dir);
            output.push(format!("{filename}.{suffix}"));
            info!("output name: {}", output.display());
            output
        }
    };
    convert(&cli.input, &output, cli.to_type, cli.grayscale)?;
    Ok(())
}
