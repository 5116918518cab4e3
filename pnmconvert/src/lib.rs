//! Conversion between Netpbm dialects, built on `libnetpbm`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use libnetpbm::{canonicalize, supported_types, GrayscaleConversion, Image, ImageType};
use num_bigint::BigUint;
use tracing::{debug, info, instrument};

/// Returns the conventional file extension for the given dialect
#[must_use]
pub const fn default_extension(target: ImageType) -> &'static str {
    match target {
        ImageType::PlainPbm | ImageType::Pbm => "pbm",
        ImageType::PlainPgm | ImageType::Pgm => "pgm",
        ImageType::PlainPpm | ImageType::Ppm => "ppm",
        ImageType::Pam | ImageType::BigPam => "pam",
    }
}

/// Reads a Netpbm image from `input`, optionally converts its grayscale polarity,
/// and re-encodes it to `output` in the `target` dialect.
///
/// # Errors
///
/// Errors if the input cannot be decoded, the image cannot be represented in the
/// target dialect (the supported dialects are listed on stderr in that case), or the
/// output cannot be written.
#[instrument]
pub fn convert(
    input: &Path,
    output: &Path,
    target: ImageType,
    grayscale: GrayscaleConversion,
) -> Result<()> {
    // arbitrary-precision samples, so a single code path covers every dialect
    // including Big PAM
    let image: Image<BigUint> = Image::from_file(input)
        .with_context(|| format!("read Netpbm image from {}", input.display()))?;
    debug!(
        "decoded {}x{} {} image with {} component(s)",
        image.header().width(),
        image.header().height(),
        image.header().image_type(),
        image.header().components().len()
    );

    let image = canonicalize(image, grayscale);

    let supported = supported_types(image.header());
    if !supported.contains(&target) {
        eprintln!("The image cannot be converted to {target}. Supported types for the image are:");
        for supported_type in &supported {
            eprintln!("  {supported_type}");
        }
        bail!("unsupported conversion to {target}");
    }

    image
        .write_file(output, target)
        .with_context(|| format!("write {target} image to {}", output.display()))?;
    info!("Successfully wrote {target} image to {}", output.display());
    Ok(())
}
