//! Encoder mirroring the reader's grammar, so every stream this module produces can
//! be decoded back by [`crate::reader`].

use std::collections::BTreeSet;
use std::io::Write;

use tracing::debug;

use crate::{
    error::Error,
    image::{tuple_type, Component, Header, Image, ImageType},
    sample::Sample,
};

/// Returns the set of dialects into which an image with this header can be encoded.
///
/// Big PAM is always supported. Every other dialect limits components to two bytes.
/// PAM accepts any channel layout; PPM requires exactly `[Red, Green, Blue]`, PGM
/// exactly `[White]`, and PBM a genuine 1-bit bitmap with a single `[Black]`
/// channel.
#[must_use]
pub fn supported_types<S: Sample>(header: &Header<S>) -> BTreeSet<ImageType> {
    let mut types = BTreeSet::from([ImageType::BigPam]);
    if header.bytes_per_sample() > 2 {
        return types;
    }
    types.insert(ImageType::Pam);
    if header.components() == [Component::Red, Component::Green, Component::Blue] {
        types.insert(ImageType::Ppm);
        types.insert(ImageType::PlainPpm);
    }
    if header.components() == [Component::White] {
        types.insert(ImageType::Pgm);
        types.insert(ImageType::PlainPgm);
    }
    if header.is_bitmap() && header.components() == [Component::Black] {
        types.insert(ImageType::Pbm);
        types.insert(ImageType::PlainPbm);
    }
    types
}

/// The PAM tuple name for this header's channel layout.
fn pam_tuple_type<S: Sample>(header: &Header<S>) -> String {
    if header.is_bitmap() && header.components() == [Component::Black] {
        return "BLACKANDWHITE".to_owned();
    }
    tuple_type::encode_tuple_type(header.components())
}

/// Encodes the header for the given target dialect.
///
/// The compatibility check happens before any byte is written, so a rejected write
/// never produces a truncated or mislabeled stream.
///
/// # Errors
///
/// [`Error::UnsupportedConversion`] if `target` cannot represent this header;
/// otherwise any stream failure.
pub fn write_header<S: Sample>(
    header: &Header<S>,
    writer: &mut impl Write,
    target: ImageType,
) -> Result<(), Error> {
    if !supported_types(header).contains(&target) {
        return Err(Error::UnsupportedConversion { requested: target });
    }
    writeln!(writer, "P{}", char::from(target.magic_digit()))?;
    if matches!(target, ImageType::Pam | ImageType::BigPam) {
        writeln!(writer, "WIDTH {}", header.width())?;
        writeln!(writer, "HEIGHT {}", header.height())?;
        writeln!(writer, "DEPTH {}", header.components().len())?;
        writeln!(writer, "MAXVAL {}", header.max_value())?;
        writeln!(writer, "TUPLTYPE {}", pam_tuple_type(header))?;
        writeln!(writer, "ENDHDR")?;
    } else {
        writeln!(writer, "{} {}", header.width(), header.height())?;
        if !matches!(target, ImageType::Pbm | ImageType::PlainPbm) {
            writeln!(writer, "{}", header.max_value())?;
        }
    }
    Ok(())
}

/// Encodes one row in the given target dialect.
///
/// Plain targets emit each value as decimal digits followed by a space, one row per
/// line. Packed-bit rows flush their partial trailing byte at the end of every row
/// (padding bits are zero), never packing bits across row boundaries. Binary targets
/// emit `bytes_per_sample` big-endian bytes per value.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if `row` does not hold exactly
/// `width * components` values; otherwise any stream failure.
pub fn write_row<S: Sample>(
    header: &Header<S>,
    row: &[S],
    writer: &mut impl Write,
    target: ImageType,
) -> Result<(), Error> {
    if row.len() != header.values_per_row() {
        return Err(Error::DimensionMismatch {
            context: "row value count".to_owned(),
            expected: header.values_per_row(),
            actual: row.len(),
        });
    }
    if target.is_plain() {
        for value in row {
            write!(writer, "{value} ")?;
        }
        writeln!(writer)?;
    } else if target == ImageType::Pbm {
        let mut bytes = Vec::with_capacity(row.len().div_ceil(8));
        for chunk in row.chunks(8) {
            let mut byte = 0u8;
            for (i, value) in chunk.iter().enumerate() {
                if !value.is_zero() {
                    // earliest value is the most significant bit
                    byte |= 1 << (7 - i);
                }
            }
            bytes.push(byte);
        }
        writer.write_all(&bytes)?;
    } else {
        let bytes_per = header.bytes_per_sample();
        let mut bytes = Vec::with_capacity(row.len() * bytes_per);
        for value in row {
            value.write_be(bytes_per, &mut bytes);
        }
        writer.write_all(&bytes)?;
    }
    Ok(())
}

/// Encodes a sequence of rows; the counterpart of [`crate::read_rows`] for callers
/// that produce rows incrementally.
///
/// # Errors
///
/// See [`write_row`].
pub fn write_rows<'a, S: Sample + 'a>(
    header: &Header<S>,
    rows: impl IntoIterator<Item = &'a [S]>,
    writer: &mut impl Write,
    target: ImageType,
) -> Result<(), Error> {
    for row in rows {
        write_row(header, row, writer, target)?;
    }
    Ok(())
}

/// Encodes a complete image: header, then rows.
///
/// # Errors
///
/// [`Error::UnsupportedConversion`] (before any byte is written) if `target` cannot
/// represent this image; otherwise any stream failure.
pub fn write_image<S: Sample>(
    image: &Image<S>,
    writer: &mut impl Write,
    target: ImageType,
) -> Result<(), Error> {
    debug!(
        "encoding {}x{} image as {target}",
        image.header().width(),
        image.header().height()
    );
    write_header(image.header(), writer, target)?;
    write_rows(
        image.header(),
        image.rows().iter().map(Vec::as_slice),
        writer,
        target,
    )
}
