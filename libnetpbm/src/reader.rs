//! Streaming decoder for the seven Netpbm header dialects and three row encodings.
//!
//! The reader consumes exactly the bytes belonging to one image and leaves the stream
//! positioned immediately after it, so repeated calls decode concatenated images.

use std::io::{BufRead, ErrorKind};
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::{
    error::Error,
    image::{tuple_type, Component, Header, Image, ImageType},
    sample::{read_exact_or_truncated, Sample},
    WHITESPACE,
};

/// Reads a single byte, or `None` at end of stream.
fn read_byte(reader: &mut impl BufRead) -> Result<Option<u8>, Error> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(Error::Io(e)),
        }
    }
}

/// Discards bytes up to and including the next CR or LF.
///
/// Call after encountering a `#` byte anywhere whitespace is legal.
fn skip_comment(reader: &mut impl BufRead, eof_is_error: bool) -> Result<(), Error> {
    loop {
        match read_byte(reader)? {
            None => {
                if eof_is_error {
                    return Err(Error::TruncatedInput { context: "comment" });
                }
                return Ok(());
            }
            Some(b'\r' | b'\n') => return Ok(()),
            Some(_) => {}
        }
    }
}

/// Skips whitespace and comments, then accumulates bytes until the next whitespace
/// byte (which is consumed and discarded).
///
/// `final_token` marks the very last token of an image, for which end of stream
/// closes the token without error; everywhere else a premature end of stream is
/// reported as [`Error::TruncatedInput`].
fn next_token(reader: &mut impl BufRead, final_token: bool) -> Result<String, Error> {
    let mut token = Vec::new();
    // skip leading whitespace and any comments
    loop {
        match read_byte(reader)? {
            None => {
                if final_token {
                    return Ok(String::new());
                }
                return Err(Error::TruncatedInput { context: "token" });
            }
            Some(b'#') => skip_comment(reader, !final_token)?,
            Some(b) if WHITESPACE.contains(&b) => {}
            Some(b) => {
                token.push(b);
                break;
            }
        }
    }
    // accumulate until the next whitespace byte
    loop {
        match read_byte(reader)? {
            None => {
                if final_token {
                    break;
                }
                return Err(Error::TruncatedInput { context: "token" });
            }
            Some(b'#') => skip_comment(reader, !final_token)?,
            Some(b) if WHITESPACE.contains(&b) => break,
            Some(b) => token.push(b),
        }
    }
    Ok(String::from_utf8_lossy(&token).into_owned())
}

/// Reads bytes up to and including the next LF, returning everything before it.
fn read_header_line(reader: &mut impl BufRead) -> Result<String, Error> {
    let mut line = Vec::new();
    loop {
        match read_byte(reader)? {
            None => {
                return Err(Error::TruncatedInput {
                    context: "PAM header line",
                })
            }
            Some(b'\n') => return Ok(String::from_utf8_lossy(&line).into_owned()),
            Some(b) => line.push(b),
        }
    }
}

/// Splits a PAM header line into its keyword and the remainder after the first
/// whitespace byte.
fn split_keyword_value(line: &str) -> (&str, Option<&str>) {
    line.as_bytes()
        .iter()
        .position(|b| WHITESPACE.contains(b))
        .map_or((line, None), |i| (&line[..i], Some(&line[i + 1..])))
}

fn parse_dimension(field: &str, token: &str) -> Result<usize, Error> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedHeader {
            reason: format!("failed to parse {field} {token:?}"),
        });
    }
    token.parse().map_err(|_| Error::MalformedHeader {
        reason: format!("failed to parse {field} {token:?}"),
    })
}

fn parse_pam_dimension(field: &str, value: Option<&str>) -> Result<usize, Error> {
    let value = value.ok_or_else(|| Error::MalformedHeader {
        reason: format!("PAM header field {field} is missing a value"),
    })?;
    parse_dimension(field, value)
}

fn missing_field(field: &str) -> Error {
    Error::MalformedHeader {
        reason: format!("PAM header missing {field}"),
    }
}

fn read_pbm_header<S: Sample>(
    reader: &mut impl BufRead,
    image_type: ImageType,
) -> Result<Header<S>, Error> {
    let width = parse_dimension("width", &next_token(reader, false)?)?;
    let height = parse_dimension("height", &next_token(reader, false)?)?;
    // the token's trailing whitespace byte has already been consumed, so for P4 the
    // packed pixel data starts at the current stream position
    Header::builder()
        .image_type(image_type)
        .width(width)
        .height(height)
        .components(vec![Component::Black])
        .max_value(S::one())
        .build()
}

fn read_pgm_ppm_header<S: Sample>(
    reader: &mut impl BufRead,
    image_type: ImageType,
    components: &[Component],
) -> Result<Header<S>, Error> {
    let width = parse_dimension("width", &next_token(reader, false)?)?;
    let height = parse_dimension("height", &next_token(reader, false)?)?;
    let max_value = S::parse(&next_token(reader, false)?)?;
    Header::builder()
        .image_type(image_type)
        .width(width)
        .height(height)
        .components(components.to_vec())
        .max_value(max_value)
        .build()
}

fn read_pam_header<S: Sample>(reader: &mut impl BufRead) -> Result<Header<S>, Error> {
    match read_byte(reader)? {
        None => {
            return Err(Error::TruncatedInput {
                context: "PAM header",
            })
        }
        Some(b'\n') => {}
        Some(_) => {
            return Err(Error::MalformedHeader {
                reason: "byte after magic is not a newline".to_owned(),
            })
        }
    }

    let mut width = None;
    let mut height = None;
    let mut depth = None;
    let mut max_token: Option<String> = None;
    let mut tuple_type = String::new();

    loop {
        let line = read_header_line(reader)?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, value) = split_keyword_value(&line);
        match keyword.to_ascii_uppercase().as_str() {
            "WIDTH" => width = Some(parse_pam_dimension("WIDTH", value)?),
            "HEIGHT" => height = Some(parse_pam_dimension("HEIGHT", value)?),
            "DEPTH" => depth = Some(parse_pam_dimension("DEPTH", value)?),
            "MAXVAL" => {
                max_token = Some(
                    value
                        .ok_or_else(|| Error::MalformedHeader {
                            reason: "PAM header field MAXVAL is missing a value".to_owned(),
                        })?
                        .to_owned(),
                );
            }
            "TUPLTYPE" => {
                // repeated TUPLTYPE lines are space-joined (the format's rarely-used
                // multi-line extension)
                if let Some(value) = value {
                    if !tuple_type.is_empty() {
                        tuple_type.push(' ');
                    }
                    tuple_type.push_str(value);
                }
            }
            "ENDHDR" => break,
            _ => trace!("ignoring unknown PAM header line {line:?}"),
        }
    }

    let width = width.ok_or_else(|| missing_field("WIDTH"))?;
    let height = height.ok_or_else(|| missing_field("HEIGHT"))?;
    let depth = depth.ok_or_else(|| missing_field("DEPTH"))?;
    let max_token = max_token.ok_or_else(|| missing_field("MAXVAL"))?;

    let max_value = S::parse(&max_token)?;
    let bytes_per_sample = S::bytes_for(&max_value);
    let components = tuple_type::decode_tuple_type(&tuple_type);
    if components.len() != depth {
        return Err(Error::MalformedHeader {
            reason: format!(
                "tuple type {tuple_type:?} decodes to {} components but DEPTH is {depth}",
                components.len()
            ),
        });
    }

    let image_type = if bytes_per_sample <= 2 {
        ImageType::Pam
    } else {
        ImageType::BigPam
    };
    Header::builder()
        .image_type(image_type)
        .width(width)
        .height(height)
        .components(components)
        .max_value(max_value)
        .build()
}

/// Reads the two magic bytes and the dialect's header fields.
///
/// The stream is left positioned at the first byte of pixel data.
///
/// # Errors
///
/// [`Error::BadMagic`] if the first two bytes are not `P` plus a digit between 1
/// and 7; [`Error::TruncatedInput`] if the stream ends inside the header;
/// [`Error::MalformedHeader`] / [`Error::MalformedNumber`] for invalid fields.
pub fn read_header<S: Sample>(reader: &mut impl BufRead) -> Result<Header<S>, Error> {
    let p = read_byte(reader)?.ok_or(Error::TruncatedInput { context: "magic" })?;
    if p != b'P' {
        return Err(Error::BadMagic { found: vec![p] });
    }
    let digit = read_byte(reader)?.ok_or(Error::TruncatedInput { context: "magic" })?;

    let header = match digit {
        b'1' => read_pbm_header(reader, ImageType::PlainPbm),
        b'2' => read_pgm_ppm_header(reader, ImageType::PlainPgm, &[Component::White]),
        b'3' => read_pgm_ppm_header(
            reader,
            ImageType::PlainPpm,
            &[Component::Red, Component::Green, Component::Blue],
        ),
        b'4' => read_pbm_header(reader, ImageType::Pbm),
        b'5' => read_pgm_ppm_header(reader, ImageType::Pgm, &[Component::White]),
        b'6' => read_pgm_ppm_header(
            reader,
            ImageType::Ppm,
            &[Component::Red, Component::Green, Component::Blue],
        ),
        b'7' => read_pam_header(reader),
        other => {
            return Err(Error::BadMagic {
                found: vec![b'P', other],
            })
        }
    }?;
    debug!(
        "read {} header: {}x{}, {} component(s), max value {}",
        header.image_type(),
        header.width(),
        header.height(),
        header.components().len(),
        header.max_value()
    );
    Ok(header)
}

fn read_packed_row<S: Sample>(reader: &mut impl BufRead, width: usize) -> Result<Vec<S>, Error> {
    // rows are byte-aligned: trailing bits of the last byte are ignored
    let mut bytes = vec![0u8; width.div_ceil(8)];
    read_exact_or_truncated(reader, &mut bytes)?;
    let mut row = Vec::with_capacity(width);
    for i in 0..width {
        // leftmost pixel is the most significant bit
        let bit = (bytes[i / 8] >> (7 - i % 8)) & 1;
        row.push(if bit == 0 { S::zero() } else { S::one() });
    }
    Ok(row)
}

fn read_plain_row<S: Sample>(
    reader: &mut impl BufRead,
    count: usize,
    final_row: bool,
) -> Result<Vec<S>, Error> {
    let mut row = Vec::with_capacity(count);
    for i in 0..count {
        let final_token = final_row && i + 1 == count;
        let token = next_token(reader, final_token)?;
        row.push(S::parse(&token)?);
    }
    Ok(row)
}

enum RowCodec {
    PackedBits,
    Binary { bytes_per: usize },
    Plain,
}

/// A lazy sequence of decoded rows.
///
/// Each call to [`Iterator::next`] decodes exactly one row from the stream, so peak
/// memory stays at one row unless the caller materializes the sequence. After the
/// first error no further rows are produced.
pub struct Rows<'r, R: BufRead, S: Sample> {
    reader: &'r mut R,
    codec: RowCodec,
    width: usize,
    values_per_row: usize,
    height: usize,
    next_row: usize,
    failed: bool,
    _samples: PhantomData<S>,
}

impl<R: BufRead, S: Sample> Iterator for Rows<'_, R, S> {
    type Item = Result<Vec<S>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_row == self.height {
            return None;
        }
        let final_row = self.next_row + 1 == self.height;
        let result = match self.codec {
            RowCodec::PackedBits => read_packed_row(&mut *self.reader, self.width),
            RowCodec::Binary { bytes_per } => {
                S::read_row(&mut *self.reader, self.values_per_row, bytes_per)
            }
            RowCodec::Plain => read_plain_row(&mut *self.reader, self.values_per_row, final_row),
        };
        match result {
            Ok(row) => {
                self.next_row += 1;
                Some(Ok(row))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.height - self.next_row;
        if self.failed {
            (0, Some(0))
        } else {
            (remaining, Some(remaining))
        }
    }
}

/// Returns a lazy row sequence for the pixel data following `header`.
///
/// Exactly `header.height()` rows are produced regardless of dialect; the stream
/// must be positioned at the first byte of pixel data, which is where
/// [`read_header`] leaves it.
pub fn read_rows<'r, R: BufRead, S: Sample>(
    reader: &'r mut R,
    header: &Header<S>,
) -> Rows<'r, R, S> {
    let codec = match header.image_type() {
        ImageType::Pbm => RowCodec::PackedBits,
        ImageType::PlainPbm | ImageType::PlainPgm | ImageType::PlainPpm => RowCodec::Plain,
        ImageType::Pgm | ImageType::Ppm | ImageType::Pam | ImageType::BigPam => RowCodec::Binary {
            bytes_per: header.bytes_per_sample(),
        },
    };
    Rows {
        reader,
        codec,
        width: header.width(),
        values_per_row: header.values_per_row(),
        height: header.height(),
        next_row: 0,
        failed: false,
        _samples: PhantomData,
    }
}

/// Reads one complete image: header, rows, and exhaustive validation.
///
/// # Errors
///
/// Any header error from [`read_header`], any row error from [`read_rows`], or a
/// validation error from [`Image::new`].
pub fn read_image<S: Sample>(reader: &mut impl BufRead) -> Result<Image<S>, Error> {
    let header = read_header(reader)?;
    let rows = read_rows(reader, &header).collect::<Result<Vec<_>, _>>()?;
    Image::new(header, rows)
}
