use std::fmt::{Debug, Display};
use std::io::{BufRead, ErrorKind};

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::Error;

/// A single pixel-component value.
///
/// The same header/image/reader/writer logic is parameterized over this trait; only
/// the codec differs per width. Four widths are provided: `u8`, `u16`, `u32`, and
/// [`BigUint`]. PAM caps maxima at 65535, so `u16` covers every official dialect;
/// Big PAM maxima can exceed any fixed width, which is what [`BigUint`] is for.
pub trait Sample: Clone + Eq + Ord + Debug + Display + Sized {
    /// Parses an unsigned decimal token.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedNumber`] if the token contains a non-digit byte or its
    /// magnitude does not fit this width.
    fn parse(token: &str) -> Result<Self, Error>;

    /// The minimal big-endian byte width able to hold `max` (1, 2, or 4 for the
    /// fixed widths; the byte length of the magnitude for [`BigUint`]).
    fn bytes_for(max: &Self) -> usize;

    /// The additive identity, decoded from a 0 bit in packed bitmap rows.
    fn zero() -> Self;

    /// The bitmap-on value, decoded from a 1 bit in packed bitmap rows.
    fn one() -> Self;

    /// Decodes one value from a big-endian buffer of `bytes_for` length.
    fn from_be_slice(buf: &[u8]) -> Self;

    /// Appends exactly `bytes_per` big-endian bytes encoding `self` to `out`.
    fn write_be(&self, bytes_per: usize, out: &mut Vec<u8>);

    /// `max - self`. Cannot underflow for values of a validated image, where
    /// `self <= max` always holds.
    #[must_use]
    fn invert(&self, max: &Self) -> Self;

    /// Scales `self` into `[0.0, 1.0]` against `max`.
    fn scale(&self, max: &Self) -> f64;

    /// Whether this is the additive identity.
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Reads `count` fixed-width big-endian values of `bytes_per` bytes each.
    ///
    /// # Errors
    ///
    /// [`Error::TruncatedInput`] if the stream ends early, [`Error::Io`] on any
    /// other stream failure.
    fn read_row<R: BufRead>(reader: &mut R, count: usize, bytes_per: usize) -> Result<Vec<Self>, Error> {
        let mut buf = vec![0u8; bytes_per];
        let mut row = Vec::with_capacity(count);
        for _ in 0..count {
            read_exact_or_truncated(reader, &mut buf)?;
            row.push(Self::from_be_slice(&buf));
        }
        Ok(row)
    }
}

/// `read_exact`, with end-of-stream reported as [`Error::TruncatedInput`].
pub(crate) fn read_exact_or_truncated(reader: &mut impl BufRead, buf: &mut [u8]) -> Result<(), Error> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            Error::TruncatedInput {
                context: "pixel data",
            }
        } else {
            Error::Io(e)
        }
    })
}

fn ensure_digits(token: &str) -> Result<(), Error> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedNumber {
            token: token.to_owned(),
        });
    }
    Ok(())
}

impl Sample for u8 {
    fn parse(token: &str) -> Result<Self, Error> {
        ensure_digits(token)?;
        token.parse().map_err(|_| Error::MalformedNumber {
            token: token.to_owned(),
        })
    }

    fn bytes_for(_max: &Self) -> usize {
        1
    }

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_be_slice(buf: &[u8]) -> Self {
        buf[0]
    }

    fn write_be(&self, _bytes_per: usize, out: &mut Vec<u8>) {
        out.push(*self);
    }

    fn invert(&self, max: &Self) -> Self {
        max - self
    }

    fn scale(&self, max: &Self) -> f64 {
        f64::from(*self) / f64::from(*max)
    }

    // Single-byte samples can be read as one contiguous block.
    fn read_row<R: BufRead>(reader: &mut R, count: usize, _bytes_per: usize) -> Result<Vec<Self>, Error> {
        let mut row = vec![0u8; count];
        read_exact_or_truncated(reader, &mut row)?;
        Ok(row)
    }
}

impl Sample for u16 {
    fn parse(token: &str) -> Result<Self, Error> {
        ensure_digits(token)?;
        token.parse().map_err(|_| Error::MalformedNumber {
            token: token.to_owned(),
        })
    }

    fn bytes_for(max: &Self) -> usize {
        if *max > 0xFF {
            2
        } else {
            1
        }
    }

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_be_slice(buf: &[u8]) -> Self {
        buf.iter().fold(0, |acc, &b| (acc << 8) | Self::from(b))
    }

    fn write_be(&self, bytes_per: usize, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes()[2 - bytes_per..]);
    }

    fn invert(&self, max: &Self) -> Self {
        max - self
    }

    fn scale(&self, max: &Self) -> f64 {
        f64::from(*self) / f64::from(*max)
    }
}

impl Sample for u32 {
    fn parse(token: &str) -> Result<Self, Error> {
        ensure_digits(token)?;
        token.parse().map_err(|_| Error::MalformedNumber {
            token: token.to_owned(),
        })
    }

    fn bytes_for(max: &Self) -> usize {
        match *max {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            _ => 4,
        }
    }

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_be_slice(buf: &[u8]) -> Self {
        buf.iter().fold(0, |acc, &b| (acc << 8) | Self::from(b))
    }

    fn write_be(&self, bytes_per: usize, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes()[4 - bytes_per..]);
    }

    fn invert(&self, max: &Self) -> Self {
        max - self
    }

    fn scale(&self, max: &Self) -> f64 {
        f64::from(*self) / f64::from(*max)
    }
}

impl Sample for BigUint {
    fn parse(token: &str) -> Result<Self, Error> {
        ensure_digits(token)?;
        Self::parse_bytes(token.as_bytes(), 10).ok_or_else(|| Error::MalformedNumber {
            token: token.to_owned(),
        })
    }

    fn bytes_for(max: &Self) -> usize {
        // to_bytes_be renders zero as a single 0x00 byte, so the minimum width of 1
        // comes for free
        max.to_bytes_be().len()
    }

    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn from_be_slice(buf: &[u8]) -> Self {
        Self::from_bytes_be(buf)
    }

    fn write_be(&self, bytes_per: usize, out: &mut Vec<u8>) {
        let bytes = self.to_bytes_be();
        // left-pad with zeroes up to the fixed width
        out.resize(out.len() + bytes_per - bytes.len(), 0);
        out.extend_from_slice(&bytes);
    }

    fn invert(&self, max: &Self) -> Self {
        max - self
    }

    fn scale(&self, max: &Self) -> f64 {
        self.to_f64().unwrap_or(f64::INFINITY) / max.to_f64().unwrap_or(f64::INFINITY)
    }
}
