//! # libnetpbm
//!
//! This library provides datatypes and i/o functionality for the Netpbm family of image
//! formats: PBM, PGM, and PPM (each in its plain-text and binary variant), PAM, and the
//! unofficial "Big PAM" extension whose maximum component value is unbounded.
//!
//! All seven header dialects are decoded by one streaming [`read_header`]/[`read_rows`]
//! pair; the writer is its structural mirror, so anything this crate emits can be read
//! back by this crate. Pixel components are generic over four numeric widths (`u8`,
//! `u16`, `u32`, and [`num_bigint::BigUint`]) via the [`Sample`] trait; the last of
//! these exists because Big PAM files may declare maxima that fit in no fixed-width
//! integer.
//!
//! ### Reading and re-encoding
//!
//! ```rust
//! use libnetpbm::{Image, ImageType};
//!
//! let plain = b"P2\n# tiny ramp\n2 2\n255\n0 85 170 255\n";
//! let image: Image<u8> = Image::from_reader(&mut &plain[..])?;
//! assert_eq!(image.header().image_type(), ImageType::PlainPgm);
//! assert_eq!(image.native_pixel(1, 1), Some(&[255u8][..]));
//!
//! let mut out = Vec::new();
//! image.write_to(&mut out, ImageType::Pgm)?;
//! assert!(out.starts_with(b"P5\n2 2\n255\n"));
//! # Ok::<(), libnetpbm::Error>(())
//! ```
//!
//! ### Normalizing channel semantics
//!
//! Images carry a list of [`Component`]s naming what each numeric slot of a pixel
//! means. The [`canonicalize`] operation reorders recognized channel sets into a fixed
//! canonical order and can flip grayscale polarity between additive
//! ([`Component::White`]) and subtractive ([`Component::Black`]) form:
//!
//! ```rust
//! use libnetpbm::{canonicalize, Component, GrayscaleConversion, Image};
//!
//! let pbm = b"P1\n2 1\n0 1\n";
//! let bitmap: Image<u8> = Image::from_reader(&mut &pbm[..])?;
//! assert_eq!(bitmap.header().components(), [Component::Black]);
//!
//! let additive = canonicalize(bitmap, GrayscaleConversion::BlackToWhite);
//! assert_eq!(additive.header().components(), [Component::White]);
//! assert_eq!(additive.rows()[0], [1, 0]);
//! # Ok::<(), libnetpbm::Error>(())
//! ```
//!
//! ### Streams, not files
//!
//! The reader consumes exactly the bytes belonging to one image and leaves the stream
//! positioned immediately after it, so repeated calls on the same reader decode a
//! sequence of concatenated images. Row decoding is lazy: [`read_rows`] yields one row
//! per iteration, which keeps peak memory at a single row for callers that stream rows
//! straight into [`write_row`]. The caller owns the stream; this crate never closes it.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod canonical;
mod error;
/// Module containing the Netpbm data model: headers, images, components, dialects
pub mod image;
mod reader;
mod sample;
mod writer;

pub use canonical::{canonicalize, GrayscaleConversion};
pub use error::Error;
pub use image::{Component, Header, Image, ImageType};
pub use reader::{read_header, read_image, read_rows, Rows};
pub use sample::Sample;
pub use writer::{supported_types, write_header, write_image, write_row, write_rows};

// Netpbm treats exactly these six bytes as token separators.
pub(crate) const WHITESPACE: &[u8] = b" \r\n\t\x0B\x0C";
