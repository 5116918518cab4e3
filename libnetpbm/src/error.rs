use crate::image::ImageType;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libnetpbm` errors
pub enum Error {
    /// Error returned when the underlying stream fails outside the Netpbm grammar
    #[error("i/o failure on the underlying stream")]
    Io(#[from] std::io::Error),
    /// Error returned when the first two bytes are not a `P<digit>` Netpbm signature
    #[error("magic bytes {found:?} are not a Netpbm signature")]
    BadMagic {
        /// the offending byte(s), as far as they were read
        found: Vec<u8>,
    },
    /// Error returned when a header is structurally invalid: a required field is
    /// missing or unparseable, the PAM terminator is absent, or the tuple type
    /// disagrees with `DEPTH`
    #[error("malformed header: {reason}")]
    MalformedHeader {
        /// what was wrong with the header
        reason: String,
    },
    /// Error returned when a numeric token contains a non-digit byte or exceeds the
    /// representable range of the chosen sample width
    #[error("malformed number {token:?}")]
    MalformedNumber {
        /// the offending token
        token: String,
    },
    /// Error returned when the stream ends before a required token or byte count is
    /// satisfied
    #[error("truncated input while reading {context}")]
    TruncatedInput {
        /// what was being read when the stream ran out
        context: &'static str,
    },
    /// Error returned when a decoded value exceeds the header's declared maximum
    #[error(
        "row {row}, pixel {pixel}, component {component}: value {value} is outside [0, {max_value}]"
    )]
    ComponentOutOfRange {
        /// zero-based row index
        row: usize,
        /// zero-based pixel index within the row
        pixel: usize,
        /// zero-based component index within the pixel
        component: usize,
        /// the offending value
        value: String,
        /// the header's declared maximum
        max_value: String,
    },
    /// Error returned when a row's length, or the image's row count, does not match
    /// the header
    #[error("dimension mismatch: {context} (expected {expected}, found {actual})")]
    DimensionMismatch {
        /// which dimension disagreed
        context: String,
        /// the count the header requires
        expected: usize,
        /// the count actually present
        actual: usize,
    },
    /// Error returned when the requested target dialect cannot represent the image's
    /// channel layout or numeric width
    #[error("image cannot be encoded as {requested}")]
    UnsupportedConversion {
        /// the rejected target dialect
        requested: ImageType,
    },
}
