#![allow(dead_code)]

use libnetpbm::{Component, Header, Image, ImageType, Sample};

/// Builds a validated image for test scenarios.
pub fn image<S: Sample>(
    image_type: ImageType,
    width: usize,
    height: usize,
    components: Vec<Component>,
    max_value: S,
    rows: Vec<Vec<S>>,
) -> Image<S> {
    let header = Header::builder()
        .image_type(image_type)
        .width(width)
        .height(height)
        .components(components)
        .max_value(max_value)
        .build()
        .expect("valid test header");
    Image::new(header, rows).expect("valid test image")
}

/// Decodes one image from an in-memory byte string.
pub fn decode<S: Sample>(bytes: &[u8]) -> Image<S> {
    Image::from_reader(&mut &bytes[..]).expect("decodable test image")
}

/// Encodes an image into a byte buffer.
pub fn encode<S: Sample>(image: &Image<S>, target: ImageType) -> Vec<u8> {
    let mut out = Vec::new();
    image
        .write_to(&mut out, target)
        .expect("encodable test image");
    out
}

/// Asserts that two images hold the same logical content, ignoring the dialect they
/// were read from or built for.
pub fn assert_same_content<S: Sample>(left: &Image<S>, right: &Image<S>) {
    assert_eq!(left.header().width(), right.header().width());
    assert_eq!(left.header().height(), right.header().height());
    assert_eq!(left.header().components(), right.header().components());
    assert_eq!(left.header().max_value(), right.header().max_value());
    assert_eq!(left.rows(), right.rows());
}
