use libnetpbm::{Component, Error, Header, Image, ImageType};

mod common;
use common::image;

fn gray_header(width: usize, height: usize) -> Header<u8> {
    Header::builder()
        .image_type(ImageType::Pgm)
        .width(width)
        .height(height)
        .components(vec![Component::White])
        .max_value(255u8)
        .build()
        .unwrap()
}

#[test]
fn header_rejects_zero_dimensions() {
    let err = Header::builder()
        .image_type(ImageType::Pgm)
        .width(0)
        .height(1)
        .components(vec![Component::White])
        .max_value(255u8)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));

    let err = Header::builder()
        .image_type(ImageType::Pgm)
        .width(1)
        .height(0)
        .components(vec![Component::White])
        .max_value(255u8)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));
}

#[test]
fn header_rejects_empty_component_list() {
    let err = Header::builder()
        .image_type(ImageType::Pam)
        .width(1)
        .height(1)
        .components(Vec::new())
        .max_value(255u8)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));
}

#[test]
fn header_derives_the_minimal_byte_width() {
    assert_eq!(gray_header(1, 1).bytes_per_sample(), 1);

    let wide = Header::builder()
        .image_type(ImageType::Pgm)
        .width(1)
        .height(1)
        .components(vec![Component::White])
        .max_value(1000u16)
        .build()
        .unwrap();
    assert_eq!(wide.bytes_per_sample(), 2);
}

#[test]
fn image_rejects_wrong_row_count() {
    let err = Image::new(gray_header(2, 2), vec![vec![0, 1]]).unwrap_err();
    match err {
        Error::DimensionMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[test]
fn image_rejects_wrong_row_length() {
    let err = Image::new(gray_header(2, 2), vec![vec![0, 1], vec![2]]).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
}

#[test]
fn image_rejects_out_of_range_values() {
    let header = Header::builder()
        .image_type(ImageType::Pgm)
        .width(2)
        .height(1)
        .components(vec![Component::White])
        .max_value(100u8)
        .build()
        .unwrap();
    let err = Image::new(header, vec![vec![50, 101]]).unwrap_err();
    match err {
        Error::ComponentOutOfRange {
            row,
            pixel,
            value,
            max_value,
            ..
        } => {
            assert_eq!(row, 0);
            assert_eq!(pixel, 1);
            assert_eq!(value, "101");
            assert_eq!(max_value, "100");
        }
        other => panic!("expected ComponentOutOfRange, got {other:?}"),
    }
}

#[test]
fn pixel_accessors_check_bounds() {
    let rgb = image(
        ImageType::Ppm,
        2,
        1,
        vec![Component::Red, Component::Green, Component::Blue],
        255u8,
        vec![vec![1, 2, 3, 4, 5, 6]],
    );
    assert_eq!(rgb.native_pixel(1, 0), Some(&[4u8, 5, 6][..]));
    assert_eq!(rgb.native_pixel(2, 0), None);
    assert_eq!(rgb.native_pixel(0, 1), None);
}

#[test]
fn scaled_pixels_lie_in_the_unit_interval() {
    let gray = image(
        ImageType::Pgm,
        2,
        1,
        vec![Component::White],
        200u8,
        vec![vec![0, 150]],
    );
    assert_eq!(gray.scaled_pixel(0, 0), Some(vec![0.0]));
    assert_eq!(gray.scaled_pixel(1, 0), Some(vec![0.75]));
}

#[test]
fn bitmap_predicate_tracks_the_maximum() {
    let bitmap = Header::builder()
        .image_type(ImageType::Pbm)
        .width(1)
        .height(1)
        .components(vec![Component::Black])
        .max_value(1u8)
        .build()
        .unwrap();
    assert!(bitmap.is_bitmap());
    assert!(!gray_header(1, 1).is_bitmap());
}
