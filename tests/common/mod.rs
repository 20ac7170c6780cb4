// SPDX-License-Identifier: MPL-2.0
//! JPEG fixture builders shared by the integration tests and, through
//! `src/test_utils.rs`, by the unit tests.
//!
//! Images are encoded in memory with the `image` crate and carry a real APP1
//! EXIF segment written by `kamadak-exif`, so no binary fixtures are needed.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// GPS values to embed in a fixture. Rationals are (numerator, denominator).
#[derive(Debug, Clone)]
pub struct GpsFixture {
    pub latitude_ref: &'static str,
    pub latitude: [(u32, u32); 3],
    pub longitude_ref: &'static str,
    pub longitude: [(u32, u32); 3],
    pub altitude: Option<(u32, u32)>,
}

impl GpsFixture {
    /// 40°15'30" N, 75°0'0" W, 120.0 m
    pub fn sample() -> Self {
        Self {
            latitude_ref: "N",
            latitude: [(40, 1), (15, 1), (30, 1)],
            longitude_ref: "W",
            longitude: [(75, 1), (0, 1), (0, 1)],
            altitude: Some((1200, 10)),
        }
    }

    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            make_field(),
            ascii(Tag::GPSLatitudeRef, self.latitude_ref),
            rationals(Tag::GPSLatitude, &self.latitude),
            ascii(Tag::GPSLongitudeRef, self.longitude_ref),
            rationals(Tag::GPSLongitude, &self.longitude),
        ];
        if let Some(altitude) = self.altitude {
            fields.push(rationals(Tag::GPSAltitude, &[altitude]));
        }
        fields
    }
}

/// EXIF fields for a photo taken at the given position.
pub fn gps_fields(
    latitude_ref: &'static str,
    latitude: [(u32, u32); 3],
    longitude_ref: &'static str,
    longitude: [(u32, u32); 3],
    altitude: (u32, u32),
) -> Vec<Field> {
    GpsFixture {
        latitude_ref,
        latitude,
        longitude_ref,
        longitude,
        altitude: Some(altitude),
    }
    .fields()
}

/// Camera make field, so fixtures always carry a non-GPS tag too.
pub fn make_field() -> Field {
    ascii(Tag::Make, "DJI")
}

/// EXIF fields without any GPS group.
pub fn camera_only_fields() -> Vec<Field> {
    vec![make_field(), ascii(Tag::Model, "FC3582")]
}

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

fn rationals(tag: Tag, values: &[(u32, u32)]) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(
            values
                .iter()
                .map(|&(num, denom)| exif::Rational { num, denom })
                .collect(),
        ),
    }
}

/// Encodes a tiny JPEG with no metadata segment.
pub fn plain_jpeg() -> Vec<u8> {
    let image = image_rs::RgbImage::from_pixel(8, 8, image_rs::Rgb([90, 120, 60]));
    let mut cursor = Cursor::new(Vec::new());
    image_rs::DynamicImage::ImageRgb8(image)
        .write_to(&mut cursor, image_rs::ImageFormat::Jpeg)
        .expect("failed to encode jpeg");
    cursor.into_inner()
}

/// Just the PNG signature and an empty IHDR chunk header.
pub fn png_header() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0, 0, 0, 13]);
    bytes.extend_from_slice(b"IHDR");
    bytes
}

/// Encodes a tiny JPEG with an APP1 EXIF segment holding `fields`.
pub fn jpeg_with_exif(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer
        .write(&mut tiff, false)
        .expect("failed to write tiff block");
    let tiff = tiff.into_inner();

    let jpeg = plain_jpeg();
    let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("exif segment too large");

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Writes `bytes` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("failed to write test file");
    path
}
