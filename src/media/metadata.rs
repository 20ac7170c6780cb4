// SPDX-License-Identifier: MPL-2.0
//! Metadata reader for JPEG images (EXIF).
//!
//! Opens an image, confirms it is a JPEG container, decodes its embedded EXIF
//! segment and flattens the primary directory into a [`TagDictionary`]. GPS
//! fields are gathered into a nested group stored under [`GPS_GROUP`], keyed by
//! their numeric tag index.

use crate::domain::metadata::{Rational, TagDictionary, TagKey, TagValue, GPS_GROUP};
use crate::error::{ImageError, Result};
use image_rs::{ImageFormat, ImageReader};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An image file that has been opened and identified as a JPEG.
///
/// Holds no open file handle between calls; every read reopens the file.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    path: PathBuf,
    file_name: String,
}

impl ImageHandle {
    /// Opens `path` and checks its magic bytes for a JPEG container.
    ///
    /// # Errors
    /// Returns [`ImageError::Unreadable`] if the file cannot be opened or its
    /// content is not a JPEG, regardless of the file extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ImageError::Unreadable(format!("cannot open '{}': {}", path.display(), e))
        })?;
        let reader = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|e| {
                ImageError::Unreadable(format!("cannot read '{}': {}", path.display(), e))
            })?;

        match reader.format() {
            Some(ImageFormat::Jpeg) => {}
            Some(other) => {
                return Err(ImageError::Unreadable(format!(
                    "'{}' is a {:?} image, not JPEG",
                    path.display(),
                    other
                ))
                .into());
            }
            None => {
                return Err(ImageError::Unreadable(format!(
                    "'{}' is not a recognized image",
                    path.display()
                ))
                .into());
            }
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the file, as written to the output table.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Decodes the embedded EXIF segment into a tag dictionary.
    ///
    /// # Errors
    /// - [`ImageError::NoMetadata`] if the JPEG has no EXIF segment at all
    /// - [`ImageError::Unreadable`] if the file or its EXIF block cannot be parsed
    pub fn read_tags(&self) -> Result<TagDictionary> {
        let file = File::open(&self.path).map_err(|e| {
            ImageError::Unreadable(format!("cannot open '{}': {}", self.path.display(), e))
        })?;
        let mut reader = BufReader::new(file);

        let exif = match exif::Reader::new()
            .continue_on_error(true)
            .read_from_container(&mut reader)
        {
            Ok(exif) => exif,
            Err(exif::Error::PartialResult(partial)) => {
                let (exif, errors) = partial.into_inner();
                for error in &errors {
                    warn!(file = %self.file_name, %error, "ignoring damaged metadata entry");
                }
                exif
            }
            Err(exif::Error::NotFound(_)) => return Err(ImageError::NoMetadata.into()),
            Err(e) => {
                return Err(ImageError::Unreadable(format!(
                    "invalid metadata in '{}': {}",
                    self.path.display(),
                    e
                ))
                .into());
            }
        };

        let tags = build_dictionary(&exif);
        debug!(file = %self.file_name, tags = tags.len(), "decoded metadata");
        Ok(tags)
    }
}

/// Opens an image and decodes its tag dictionary in one step.
pub fn read_tags<P: AsRef<Path>>(path: P) -> Result<TagDictionary> {
    ImageHandle::open(path)?.read_tags()
}

/// Flattens the primary directory. Thumbnail directory fields are ignored.
fn build_dictionary(exif: &exif::Exif) -> TagDictionary {
    let mut tags = TagDictionary::new();
    let mut gps = BTreeMap::new();

    for field in exif.fields().filter(|field| field.ifd_num == exif::In::PRIMARY) {
        if is_directory_pointer(field.tag) {
            continue;
        }
        let value = convert_value(&field.value);
        if matches!(field.tag.context(), exif::Context::Gps) {
            gps.insert(field.tag.number(), value);
        } else {
            tags.insert(tag_key(field.tag), value);
        }
    }

    if !gps.is_empty() {
        tags.insert(TagKey::from(GPS_GROUP), TagValue::Group(gps));
    }
    tags
}

fn is_directory_pointer(tag: exif::Tag) -> bool {
    tag == exif::Tag::ExifIFDPointer
        || tag == exif::Tag::GPSInfoIFDPointer
        || tag == exif::Tag::InteropIFDPointer
}

/// Standard name when the tag is known, raw number otherwise.
fn tag_key(tag: exif::Tag) -> TagKey {
    if tag.description().is_some() {
        TagKey::Name(tag.to_string())
    } else {
        TagKey::Id(tag.number())
    }
}

fn convert_value(value: &exif::Value) -> TagValue {
    match value {
        exif::Value::Ascii(strings) => ascii_value(strings),
        exif::Value::Byte(v) => integers(v.iter().map(|&x| i64::from(x))),
        exif::Value::Short(v) => integers(v.iter().map(|&x| i64::from(x))),
        exif::Value::Long(v) => integers(v.iter().map(|&x| i64::from(x))),
        exif::Value::SByte(v) => integers(v.iter().map(|&x| i64::from(x))),
        exif::Value::SShort(v) => integers(v.iter().map(|&x| i64::from(x))),
        exif::Value::SLong(v) => integers(v.iter().map(|&x| i64::from(x))),
        exif::Value::Rational(v) => rationals(
            v.iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom))),
        ),
        exif::Value::SRational(v) => rationals(
            v.iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom))),
        ),
        exif::Value::Float(v) => reals(v.iter().map(|&x| f64::from(x))),
        exif::Value::Double(v) => reals(v.iter().copied()),
        exif::Value::Undefined(bytes, _) => TagValue::Undefined(bytes.clone()),
        _ => TagValue::Undefined(Vec::new()),
    }
}

fn ascii_value(strings: &[Vec<u8>]) -> TagValue {
    let text = strings
        .iter()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => TagValue::Char(c),
        _ => TagValue::Text(text),
    }
}

fn integers(values: impl Iterator<Item = i64>) -> TagValue {
    let mut values: Vec<i64> = values.collect();
    if values.len() == 1 {
        TagValue::Integer(values.remove(0))
    } else {
        TagValue::Integers(values)
    }
}

fn rationals(values: impl Iterator<Item = Rational>) -> TagValue {
    let mut values: Vec<Rational> = values.collect();
    if values.len() == 1 {
        TagValue::Rational(values.remove(0))
    } else {
        TagValue::Rationals(values)
    }
}

fn reals(values: impl Iterator<Item = f64>) -> TagValue {
    let mut values: Vec<f64> = values.collect();
    if values.len() == 1 {
        TagValue::Real(values.remove(0))
    } else {
        TagValue::Reals(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::gps_index;
    use crate::error::Error;
    use crate::test_utils::{
        jpeg_with_exif, make_field, plain_jpeg, png_header, write_file, GpsFixture,
    };
    use tempfile::tempdir;

    #[test]
    fn read_tags_handles_missing_file() {
        let result = read_tags("/nonexistent/path/image.jpg");
        assert!(matches!(
            result,
            Err(Error::Image(ImageError::Unreadable(_)))
        ));
    }

    #[test]
    fn open_rejects_text_named_as_jpeg() {
        let temp_dir = tempdir().expect("temp dir");
        let path = write_file(temp_dir.path(), "fake.jpg", b"not an image");

        let result = ImageHandle::open(&path);
        assert!(matches!(
            result,
            Err(Error::Image(ImageError::Unreadable(_)))
        ));
    }

    #[test]
    fn open_rejects_png_content() {
        let temp_dir = tempdir().expect("temp dir");
        let path = write_file(temp_dir.path(), "image.jpg", &png_header());

        match ImageHandle::open(&path) {
            Err(Error::Image(ImageError::Unreadable(msg))) => assert!(msg.contains("not JPEG")),
            other => panic!("expected unreadable image, got {other:?}"),
        }
    }

    #[test]
    fn plain_jpeg_reports_no_metadata() {
        let temp_dir = tempdir().expect("temp dir");
        let path = write_file(temp_dir.path(), "plain.jpg", &plain_jpeg());

        let handle = ImageHandle::open(&path).expect("jpeg should open");
        assert_eq!(handle.file_name(), "plain.jpg");
        assert!(matches!(
            handle.read_tags(),
            Err(Error::Image(ImageError::NoMetadata))
        ));
    }

    #[test]
    fn gps_fields_are_grouped_by_index() {
        let temp_dir = tempdir().expect("temp dir");
        let fixture = GpsFixture::sample();
        let path = write_file(
            temp_dir.path(),
            "DJI_0001.JPG",
            &jpeg_with_exif(&fixture.fields()),
        );

        let tags = read_tags(&path).expect("tags should decode");
        assert_eq!(tags.get_named("Make"), Some(&TagValue::Text("DJI".into())));

        let gps = tags.gps().and_then(TagValue::as_group).expect("gps group");
        assert_eq!(gps.get(gps_index::LATITUDE_REF), Some(&TagValue::Char('N')));
        assert_eq!(gps.get(gps_index::LONGITUDE_REF), Some(&TagValue::Char('W')));
        assert_eq!(
            gps.get(gps_index::LATITUDE),
            Some(&TagValue::Rationals(vec![
                Rational::new(40, 1),
                Rational::new(15, 1),
                Rational::new(30, 1),
            ]))
        );
        assert_eq!(
            gps.get(gps_index::ALTITUDE),
            Some(&TagValue::Rational(Rational::new(1200, 10)))
        );
    }

    #[test]
    fn exif_without_gps_has_no_gps_group() {
        let temp_dir = tempdir().expect("temp dir");
        let path = write_file(temp_dir.path(), "nogps.jpg", &jpeg_with_exif(&[make_field()]));

        let tags = read_tags(&path).expect("tags should decode");
        assert!(!tags.is_empty());
        assert!(tags.gps().is_none());
    }

    #[test]
    fn convert_value_maps_shapes() {
        assert_eq!(
            convert_value(&exif::Value::Ascii(vec![b"S".to_vec()])),
            TagValue::Char('S')
        );
        assert_eq!(
            convert_value(&exif::Value::Ascii(vec![b"FC6310".to_vec()])),
            TagValue::Text("FC6310".into())
        );
        assert_eq!(
            convert_value(&exif::Value::Short(vec![3])),
            TagValue::Integer(3)
        );
        assert_eq!(
            convert_value(&exif::Value::Byte(vec![2, 3, 0, 0])),
            TagValue::Integers(vec![2, 3, 0, 0])
        );
        assert_eq!(
            convert_value(&exif::Value::SRational(vec![exif::SRational {
                num: -7,
                denom: 2
            }])),
            TagValue::Rational(Rational::new(-7, 2))
        );
        assert_eq!(
            convert_value(&exif::Value::Double(vec![1.5, 2.5])),
            TagValue::Reals(vec![1.5, 2.5])
        );
    }

    #[test]
    fn unknown_tags_keep_numeric_key() {
        assert_eq!(tag_key(exif::Tag::Make), TagKey::from("Make"));
        assert_eq!(
            tag_key(exif::Tag(exif::Context::Exif, 0xBEEF)),
            TagKey::Id(0xBEEF)
        );
    }
}
