// SPDX-License-Identifier: MPL-2.0
//! Tag dictionary model.
//!
//! Embedded metadata is a heterogeneous mapping: a tag can hold text, a single
//! character, integers, rationals or (for the GPS group) a nested mapping keyed
//! by numeric indices. [`TagValue`] makes every shape an explicit variant so that
//! consumers match on it instead of guessing.

use std::collections::BTreeMap;
use std::fmt;

/// Name under which the GPS sub-block is stored in a [`TagDictionary`].
pub const GPS_GROUP: &str = "GPSInfo";

/// Fixed numeric indices inside the GPS sub-block.
pub mod gps_index {
    /// Latitude hemisphere reference ('N' / 'S')
    pub const LATITUDE_REF: u16 = 1;
    /// Latitude as (degrees, minutes, seconds)
    pub const LATITUDE: u16 = 2;
    /// Longitude hemisphere reference ('E' / 'W')
    pub const LONGITUDE_REF: u16 = 3;
    /// Longitude as (degrees, minutes, seconds)
    pub const LONGITUDE: u16 = 4;
    /// Altitude above the reference level, in meters
    pub const ALTITUDE: u16 = 6;
}

// =============================================================================
// Rational
// =============================================================================

/// A numerator/denominator pair as stored by the metadata format.
///
/// Signed so that both unsigned and signed rational tags fit; the denominator
/// is kept as-is, which means a zero denominator yields a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: i64,
    pub denom: i64,
}

impl Rational {
    #[must_use]
    pub fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }

    /// Converts to a float; `NaN` or infinite when the denominator is zero.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl From<(u32, u32)> for Rational {
    fn from((num, denom): (u32, u32)) -> Self {
        Self::new(i64::from(num), i64::from(denom))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

// =============================================================================
// TagKey / TagValue
// =============================================================================

/// Identifier of a tag: its standard name when one exists, otherwise the raw
/// numeric identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagKey {
    Name(String),
    Id(u16),
}

impl From<&str> for TagKey {
    fn from(name: &str) -> Self {
        TagKey::Name(name.to_string())
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKey::Name(name) => write!(f, "{name}"),
            TagKey::Id(id) => write!(f, "{id}"),
        }
    }
}

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Single-character ASCII value (e.g. a hemisphere reference)
    Char(char),
    Text(String),
    Integer(i64),
    Integers(Vec<i64>),
    Rational(Rational),
    /// Tuple of rationals (e.g. degrees, minutes, seconds)
    Rationals(Vec<Rational>),
    Real(f64),
    Reals(Vec<f64>),
    /// Opaque bytes for undefined or unknown value types
    Undefined(Vec<u8>),
    /// Nested mapping keyed by numeric index (the GPS group)
    Group(BTreeMap<u16, TagValue>),
}

impl TagValue {
    /// Returns the value as one character, accepting single-character text.
    pub fn as_char(&self) -> Option<char> {
        match self {
            TagValue::Char(c) => Some(*c),
            TagValue::Text(text) => {
                let mut chars = text.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Returns the value as a rational tuple; a lone rational is a one-element tuple.
    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            TagValue::Rationals(values) => Some(values),
            TagValue::Rational(value) => Some(std::slice::from_ref(value)),
            _ => None,
        }
    }

    /// Returns a single numeric value as a float.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            TagValue::Rational(value) => Some(value.to_f64()),
            TagValue::Rationals(values) => values.first().map(|value| value.to_f64()),
            TagValue::Integer(value) => Some(*value as f64),
            TagValue::Real(value) => Some(*value),
            TagValue::Reals(values) => values.first().copied(),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<GpsBlock<'_>> {
        match self {
            TagValue::Group(entries) => Some(GpsBlock(entries)),
            _ => None,
        }
    }
}

// =============================================================================
// TagDictionary
// =============================================================================

/// All tags decoded from one image's primary directory.
///
/// Read-only once produced by the metadata reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDictionary {
    entries: BTreeMap<TagKey, TagValue>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: TagKey, value: TagValue) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &TagKey) -> Option<&TagValue> {
        self.entries.get(key)
    }

    /// Looks up a tag by its standard name.
    pub fn get_named(&self, name: &str) -> Option<&TagValue> {
        self.entries.get(&TagKey::from(name))
    }

    /// Returns the raw GPS group entry, whatever its shape.
    ///
    /// `None` means the image has no GPS fix, which is a normal outcome.
    pub fn gps(&self) -> Option<&TagValue> {
        self.get_named(GPS_GROUP)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagKey, &TagValue)> {
        self.entries.iter()
    }
}

impl FromIterator<(TagKey, TagValue)> for TagDictionary {
    fn from_iter<I: IntoIterator<Item = (TagKey, TagValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// GpsBlock
// =============================================================================

/// Borrowed view of the GPS sub-block, keyed by the indices in [`gps_index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsBlock<'a>(&'a BTreeMap<u16, TagValue>);

impl<'a> GpsBlock<'a> {
    pub fn get(&self, index: u16) -> Option<&'a TagValue> {
        self.0.get(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
