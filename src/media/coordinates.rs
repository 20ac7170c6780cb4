// SPDX-License-Identifier: MPL-2.0
//! Coordinate transformer.
//!
//! Turns the GPS group of a [`TagDictionary`] into a [`CoordinateRecord`]:
//! signed decimal degrees, DMS display strings and altitude in meters and feet.
//!
//! A missing GPS group is a normal outcome ([`GpsOutcome::NoGps`]); a group that
//! is present but shaped unexpectedly is reported as [`GpsOutcome::Malformed`].
//! Neither is an error: the caller skips the image and moves on.

use crate::domain::metadata::{
    gps_index, Altitude, Coordinate, CoordinateRecord, GpsBlock, Hemisphere, TagDictionary,
    TagValue,
};
use std::fmt;

/// Result of transforming one image's tags.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsOutcome {
    Located(CoordinateRecord),
    /// The image carries no GPS group at all
    NoGps,
    Malformed(MalformedGps),
}

/// Why a present GPS group could not be turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedGps {
    /// The GPS tag exists but is not a nested group
    NotAGroup,
    /// A required index is absent
    MissingField(u16),
    /// A field is present but has the wrong value shape
    WrongShape(u16),
    /// A hemisphere reference outside {N,S} or {E,W}
    InvalidReference { index: u16, value: char },
    /// A negative, `NaN` or infinite numeric component
    InvalidNumber { index: u16, value: f64 },
}

impl fmt::Display for MalformedGps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedGps::NotAGroup => write!(f, "GPS tag is not a nested group"),
            MalformedGps::MissingField(index) => write!(f, "GPS field {} is missing", index),
            MalformedGps::WrongShape(index) => {
                write!(f, "GPS field {} has an unexpected value type", index)
            }
            MalformedGps::InvalidReference { index, value } => {
                write!(f, "GPS field {} has invalid reference '{}'", index, value)
            }
            MalformedGps::InvalidNumber { index, value } => {
                write!(f, "GPS field {} has invalid value {}", index, value)
            }
        }
    }
}

/// Converts degrees, minutes and seconds to decimal degrees.
///
/// Minutes and seconds are not renormalized; values of 60 or more are used
/// as they are.
#[must_use]
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + (minutes + seconds / 60.0) / 60.0
}

/// Derives the normalized record for `file_name` from its tag dictionary.
#[must_use]
pub fn transform(file_name: &str, tags: &TagDictionary) -> GpsOutcome {
    let Some(gps) = tags.gps() else {
        return GpsOutcome::NoGps;
    };
    let Some(block) = gps.as_group() else {
        return GpsOutcome::Malformed(MalformedGps::NotAGroup);
    };

    match locate(file_name, block) {
        Ok(record) => GpsOutcome::Located(record),
        Err(reason) => GpsOutcome::Malformed(reason),
    }
}

fn locate(file_name: &str, block: GpsBlock<'_>) -> Result<CoordinateRecord, MalformedGps> {
    let latitude = coordinate(
        block,
        gps_index::LATITUDE_REF,
        gps_index::LATITUDE,
        Hemisphere::latitude,
    )?;
    let longitude = coordinate(
        block,
        gps_index::LONGITUDE_REF,
        gps_index::LONGITUDE,
        Hemisphere::longitude,
    )?;
    let altitude = altitude(block)?;

    Ok(CoordinateRecord::new(
        file_name, &latitude, &longitude, altitude,
    ))
}

fn required(block: GpsBlock<'_>, index: u16) -> Result<&TagValue, MalformedGps> {
    block.get(index).ok_or(MalformedGps::MissingField(index))
}

fn coordinate(
    block: GpsBlock<'_>,
    reference_index: u16,
    dms_index: u16,
    parse_reference: fn(char) -> Option<Hemisphere>,
) -> Result<Coordinate, MalformedGps> {
    let reference = required(block, reference_index)?
        .as_char()
        .ok_or(MalformedGps::WrongShape(reference_index))?;
    let hemisphere = parse_reference(reference).ok_or(MalformedGps::InvalidReference {
        index: reference_index,
        value: reference,
    })?;

    let dms = required(block, dms_index)?
        .as_rationals()
        .filter(|values| values.len() >= 3)
        .ok_or(MalformedGps::WrongShape(dms_index))?;
    let degrees = magnitude(dms_index, dms[0].to_f64())?;
    let minutes = magnitude(dms_index, dms[1].to_f64())?;
    let seconds = magnitude(dms_index, dms[2].to_f64())?;

    let decimal = dms_to_decimal(degrees, minutes, seconds);
    let sign = if hemisphere.is_negative() { -1.0 } else { 1.0 };

    Ok(Coordinate {
        degrees: degrees * sign,
        minutes,
        seconds,
        decimal: decimal * sign,
        hemisphere,
    })
}

fn magnitude(index: u16, value: f64) -> Result<f64, MalformedGps> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MalformedGps::InvalidNumber { index, value })
    }
}

fn altitude(block: GpsBlock<'_>) -> Result<Altitude, MalformedGps> {
    let meters = required(block, gps_index::ALTITUDE)?
        .as_real()
        .ok_or(MalformedGps::WrongShape(gps_index::ALTITUDE))?;
    if !meters.is_finite() {
        return Err(MalformedGps::InvalidNumber {
            index: gps_index::ALTITUDE,
            value: meters,
        });
    }
    Ok(Altitude::from_meters(meters))
}
