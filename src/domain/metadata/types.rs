// SPDX-License-Identifier: MPL-2.0
//! Coordinate output types.
//!
//! Pure domain types for the normalized per-image record, with no external
//! dependencies.

/// Meters to feet scale factor, fixed so that output stays numerically
/// comparable across runs and tools.
pub const FEET_PER_METER: f64 = 3.28084;

// =============================================================================
// Hemisphere
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parses a latitude reference; only 'N' and 'S' are valid.
    #[must_use]
    pub fn latitude(reference: char) -> Option<Self> {
        match reference {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            _ => None,
        }
    }

    /// Parses a longitude reference; only 'E' and 'W' are valid.
    #[must_use]
    pub fn longitude(reference: char) -> Option<Self> {
        match reference {
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// South and West carry a negative sign in decimal degrees.
    #[must_use]
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

// =============================================================================
// Coordinate
// =============================================================================

/// One angular coordinate with the hemisphere sign already applied.
///
/// The sign lives in `degrees` and `decimal`; `minutes` and `seconds` stay
/// unsigned magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub decimal: f64,
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    /// Formats as `"{degrees} {minutes} {seconds}"`.
    ///
    /// Degrees and minutes are truncated to integers (degrees keep their
    /// sign), seconds keep full float precision: `-75 0 0.0`.
    #[must_use]
    pub fn dms_string(&self) -> String {
        format!(
            "{} {} {}",
            self.degrees.trunc() as i64,
            self.minutes.trunc() as i64,
            format_decimal(self.seconds)
        )
    }
}

// =============================================================================
// CoordinateRecord
// =============================================================================

/// Normalized location of one image, ready to be emitted as a table row.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRecord {
    file_name: String,
    latitude_dms: String,
    longitude_dms: String,
    latitude_dd: f64,
    longitude_dd: f64,
    altitude_m: f64,
    altitude_ft: f64,
}

impl CoordinateRecord {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        latitude: &Coordinate,
        longitude: &Coordinate,
        altitude: Altitude,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            latitude_dms: latitude.dms_string(),
            longitude_dms: longitude.dms_string(),
            latitude_dd: latitude.decimal,
            longitude_dd: longitude.decimal,
            altitude_m: altitude.meters(),
            altitude_ft: altitude.feet(),
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn latitude_dms(&self) -> &str {
        &self.latitude_dms
    }

    #[must_use]
    pub fn longitude_dms(&self) -> &str {
        &self.longitude_dms
    }

    #[must_use]
    pub fn latitude_dd(&self) -> f64 {
        self.latitude_dd
    }

    #[must_use]
    pub fn longitude_dd(&self) -> f64 {
        self.longitude_dd
    }

    #[must_use]
    pub fn altitude_m(&self) -> f64 {
        self.altitude_m
    }

    #[must_use]
    pub fn altitude_ft(&self) -> f64 {
        self.altitude_ft
    }
}

/// Altitude in meters; feet are derived with [`FEET_PER_METER`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Altitude(f64);

impl Altitude {
    #[must_use]
    pub fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    #[must_use]
    pub fn meters(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn feet(self) -> f64 {
        self.0 * FEET_PER_METER
    }
}

/// Formats a float as its shortest round-trip text with a mandatory
/// fractional part: `120.0`, `-75.0`, `40.25833333333333`.
///
/// Magnitudes below `1e-4` or from `1e16` upwards switch to scientific
/// notation with a signed two-digit exponent: `2.777777777777778e-05`,
/// `1e+16`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if !(-4..16).contains(&exponent) {
            let sign = if exponent < 0 { '-' } else { '+' };
            return format!("{mantissa}e{sign}{:02}", exponent.abs());
        }
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

// =============================================================================
// Tests
// =============================================================================
