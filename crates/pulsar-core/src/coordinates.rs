//! Equatorial ↔ Cartesian conversions
//!
//! Two conventions are kept apart: the degree form used for drawing the
//! reference sphere, and the sexagesimal form read from pulsar catalogs.
//! Both end in the same trig: +X is (ra=0, dec=0), +Z is the north pole.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{
    ARCMIN_PER_DEGREE, ARCSEC_PER_DEGREE, DEGREES_PER_HOUR, DEGREES_PER_MINUTE,
    DEGREES_PER_SECOND,
};

/// Cartesian position (world units unless stated otherwise)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(&self, other: &CartesianPosition) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Recover equatorial coordinates (degrees) and distance
    pub fn to_equatorial(&self) -> EquatorialPosition {
        cartesian_to_celestial(self)
    }
}

/// Equatorial coordinates in decimal degrees plus a distance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPosition {
    /// Right ascension in degrees [0, 360)
    pub ra_deg: f64,
    /// Declination in degrees [-90, 90]
    pub dec_deg: f64,
    pub distance: f64,
}

impl EquatorialPosition {
    pub fn new(ra_deg: f64, dec_deg: f64, distance: f64) -> Self {
        Self { ra_deg, dec_deg, distance }
    }

    pub fn to_cartesian(&self) -> CartesianPosition {
        celestial_to_cartesian(self.ra_deg, self.dec_deg, self.distance)
    }
}

/// Degree form: right ascension and declination given directly in degrees
pub fn celestial_to_cartesian(ra_deg: f64, dec_deg: f64, distance: f64) -> CartesianPosition {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();

    let cos_dec = dec.cos();
    CartesianPosition {
        x: distance * cos_dec * ra.cos(),
        y: distance * cos_dec * ra.sin(),
        z: distance * dec.sin(),
    }
}

/// Sexagesimal form: RA in h:m:s and DEC in d:m:s
pub fn sexagesimal_to_cartesian(
    right_ascension: &Sexagesimal,
    declination: &Sexagesimal,
    distance: f64,
) -> CartesianPosition {
    celestial_to_cartesian(
        right_ascension.hours_to_degrees(),
        declination.degrees(),
        distance,
    )
}

/// Inverse of [`celestial_to_cartesian`]
pub fn cartesian_to_celestial(position: &CartesianPosition) -> EquatorialPosition {
    let distance = position.magnitude();
    if distance == 0.0 {
        return EquatorialPosition::new(0.0, 0.0, 0.0);
    }

    let ra_deg = position.y.atan2(position.x).to_degrees().rem_euclid(360.0);
    let dec_deg = (position.z / distance).clamp(-1.0, 1.0).asin().to_degrees();

    EquatorialPosition::new(ra_deg, dec_deg, distance)
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SexagesimalError {
    #[error("empty sexagesimal value")]
    Empty,

    #[error("too many fields in '{0}' (at most 3)")]
    TooManyFields(String),

    #[error("invalid field '{field}' in '{value}'")]
    InvalidField { value: String, field: String },
}

/// A three-field sexagesimal value (h:m:s or d:m:s)
///
/// Fields are stored as magnitudes; the sign of the leading field applies
/// to the whole value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sexagesimal {
    pub negative: bool,
    /// Hours or degrees
    pub major: f64,
    /// Minutes or arcminutes
    pub minor: f64,
    /// Seconds or arcseconds
    pub seconds: f64,
}

impl Sexagesimal {
    pub fn new(major: f64, minor: f64, seconds: f64) -> Self {
        Self {
            negative: major.is_sign_negative(),
            major: major.abs(),
            minor,
            seconds,
        }
    }

    /// Parse colon-delimited fields, aligned to the right.
    ///
    /// `"31.97"` fills only the seconds, `"34:31.97"` minutes and seconds.
    pub fn parse(text: &str) -> Result<Self, SexagesimalError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SexagesimalError::Empty);
        }

        let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
        if parts.len() > 3 {
            return Err(SexagesimalError::TooManyFields(trimmed.to_string()));
        }

        let invalid = |field: &str| SexagesimalError::InvalidField {
            value: trimmed.to_string(),
            field: field.to_string(),
        };

        let mut fields = [0.0_f64; 3];
        let offset = 3 - parts.len();
        for (i, part) in parts.iter().enumerate() {
            let value: f64 = part.parse().map_err(|_| invalid(part))?;
            if !value.is_finite() {
                return Err(invalid(part));
            }
            // Only the leading field may carry a sign
            if i > 0 && value.is_sign_negative() {
                return Err(invalid(part));
            }
            fields[offset + i] = value.abs();
        }

        Ok(Self {
            negative: trimmed.starts_with('-'),
            major: fields[0],
            minor: fields[1],
            seconds: fields[2],
        })
    }

    fn sign(&self) -> f64 {
        if self.negative { -1.0 } else { 1.0 }
    }

    /// Interpret as h:m:s and convert to degrees (1h = 15°)
    pub fn hours_to_degrees(&self) -> f64 {
        self.sign()
            * (self.major * DEGREES_PER_HOUR
                + self.minor * DEGREES_PER_MINUTE
                + self.seconds * DEGREES_PER_SECOND)
    }

    /// Interpret as d:m:s and convert to decimal degrees
    pub fn degrees(&self) -> f64 {
        self.sign()
            * (self.major + self.minor / ARCMIN_PER_DEGREE + self.seconds / ARCSEC_PER_DEGREE)
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{}{}:{}:{}", sign, self.major, self.minor, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_full() {
        let ra = Sexagesimal::parse("05:34:31.97").unwrap();
        assert_eq!(ra.major, 5.0);
        assert_eq!(ra.minor, 34.0);
        assert_abs_diff_eq!(ra.seconds, 31.97, epsilon = 1e-12);
        assert!(!ra.negative);
    }

    #[test]
    fn test_parse_right_aligned() {
        let only_seconds = Sexagesimal::parse(" 12.5 ").unwrap();
        assert_eq!(only_seconds, Sexagesimal { negative: false, major: 0.0, minor: 0.0, seconds: 12.5 });

        let minutes_seconds = Sexagesimal::parse("07:30").unwrap();
        assert_eq!(minutes_seconds.major, 0.0);
        assert_eq!(minutes_seconds.minor, 7.0);
        assert_eq!(minutes_seconds.seconds, 30.0);
    }

    #[test]
    fn test_negative_zero_degrees_keeps_sign() {
        let dec = Sexagesimal::parse("-00:30:00").unwrap();
        assert!(dec.negative);
        assert_abs_diff_eq!(dec.degrees(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sign_applies_to_whole_value() {
        let dec = Sexagesimal::parse("-22:00:36").unwrap();
        assert_abs_diff_eq!(dec.degrees(), -(22.0 + 0.01), epsilon = 1e-12);

        let plus = Sexagesimal::parse("+22:00:36").unwrap();
        assert_abs_diff_eq!(plus.degrees(), 22.01, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Sexagesimal::parse("   "), Err(SexagesimalError::Empty));
        assert!(matches!(Sexagesimal::parse("1:2:3:4"), Err(SexagesimalError::TooManyFields(_))));
        assert!(matches!(Sexagesimal::parse("05:xx:10"), Err(SexagesimalError::InvalidField { .. })));
        assert!(matches!(Sexagesimal::parse("05::10"), Err(SexagesimalError::InvalidField { .. })));
        assert!(matches!(Sexagesimal::parse("05:-3:10"), Err(SexagesimalError::InvalidField { .. })));
    }

    #[test]
    fn test_hours_to_degrees() {
        let ra = Sexagesimal::new(6.0, 0.0, 0.0);
        assert_abs_diff_eq!(ra.hours_to_degrees(), 90.0, epsilon = 1e-12);

        let ra = Sexagesimal::new(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(ra.hours_to_degrees(), 0.25, epsilon = 1e-12);

        let ra = Sexagesimal::new(0.0, 0.0, 240.0);
        assert_abs_diff_eq!(ra.hours_to_degrees(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        let dec = Sexagesimal::parse("-10:05:2.5").unwrap();
        assert_eq!(dec.to_string(), "-10:5:2.5");
    }

    #[test]
    fn test_origin_inverse() {
        let eq = cartesian_to_celestial(&CartesianPosition::ORIGIN);
        assert_eq!(eq.distance, 0.0);
    }
}
