use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::dto::quote::RawTripPoint;
use crate::error::ExtractionError;

/// A single telemetry sample with a resolved timestamp.
///
/// The timestamp keeps the offset it was written with so that hour-of-day
/// features are read in the timezone the device reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub accelerometer_x: f64,
    pub accelerometer_y: f64,
    pub speed_kmh: f64,
}

impl TripPoint {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        accelerometer_x: f64,
        accelerometer_y: f64,
        speed_kmh: f64,
    ) -> Self {
        Self {
            timestamp,
            accelerometer_x,
            accelerometer_y,
            speed_kmh,
        }
    }

    /// Resolves a wire point, reporting the first missing or unparseable field.
    pub fn from_raw(index: usize, raw: &RawTripPoint) -> Result<Self, ExtractionError> {
        let timestamp = raw
            .timestamp
            .as_deref()
            .ok_or_else(|| ExtractionError::malformed(index, "missing field `timestamp`"))?;
        let timestamp = parse_timestamp(timestamp).ok_or_else(|| {
            ExtractionError::malformed(index, format!("unparseable timestamp `{}`", timestamp))
        })?;

        let accelerometer_x = raw
            .accelerometer_x
            .ok_or_else(|| ExtractionError::malformed(index, "missing field `accelerometer_x`"))?;
        let accelerometer_y = raw
            .accelerometer_y
            .ok_or_else(|| ExtractionError::malformed(index, "missing field `accelerometer_y`"))?;
        let speed_kmh = raw
            .speed_kmh
            .ok_or_else(|| ExtractionError::malformed(index, "missing field `speed_kmh`"))?;

        Ok(Self::new(timestamp, accelerometer_x, accelerometer_y, speed_kmh))
    }

    /// Resolves every wire point of a trip, failing on the first malformed one.
    pub fn from_raw_points(raw: &[RawTripPoint]) -> Result<Vec<Self>, ExtractionError> {
        raw.iter()
            .enumerate()
            .map(|(index, point)| Self::from_raw(index, point))
            .collect()
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the ISO-8601 flavours telemetry devices send.
///
/// Timestamps without an offset are taken as UTC; their hour of day is read
/// as written.
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts);
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(input, format) {
            return Some(ts);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, format) {
            return Some(ts.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc().fixed_offset())
}
