use chrono::{DateTime, FixedOffset, TimeDelta, Timelike};

use crate::error::ExtractionError;
use crate::models::{FeatureVector, TripPoint};

pub const HARSH_ACCELERATION_THRESHOLD: f64 = 2.5;
pub const HARSH_BRAKING_THRESHOLD: f64 = -2.5;
pub const HARSH_TURNING_THRESHOLD: f64 = 2.0;
pub const SPEEDING_THRESHOLD_KMH: f64 = 90.0;

/// Hours of day (0-23) counted as risky driving time.
pub const RISKY_HOURS: [u32; 7] = [22, 23, 0, 1, 2, 3, 4];

/// Derives the model features for one trip.
///
/// Points may arrive in any order: the duration is the span between the
/// earliest and latest timestamp. All thresholds are strict comparisons.
///
/// `percent_time_speeding` and `percent_time_risky_hours` are point counts
/// divided by the duration in seconds, times 100. That is not a
/// time-weighted share unless telemetry is sampled at 1 Hz, but it is the
/// definition the model was trained on.
pub fn extract_features(points: &[TripPoint]) -> Result<FeatureVector, ExtractionError> {
    let (first, rest) = points.split_first().ok_or(ExtractionError::EmptyInput)?;

    let mut earliest = first.timestamp;
    let mut latest = first.timestamp;
    for point in rest {
        earliest = earliest.min(point.timestamp);
        latest = latest.max(point.timestamp);
    }

    let trip_duration_seconds = total_seconds(latest - earliest);
    if trip_duration_seconds == 0.0 {
        return Err(ExtractionError::ZeroDurationTrip);
    }

    let mut harsh_accelerations = 0u64;
    let mut harsh_brakings = 0u64;
    let mut harsh_turnings = 0u64;
    let mut speeding_points = 0u64;
    let mut risky_hour_points = 0u64;

    for point in points {
        let lateral_accel_mag = point.accelerometer_y.abs();

        if point.accelerometer_x > HARSH_ACCELERATION_THRESHOLD {
            harsh_accelerations += 1;
        }
        if point.accelerometer_x < HARSH_BRAKING_THRESHOLD {
            harsh_brakings += 1;
        }
        if lateral_accel_mag > HARSH_TURNING_THRESHOLD {
            harsh_turnings += 1;
        }
        if point.speed_kmh > SPEEDING_THRESHOLD_KMH {
            speeding_points += 1;
        }
        if is_risky_hour(&point.timestamp) {
            risky_hour_points += 1;
        }
    }

    Ok(FeatureVector {
        harsh_accelerations: harsh_accelerations as f64,
        harsh_brakings: harsh_brakings as f64,
        harsh_turnings: harsh_turnings as f64,
        percent_time_speeding: (speeding_points as f64 / trip_duration_seconds) * 100.0,
        percent_time_risky_hours: (risky_hour_points as f64 / trip_duration_seconds) * 100.0,
    })
}

/// Hour of day in the offset the timestamp was written with.
fn is_risky_hour(timestamp: &DateTime<FixedOffset>) -> bool {
    RISKY_HOURS.contains(&timestamp.hour())
}

fn total_seconds(delta: TimeDelta) -> f64 {
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;

    fn point(timestamp: &str, accel_x: f64, accel_y: f64, speed: f64) -> TripPoint {
        TripPoint::new(parse_timestamp(timestamp).unwrap(), accel_x, accel_y, speed)
    }

    fn calm(timestamp: &str) -> TripPoint {
        point(timestamp, 0.0, 0.0, 50.0)
    }

    #[test]
    fn test_empty_trip_is_rejected() {
        assert_eq!(extract_features(&[]), Err(ExtractionError::EmptyInput));
    }

    #[test]
    fn test_single_point_has_zero_duration() {
        let trip = [calm("2024-05-10T12:00:00")];
        assert_eq!(extract_features(&trip), Err(ExtractionError::ZeroDurationTrip));
    }

    #[test]
    fn test_constant_timestamp_has_zero_duration() {
        let trip = [
            point("2024-05-10T12:00:00", 3.0, 0.0, 120.0),
            point("2024-05-10T12:00:00", -3.0, 2.5, 95.0),
            point("2024-05-10T12:00:00", 0.0, 0.0, 10.0),
        ];
        assert_eq!(extract_features(&trip), Err(ExtractionError::ZeroDurationTrip));
    }

    #[test]
    fn test_same_instant_in_different_offsets_has_zero_duration() {
        let trip = [
            calm("2024-05-10T12:00:00+00:00"),
            calm("2024-05-10T14:00:00+02:00"),
        ];
        assert_eq!(extract_features(&trip), Err(ExtractionError::ZeroDurationTrip));
    }

    #[test]
    fn test_speeding_over_ten_second_trip() {
        let trip = [
            point("2024-05-10T12:00:00", 0.0, 0.0, 95.0),
            point("2024-05-10T12:00:10", 0.0, 0.0, 60.0),
        ];
        let features = extract_features(&trip).unwrap();

        assert_eq!(features.percent_time_speeding, 10.0);
        assert_eq!(features.percent_time_risky_hours, 0.0);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let trip = [
            point("2024-05-10T12:00:00", 2.5, 2.0, 90.0),
            point("2024-05-10T12:00:01", -2.5, -2.0, 90.0),
        ];
        let features = extract_features(&trip).unwrap();

        assert_eq!(features.harsh_accelerations, 0.0);
        assert_eq!(features.harsh_brakings, 0.0);
        assert_eq!(features.harsh_turnings, 0.0);
        assert_eq!(features.percent_time_speeding, 0.0);
    }

    #[test]
    fn test_values_just_past_thresholds_count() {
        let trip = [
            point("2024-05-10T12:00:00", 2.50001, 2.00001, 90.00001),
            point("2024-05-10T12:00:01", -2.50001, -2.00001, 0.0),
        ];
        let features = extract_features(&trip).unwrap();

        assert_eq!(features.harsh_accelerations, 1.0);
        assert_eq!(features.harsh_brakings, 1.0);
        assert_eq!(features.harsh_turnings, 2.0);
        assert_eq!(features.percent_time_speeding, 100.0);
    }

    #[test]
    fn test_adding_harsh_acceleration_increments_only_that_count() {
        let mut trip = vec![
            point("2024-05-10T12:00:00", -3.0, 2.5, 100.0),
            point("2024-05-10T12:00:30", 0.5, 0.1, 40.0),
            point("2024-05-10T12:01:00", 2.8, -0.3, 70.0),
        ];
        let before = extract_features(&trip).unwrap();

        trip.push(point("2024-05-10T12:00:45", 3.0, 0.0, 60.0));
        let after = extract_features(&trip).unwrap();

        assert_eq!(after.harsh_accelerations, before.harsh_accelerations + 1.0);
        assert_eq!(after.harsh_brakings, before.harsh_brakings);
        assert_eq!(after.harsh_turnings, before.harsh_turnings);
        assert_eq!(after.percent_time_speeding, before.percent_time_speeding);
        assert_eq!(after.percent_time_risky_hours, before.percent_time_risky_hours);
    }

    #[test]
    fn test_unordered_points_use_min_and_max_timestamp() {
        let trip = [
            point("2024-05-10T12:00:05", 0.0, 0.0, 91.0),
            point("2024-05-10T12:00:20", 0.0, 0.0, 91.0),
            point("2024-05-10T12:00:00", 0.0, 0.0, 10.0),
        ];
        let features = extract_features(&trip).unwrap();

        assert_eq!(features.percent_time_speeding, 10.0);
    }

    #[test]
    fn test_risky_hours_window() {
        let trip = [
            calm("2024-05-10T21:59:59"),
            calm("2024-05-10T22:00:00"),
            calm("2024-05-11T00:30:00"),
            calm("2024-05-11T04:59:59"),
            calm("2024-05-11T05:00:00"),
        ];
        let features = extract_features(&trip).unwrap();

        let duration = 7.0 * 3600.0 + 1.0;
        assert_eq!(features.percent_time_risky_hours, (3.0 / duration) * 100.0);
    }

    #[test]
    fn test_risky_hour_uses_written_offset() {
        // 23:00 at +02:00 is 21:00 UTC; the local hour is what counts.
        let trip = [
            calm("2024-05-10T23:00:00+02:00"),
            calm("2024-05-10T23:00:10+02:00"),
        ];
        let features = extract_features(&trip).unwrap();

        assert_eq!(features.percent_time_risky_hours, 20.0);
    }

    #[test]
    fn test_percent_features_are_not_capped() {
        let trip = [
            point("2024-05-10T23:00:00.000", 0.0, 0.0, 120.0),
            point("2024-05-10T23:00:00.100", 0.0, 0.0, 120.0),
            point("2024-05-10T23:00:00.200", 0.0, 0.0, 120.0),
        ];
        let features = extract_features(&trip).unwrap();

        assert!((features.percent_time_speeding - 1500.0).abs() < 1e-9);
        assert!(features.percent_time_risky_hours > 100.0);
    }
}
