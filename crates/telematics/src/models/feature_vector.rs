use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const FEATURE_COUNT: usize = 5;

/// Column order the risk model was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "harsh_accelerations",
    "harsh_brakings",
    "harsh_turnings",
    "percent_time_speeding",
    "percent_time_risky_hours",
];

/// Driving-behaviour features for one trip, in model input order.
///
/// The two `percent_*` fields divide a point count by the trip duration in
/// seconds. They only read as percentages for 1 Hz telemetry and are not
/// bounded to [0, 100]. The deployed model was trained on exactly this
/// definition, so it must not be "corrected" without retraining.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct FeatureVector {
    pub harsh_accelerations: f64,
    pub harsh_brakings: f64,
    pub harsh_turnings: f64,
    pub percent_time_speeding: f64,
    pub percent_time_risky_hours: f64,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.harsh_accelerations,
            self.harsh_brakings,
            self.harsh_turnings,
            self.percent_time_speeding,
            self.percent_time_risky_hours,
        ]
    }
}
