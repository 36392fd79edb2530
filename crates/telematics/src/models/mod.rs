mod feature_vector;
mod trip_point;

pub use feature_vector::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use trip_point::{TripPoint, parse_timestamp};
