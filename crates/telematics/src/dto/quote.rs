use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::null_as_empty;
use crate::models::FeatureVector;
use crate::services::quote::Quote;

/// A telemetry point as sent over the wire.
///
/// Fields are optional here so that a missing field surfaces as a malformed
/// point with its index instead of a generic body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RawTripPoint {
    #[schema(example = "2024-03-01T22:15:03Z")]
    pub timestamp: Option<String>,
    #[schema(example = 0.8)]
    pub accelerometer_x: Option<f64>,
    #[schema(example = 1.2)]
    pub accelerometer_y: Option<f64>,
    #[validate(range(min = 0.0, message = "speed_kmh must be non-negative"))]
    #[schema(example = 72.5)]
    pub speed_kmh: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(nested)]
    pub trip_data: Vec<RawTripPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub risk_score: f64,
    pub calculated_premium_usd: f64,
}

impl From<&Quote> for QuoteResponse {
    fn from(quote: &Quote) -> Self {
        Self {
            risk_score: quote.risk_score,
            calculated_premium_usd: quote.premium,
        }
    }
}

/// Quote output of the offline scorer, features included.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport {
    pub features: FeatureVector,
    pub risk_score: f64,
    pub calculated_premium_usd: f64,
}

impl From<&Quote> for QuoteReport {
    fn from(quote: &Quote) -> Self {
        Self {
            features: quote.features,
            risk_score: quote.risk_score,
            calculated_premium_usd: quote.premium,
        }
    }
}
