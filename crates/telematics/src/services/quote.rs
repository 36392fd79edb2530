use crate::error::Result;
use crate::models::{FeatureVector, TripPoint};
use crate::scoring::RiskModel;

use super::feature_extraction::extract_features;
use super::pricing::{compute_premium, round_to_cents};

/// Outcome of pricing one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub features: FeatureVector,
    /// Clamped model score, rounded to cents for reporting.
    pub risk_score: f64,
    pub premium: f64,
}

/// Extracts features, scores them, clamps the score at zero and prices it.
///
/// The premium is computed from the unrounded clamped score.
pub fn quote_trip(points: &[TripPoint], model: &dyn RiskModel) -> Result<Quote> {
    let features = extract_features(points)?;
    tracing::debug!(?features, "Extracted trip features");

    let raw_score = model.predict(&features)?;
    let risk_score = raw_score.max(0.0);
    if raw_score < 0.0 {
        tracing::debug!(raw_score, "Clamped negative risk score to zero");
    }

    Ok(Quote {
        features,
        risk_score: round_to_cents(risk_score),
        premium: compute_premium(risk_score),
    })
}
