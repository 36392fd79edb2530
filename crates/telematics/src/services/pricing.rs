use rust_decimal::prelude::*;

/// Premium in USD for a risk score of zero.
pub const BASE_RATE: f64 = 50.0;

/// Prices a trip from its risk score.
///
/// A score of 0 yields the base rate and every 100 points add another base
/// rate. The score is used as given, negative or not; clamping is the
/// caller's job.
pub fn compute_premium(risk_score: f64) -> f64 {
    let premium = BASE_RATE * (1.0 + (risk_score / 100.0));
    round_to_cents(premium)
}

/// Rounds to two decimals, ties to even, on the exact binary value.
///
/// Numpy rounds a scaled value instead, so the two can differ by a cent on
/// values that sit a few ulps from a half-cent.
///
/// Values a `Decimal` cannot hold (non-finite or beyond ~7.9e28) are
/// returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}
