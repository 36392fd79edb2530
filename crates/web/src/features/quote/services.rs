use telematics::{
    Quote, RiskModel, TripPoint, dto::quote::RawTripPoint, error::Result, quote_trip,
};
use uuid::Uuid;

/// Resolves wire points and prices the trip with the loaded model.
pub fn quote(raw_points: &[RawTripPoint], model: &dyn RiskModel) -> Result<Quote> {
    let quote_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "quote",
        %quote_id,
        model = model.name(),
        points = raw_points.len()
    );

    span.in_scope(|| -> Result<Quote> {
        let points = TripPoint::from_raw_points(raw_points)?;
        let quote = quote_trip(&points, model)?;

        tracing::info!(
            risk_score = quote.risk_score,
            premium = quote.premium,
            "Trip quoted"
        );
        Ok(quote)
    })
}
