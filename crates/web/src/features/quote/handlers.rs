use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use telematics::dto::quote::{QuoteRequest, QuoteResponse};
use validator::Validate;

use crate::error::{MISSING_TRIP_DATA, WebError};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/calculate_premium",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Trip scored and priced", body = QuoteResponse),
        (status = 400, description = "Missing, malformed or unusable trip data"),
        (status = 500, description = "Model not loaded or scoring failed")
    ),
    tag = "pricing"
)]
pub async fn calculate_premium(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let model = state.model().ok_or(WebError::ModelUnavailable)?;

    let Json(payload) = payload?;
    if payload.trip_data.is_empty() {
        return Err(WebError::BadRequest(MISSING_TRIP_DATA.to_string()));
    }
    payload.validate()?;

    let quote = services::quote(&payload.trip_data, model.as_ref())?;

    Ok(Json(QuoteResponse::from(&quote)).into_response())
}
