use axum::{Router, routing::post};

use super::handlers::calculate_premium;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/calculate_premium", post(calculate_premium))
}
