//! Trip telemetry feature engineering, risk scoring and premium pricing.

pub mod dto;
pub mod error;
pub mod models;
pub mod scoring;
pub mod services;

pub use error::{ExtractionError, ModelLoadError, QuoteError, ScoringError};
pub use models::{FeatureVector, TripPoint};
pub use scoring::{RiskModel, load_model};
pub use services::feature_extraction::extract_features;
pub use services::pricing::compute_premium;
pub use services::quote::{Quote, quote_trip};
