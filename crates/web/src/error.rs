use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use telematics::{ExtractionError, QuoteError};
use validator::{ValidationErrors, ValidationErrorsKind};

pub const MISSING_TRIP_DATA: &str = "Request must include 'trip_data'.";

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Quote(QuoteError),
    Validation(ValidationErrors),
    BadRequest(String),
    ModelUnavailable,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote(e) => write!(f, "Quote error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ModelUnavailable => write!(f, "Model is not loaded"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Quote(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Quote(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ModelUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Quote(QuoteError::Extraction(e @ ExtractionError::MalformedPoint { .. })) => {
                tracing::warn!("Rejected malformed trip: {}", e);
                json!({
                    "error": format!("Invalid trip data: {}", e)
                })
            }
            Self::Quote(QuoteError::Extraction(e)) => {
                tracing::warn!("Could not extract features: {}", e);
                json!({
                    "error": "Invalid trip data. Could not process features."
                })
            }
            Self::Quote(QuoteError::Scoring(e)) => {
                tracing::error!("Scoring error: {:?}", e);
                json!({
                    "error": format!("Failed to predict score: {}", e)
                })
            }
            Self::Validation(errors) => {
                let mut details = Vec::new();
                collect_validation_messages("", errors, &mut details);

                json!({
                    "error": "Validation failed",
                    "details": details
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::ModelUnavailable => {
                tracing::error!("Quote requested but no model is loaded");
                json!({
                    "error": "Model is not loaded."
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

/// Flattens nested and per-item errors into `path: message` lines.
fn collect_validation_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| {
                    format!(
                        "{}: {}",
                        path,
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    )
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(&path, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

impl From<QuoteError> for WebError {
    fn from(error: QuoteError) -> Self {
        Self::Quote(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
