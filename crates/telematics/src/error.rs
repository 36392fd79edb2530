use thiserror::Error;

/// Reasons a trip cannot be turned into a feature vector.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Trip contains no points")]
    EmptyInput,

    #[error("Trip has zero duration: earliest and latest timestamps coincide")]
    ZeroDurationTrip,

    #[error("point {index}: {reason}")]
    MalformedPoint { index: usize, reason: String },
}

impl ExtractionError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPoint {
            index,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("model produced a non-finite score ({0})")]
    NonFiniteScore(f64),

    #[error("{0}")]
    Model(String),
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Feature schema mismatch: expected {expected:?}, found {found:?}")]
    FeatureSchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error("Feature extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

impl QuoteError {
    /// Whether the failure was caused by the caller's input rather than the model.
    pub fn is_client_error(&self) -> bool {
        matches!(self, QuoteError::Extraction(_))
    }
}
