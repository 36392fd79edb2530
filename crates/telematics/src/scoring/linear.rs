use serde::Deserialize;

use super::{RiskModel, finite_score};
use crate::error::{ModelLoadError, ScoringError};
use crate::models::{FEATURE_COUNT, FeatureVector};

/// `intercept + Σ coefficient·feature`, e.g. an exported linear regression.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub(super) fn validate(&self) -> Result<(), ModelLoadError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelLoadError::InvalidArtifact(format!(
                "linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                FEATURE_COUNT
            )));
        }
        Ok(())
    }
}

impl RiskModel for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let weighted: f64 = self
            .coefficients
            .iter()
            .zip(features.to_array())
            .map(|(coefficient, value)| coefficient * value)
            .sum();

        finite_score(self.intercept + weighted)
    }
}
