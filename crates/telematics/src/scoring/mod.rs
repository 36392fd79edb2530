//! Risk models the service can score trips with.
//!
//! The trained model ships as a portable JSON artifact tagged by `kind`.
//! Every artifact declares the feature columns it was trained on, and
//! loading fails unless they match [`FEATURE_NAMES`] in order.

mod linear;
mod tree_ensemble;

use std::fmt::Debug;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ModelLoadError, ScoringError};
use crate::models::{FEATURE_NAMES, FeatureVector};

pub use linear::LinearModel;
pub use tree_ensemble::{Aggregation, RegressionTree, TreeEnsemble, TreeNode};

/// A trained scorer mapping trip features to a risk score.
///
/// Implementations are shared read-only across request tasks.
pub trait RiskModel: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn predict(&self, features: &FeatureVector) -> Result<f64, ScoringError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn feature_names(&self) -> &[String] {
        match self {
            ModelArtifact::Linear(model) => &model.feature_names,
            ModelArtifact::TreeEnsemble(model) => &model.feature_names,
        }
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        let found = self.feature_names();
        if found.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelLoadError::FeatureSchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
                found: found.to_vec(),
            });
        }

        match self {
            ModelArtifact::Linear(model) => model.validate(),
            ModelArtifact::TreeEnsemble(model) => model.validate(),
        }
    }

    pub fn into_model(self) -> Box<dyn RiskModel> {
        match self {
            ModelArtifact::Linear(model) => Box::new(model),
            ModelArtifact::TreeEnsemble(model) => Box::new(model),
        }
    }
}

/// Reads, validates and instantiates a model artifact from disk.
pub fn load_model(path: impl AsRef<Path>) -> Result<Box<dyn RiskModel>, ModelLoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let artifact = ModelArtifact::from_json(&json)?;

    let model = artifact.into_model();
    tracing::info!(model = model.name(), path = %path.display(), "Loaded risk model");
    Ok(model)
}

fn finite_score(score: f64) -> Result<f64, ScoringError> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(ScoringError::NonFiniteScore(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINEAR: &str = r#"{
        "kind": "linear",
        "name": "glm-v1",
        "feature_names": [
            "harsh_accelerations",
            "harsh_brakings",
            "harsh_turnings",
            "percent_time_speeding",
            "percent_time_risky_hours"
        ],
        "intercept": 1.0,
        "coefficients": [2.0, 3.0, 1.0, 0.5, 0.25]
    }"#;

    #[test]
    fn test_linear_artifact_loads() {
        let model = ModelArtifact::from_json(LINEAR).unwrap().into_model();
        assert_eq!(model.name(), "glm-v1");

        let features = FeatureVector {
            harsh_accelerations: 1.0,
            harsh_brakings: 1.0,
            harsh_turnings: 0.0,
            percent_time_speeding: 10.0,
            percent_time_risky_hours: 4.0,
        };
        assert_eq!(model.predict(&features).unwrap(), 12.0);
    }

    #[test]
    fn test_reordered_feature_names_are_rejected() {
        let mut artifact: serde_json::Value = serde_json::from_str(LINEAR).unwrap();
        artifact["feature_names"].as_array_mut().unwrap().swap(0, 1);

        let err = ModelArtifact::from_json(&artifact.to_string()).unwrap_err();
        assert!(matches!(err, ModelLoadError::FeatureSchemaMismatch { .. }));
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let json = LINEAR.replace(r#""kind": "linear""#, r#""kind": "neural_net""#);

        let err = ModelArtifact::from_json(&json).unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_model("/nonexistent/risk_model.json").unwrap_err();
        assert!(matches!(err, ModelLoadError::Io(_)));
    }
}
