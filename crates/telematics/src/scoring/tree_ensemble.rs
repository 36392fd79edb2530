use serde::Deserialize;

use super::{RiskModel, finite_score};
use crate::error::{ModelLoadError, ScoringError};
use crate::models::{FEATURE_COUNT, FeatureVector};

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: average of the trees.
    #[default]
    Mean,
    /// Gradient boosting: `learning_rate` times the sum of the trees.
    Sum,
}

/// A node of an exported regression tree.
///
/// Split nodes send a sample left when `features[feature] <= threshold`,
/// matching scikit-learn. Features are narrowed to `f32` before the
/// comparison, as scikit-learn does with its input matrix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Nodes in pre-order with the root at index 0.
#[derive(Debug, Clone, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, tree_index: usize) -> Result<(), ModelLoadError> {
        let invalid = |reason: String| {
            ModelLoadError::InvalidArtifact(format!("tree {}: {}", tree_index, reason))
        };

        if self.nodes.is_empty() {
            return Err(invalid("has no nodes".to_string()));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            else {
                continue;
            };

            if *feature >= FEATURE_COUNT {
                return Err(invalid(format!(
                    "node {} splits on feature {}, only {} exist",
                    index, feature, FEATURE_COUNT
                )));
            }
            if !threshold.is_finite() {
                return Err(invalid(format!("node {} has a non-finite threshold", index)));
            }
            for child in [*left, *right] {
                // Children after their parent rule out cycles.
                if child <= index || child >= self.nodes.len() {
                    return Err(invalid(format!(
                        "node {} points at invalid child {}",
                        index, child
                    )));
                }
            }
        }

        Ok(())
    }

    fn evaluate(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64, ScoringError> {
        let mut index = 0;

        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).ok_or_else(|| {
                        ScoringError::Model(format!("unknown feature index {}", feature))
                    })?;
                    index = if f64::from(*value as f32) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => {
                    return Err(ScoringError::Model(format!(
                        "tree references missing node {}",
                        index
                    )));
                }
            }
        }

        Err(ScoringError::Model("tree walk did not reach a leaf".to_string()))
    }
}

/// An exported random forest or gradient-boosted regressor.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    pub name: String,
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    pub(super) fn validate(&self) -> Result<(), ModelLoadError> {
        if self.trees.is_empty() {
            return Err(ModelLoadError::InvalidArtifact(
                "tree ensemble has no trees".to_string(),
            ));
        }

        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(index, tree)| tree.validate(index))
    }
}

impl RiskModel for TreeEnsemble {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let features = features.to_array();

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(&features)?;
        }

        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.learning_rate * total,
        };

        finite_score(self.base_score + combined)
    }
}
