//! Regression pipeline artifact format

use crate::error::PredictorError;
use pacer_domain::PREDICTION_COLUMN;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Default artifact location, relative to the working directory
pub const DEFAULT_ARTIFACT_PATH: &str = "models/half_marathon_pipeline.json";

/// One input feature of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    /// Numeric column scaled by a coefficient
    Numeric {
        /// Column name
        column: String,
        /// Weight applied to the value
        coefficient: f64,
    },

    /// Categorical column with one weight per known level
    Categorical {
        /// Column name
        column: String,
        /// Weight per level
        levels: BTreeMap<String, f64>,
    },
}

impl Feature {
    /// Column this feature reads
    pub fn column(&self) -> &str {
        match self {
            Feature::Numeric { column, .. } | Feature::Categorical { column, .. } => column,
        }
    }
}

/// A serialized linear pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    /// Pipeline name
    pub name: String,

    /// Column the prediction is written to
    #[serde(default = "default_target")]
    pub target: String,

    /// Constant term
    pub intercept: f64,

    /// Input features
    pub features: Vec<Feature>,
}

fn default_target() -> String {
    PREDICTION_COLUMN.to_string()
}

impl PipelineArtifact {
    /// Check the artifact is usable
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.target.trim().is_empty() {
            return Err(PredictorError::Artifact("target must not be empty".to_string()));
        }
        if !self.intercept.is_finite() {
            return Err(PredictorError::Artifact("intercept must be finite".to_string()));
        }
        if self.features.is_empty() {
            return Err(PredictorError::Artifact("pipeline has no features".to_string()));
        }

        let mut seen = HashSet::new();
        for feature in &self.features {
            if !seen.insert(feature.column()) {
                return Err(PredictorError::Artifact(format!(
                    "duplicate feature column '{}'",
                    feature.column()
                )));
            }
            match feature {
                Feature::Numeric { column, coefficient } if !coefficient.is_finite() => {
                    return Err(PredictorError::Artifact(format!(
                        "coefficient for '{}' must be finite",
                        column
                    )));
                }
                Feature::Categorical { column, levels } => {
                    if levels.is_empty() {
                        return Err(PredictorError::Artifact(format!(
                            "categorical feature '{}' has no levels",
                            column
                        )));
                    }
                    if levels.values().any(|w| !w.is_finite()) {
                        return Err(PredictorError::Artifact(format!(
                            "level weights for '{}' must be finite",
                            column
                        )));
                    }
                }
                Feature::Numeric { .. } => {}
            }
        }

        Ok(())
    }
}
