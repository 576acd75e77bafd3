//! Linear pipeline scoring

use crate::artifact::{Feature, PipelineArtifact};
use crate::error::PredictorError;
use pacer_domain::{Cell, FinishTimePredictor, PredictionRow};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// A loaded, immutable regression pipeline
///
/// Cloning is cheap and shares the same artifact.
#[derive(Debug, Clone)]
pub struct LinearPipeline {
    artifact: Arc<PipelineArtifact>,
}

impl LinearPipeline {
    /// Wrap a validated artifact
    pub fn new(artifact: PipelineArtifact) -> Result<Self, PredictorError> {
        artifact.validate()?;
        Ok(Self {
            artifact: Arc::new(artifact),
        })
    }

    /// Parse an artifact from JSON text
    pub fn from_json(json: &str) -> Result<Self, PredictorError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| PredictorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let pipeline = Self::from_json(&contents)?;
        info!(
            "Loaded pipeline '{}' ({} features) from {}",
            pipeline.artifact.name,
            pipeline.artifact.features.len(),
            path.display()
        );
        Ok(pipeline)
    }

    /// The underlying artifact
    pub fn artifact(&self) -> &PipelineArtifact {
        &self.artifact
    }

    /// Compute the raw score for a row
    pub fn score(&self, row: &PredictionRow) -> Result<f64, PredictorError> {
        self.artifact
            .features
            .iter()
            .try_fold(self.artifact.intercept, |acc, feature| {
                Ok(acc + contribution(feature, row)?)
            })
    }
}

impl FinishTimePredictor for LinearPipeline {
    type Error = PredictorError;

    fn predict(&self, row: &PredictionRow) -> Result<PredictionRow, Self::Error> {
        let score = self.score(row)?;
        debug!("Pipeline '{}' scored {:.2}", self.artifact.name, score);

        let mut scored = row.clone();
        scored.push(self.artifact.target.clone(), Cell::Number(score));
        Ok(scored)
    }
}

fn contribution(feature: &Feature, row: &PredictionRow) -> Result<f64, PredictorError> {
    let column = feature.column();
    let cell = row
        .get(column)
        .ok_or_else(|| PredictorError::MissingColumn(column.to_string()))?;

    match feature {
        Feature::Numeric { coefficient, .. } => {
            let value = cell.as_f64().ok_or_else(|| PredictorError::InvalidCell {
                column: column.to_string(),
                expected: "a number",
            })?;
            Ok(coefficient * value)
        }
        Feature::Categorical { levels, .. } => {
            let level = cell.as_text().ok_or_else(|| PredictorError::InvalidCell {
                column: column.to_string(),
                expected: "a category",
            })?;
            levels
                .get(level)
                .copied()
                .ok_or_else(|| PredictorError::UnknownLevel {
                    column: column.to_string(),
                    level: level.to_string(),
                })
        }
    }
}
