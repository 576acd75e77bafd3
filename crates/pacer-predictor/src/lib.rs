//! Pacer Predictor
//!
//! Prediction adapter around a pre-trained regression pipeline artifact.
//!
//! The artifact is produced elsewhere (training is out of scope) and loaded
//! once from disk. It describes a linear pipeline over the three profile
//! columns: numeric features contribute `coefficient * value`, categorical
//! features contribute a per-level weight, and the intercept is added on top.
//!
//! Scoring returns the input row augmented with the `prediction_label` column,
//! holding the predicted half-marathon time in seconds.
//!
//! # Examples
//!
//! ```
//! use pacer_domain::{FinishTimePredictor, RunnerProfile, Sex};
//! use pacer_predictor::LinearPipeline;
//!
//! let pipeline = LinearPipeline::from_json(r#"{
//!     "name": "demo",
//!     "intercept": 100.0,
//!     "features": [
//!         {"kind": "numeric", "column": "Wiek", "coefficient": 1.0},
//!         {"kind": "numeric", "column": "5 km Tempo", "coefficient": 10.0},
//!         {"kind": "categorical", "column": "Płeć", "levels": {"M": 0.0, "K": 5.0}}
//!     ]
//! }"#).unwrap();
//!
//! let profile = RunnerProfile::from_parts(Some(Sex::Male), Some(30), Some(5.0)).unwrap();
//! let scored = pipeline.predict(&profile.to_row()).unwrap();
//! assert_eq!(scored.prediction(), Some(180.0));
//! ```

#![warn(missing_docs)]

mod artifact;
mod error;
mod pipeline;

pub use artifact::{Feature, PipelineArtifact, DEFAULT_ARTIFACT_PATH};
pub use error::PredictorError;
pub use pipeline::LinearPipeline;
