//! Predict command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use pacer_domain::{FinishTimePredictor, LlmProvider, TraceSink};
use pacer_extractor::{ExtractionRequest, ExtractionResult, FieldExtractor};
use std::fmt::Display;
use tracing::{debug, info};

/// Reason shown when extraction succeeded but left a field unknown.
pub const MISSING_DATA_REASON: &str = "missing sex, age or 5 km pace";

/// What one trigger produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// Complete extraction, scored by the model
    Predicted {
        /// The extraction the prediction was made from
        extraction: ExtractionResult,
        /// Predicted finish time in seconds
        seconds: f64,
    },

    /// Extraction failed or was incomplete; the model was not called
    Rejected {
        /// The extraction as returned
        extraction: ExtractionResult,
        /// Provider or parse error, or the missing-data reason
        reason: String,
    },
}

impl PredictionOutcome {
    /// The extraction behind this outcome.
    pub fn extraction(&self) -> &ExtractionResult {
        match self {
            PredictionOutcome::Predicted { extraction, .. }
            | PredictionOutcome::Rejected { extraction, .. } => extraction,
        }
    }

    /// Predicted seconds, if a prediction was made.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            PredictionOutcome::Predicted { seconds, .. } => Some(*seconds),
            PredictionOutcome::Rejected { .. } => None,
        }
    }

    /// Why no prediction was made.
    pub fn reason(&self) -> Option<&str> {
        match self {
            PredictionOutcome::Rejected { reason, .. } => Some(reason),
            PredictionOutcome::Predicted { .. } => None,
        }
    }
}

/// Run one extraction and, when it is complete, one prediction.
///
/// Extraction problems come back as `Rejected`. A failing predictor is a hard
/// error: it means the artifact and the extracted profile disagree.
pub async fn trigger<L, S, P>(
    extractor: &FieldExtractor<L, S>,
    predictor: &P,
    text: &str,
) -> Result<PredictionOutcome>
where
    L: LlmProvider + Send + Sync + 'static,
    S: TraceSink + Send + Sync + 'static,
    L::Error: Display,
    S::Error: Display,
    P: FinishTimePredictor,
    P::Error: Display,
{
    let extraction = extractor.extract(ExtractionRequest::new(text)).await;

    let profile = match extraction.complete() {
        Some(profile) => profile,
        None => {
            let reason = extraction
                .error()
                .unwrap_or(MISSING_DATA_REASON)
                .to_string();
            debug!("No prediction: {}", reason);
            return Ok(PredictionOutcome::Rejected { extraction, reason });
        }
    };

    let scored = predictor
        .predict(&profile.to_row())
        .map_err(|e| CliError::Prediction(e.to_string()))?;
    let seconds = scored.prediction().ok_or_else(|| {
        CliError::Prediction("model returned no prediction_label".to_string())
    })?;

    info!("Predicted {:.2} s for {} runner aged {}", seconds, profile.sex, profile.age);
    Ok(PredictionOutcome::Predicted {
        extraction,
        seconds,
    })
}

/// Execute the predict command.
pub async fn execute_predict<L, S, P>(
    text: &str,
    extractor: &FieldExtractor<L, S>,
    predictor: &P,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider + Send + Sync + 'static,
    S: TraceSink + Send + Sync + 'static,
    L::Error: Display,
    S::Error: Display,
    P: FinishTimePredictor,
    P::Error: Display,
{
    let outcome = trigger(extractor, predictor, text).await?;
    let rendered = formatter.format_outcome(&outcome)?;

    if outcome.seconds().is_some() || formatter.is_json() {
        println!("{}", rendered);
    } else {
        eprintln!("{}", rendered);
    }

    Ok(())
}
