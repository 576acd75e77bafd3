//! End-to-end tests for the predict trigger
//!
//! These run the real extractor, parser and output formatting against a
//! scripted chat model and a stub regression model that counts its calls.

use pacer_cli::config::OutputFormat;
use pacer_cli::{trigger, CliError, Formatter, PredictionOutcome};
use pacer_domain::{
    Cell, FinishTimePredictor, PredictionRow, Sex, AGE_COLUMN, PACE_COLUMN, PREDICTION_COLUMN,
    SEX_COLUMN,
};
use pacer_extractor::{ExtractorConfig, FieldExtractor};
use pacer_llm::MockProvider;
use pacer_observe::RecordingSink;
use pacer_predictor::LinearPipeline;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Returns a fixed prediction and remembers what it was asked
struct StubPredictor {
    seconds: f64,
    calls: AtomicUsize,
    last_row: Mutex<Option<PredictionRow>>,
}

impl StubPredictor {
    fn new(seconds: f64) -> Self {
        Self {
            seconds,
            calls: AtomicUsize::new(0),
            last_row: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FinishTimePredictor for StubPredictor {
    type Error = String;

    fn predict(&self, row: &PredictionRow) -> Result<PredictionRow, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_row.lock().unwrap() = Some(row.clone());

        let mut scored = row.clone();
        scored.push(PREDICTION_COLUMN, Cell::Number(self.seconds));
        Ok(scored)
    }
}

/// Always fails, as a model with a mismatched schema would
struct BrokenPredictor;

impl FinishTimePredictor for BrokenPredictor {
    type Error = String;

    fn predict(&self, _row: &PredictionRow) -> Result<PredictionRow, String> {
        Err("column 'Płeć' has unknown level".to_string())
    }
}

fn extractor(llm: MockProvider) -> FieldExtractor<MockProvider, RecordingSink> {
    FieldExtractor::new(llm, RecordingSink::new(), ExtractorConfig::default())
}

fn plain() -> Formatter {
    Formatter::new(OutputFormat::Table, false)
}

#[tokio::test]
async fn test_complete_description_is_predicted() {
    let extractor = extractor(MockProvider::new(r#"{"sex":"M","age":37,"pace":5.23}"#));
    let predictor = StubPredictor::new(5000.12);

    let outcome = trigger(
        &extractor,
        &predictor,
        "I am a man, 37 years old, 5km pace 5.23 min/km",
    )
    .await
    .unwrap();

    let message = plain().format_outcome(&outcome).unwrap();
    assert!(message.contains("5000.12"));
    assert!(message.contains("seconds"));
    assert_eq!(predictor.calls(), 1);

    let row = predictor.last_row.lock().unwrap().clone().unwrap();
    assert_eq!(row.get(SEX_COLUMN), Some(&Cell::Text("M".to_string())));
    assert_eq!(row.get(AGE_COLUMN), Some(&Cell::Integer(37)));
    assert_eq!(row.get(PACE_COLUMN), Some(&Cell::Number(5.23)));
}

#[tokio::test]
async fn test_missing_fields_show_generic_message() {
    let extractor = extractor(MockProvider::new(r#"{"sex":null,"age":null,"pace":null}"#));
    let predictor = StubPredictor::new(5000.12);

    let outcome = trigger(&extractor, &predictor, "hello").await.unwrap();

    let message = plain().format_outcome(&outcome).unwrap();
    assert_eq!(
        message,
        "❌ Could not read all required data: missing sex, age or 5 km pace"
    );
    assert_eq!(predictor.calls(), 0);
}

#[tokio::test]
async fn test_provider_error_is_shown() {
    let extractor = extractor(MockProvider::failing("timeout"));
    let predictor = StubPredictor::new(5000.12);

    let outcome = trigger(&extractor, &predictor, "anything").await.unwrap();

    let message = plain().format_outcome(&outcome).unwrap();
    assert!(message.contains("timeout"));
    assert!(matches!(outcome, PredictionOutcome::Rejected { .. }));
    assert_eq!(predictor.calls(), 0);
}

#[tokio::test]
async fn test_malformed_reply_skips_prediction() {
    let extractor = extractor(MockProvider::new(
        "Sure! {\"sex\":\"M\",\"age\":37,\"pace\":5.23}",
    ));
    let predictor = StubPredictor::new(5000.12);

    let outcome = trigger(&extractor, &predictor, "text").await.unwrap();

    assert!(outcome.reason().unwrap().contains("Malformed model output"));
    assert_eq!(predictor.calls(), 0);
}

#[tokio::test]
async fn test_prediction_error_propagates() {
    let extractor = extractor(MockProvider::new(r#"{"sex":"K","age":41,"pace":6.5}"#));

    let err = trigger(&extractor, &BrokenPredictor, "text").await.unwrap_err();

    assert!(matches!(err, CliError::Prediction(_)));
    assert!(err.to_string().contains("unknown level"));
}

#[tokio::test]
async fn test_each_trigger_calls_model_once() {
    let mut llm = MockProvider::new(r#"{"sex":null,"age":null,"pace":null}"#);
    llm.add_response("first", r#"{"sex":"M","age":30,"pace":5.0}"#);
    llm.add_response("second", r#"{"sex":"K","age":30,"pace":5.0}"#);
    let extractor = extractor(llm.clone());
    let predictor = StubPredictor::new(6000.0);

    trigger(&extractor, &predictor, "first").await.unwrap();
    trigger(&extractor, &predictor, "second").await.unwrap();
    trigger(&extractor, &predictor, "third").await.unwrap();

    assert_eq!(llm.call_count(), 3);
    assert_eq!(predictor.calls(), 2);
}

#[tokio::test]
async fn test_with_shipped_pipeline() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/half_marathon_pipeline.json");
    let pipeline = LinearPipeline::load(path).unwrap();
    let extractor = extractor(MockProvider::new(r#"{"sex":"M","age":37,"pace":5.0}"#));

    let outcome = trigger(&extractor, &pipeline, "text").await.unwrap();

    // -300 + 37 * 8 + 5.0 * 1380
    assert_eq!(outcome.seconds(), Some(6896.0));
    let fields = outcome.extraction().fields().copied().unwrap();
    assert_eq!(fields.sex, Some(Sex::Male));
}

#[tokio::test]
async fn test_json_output_for_rejection() {
    let extractor = extractor(MockProvider::new(r#"{"sex":"K","age":null,"pace":6.5}"#));
    let predictor = StubPredictor::new(5000.12);
    let formatter = Formatter::new(OutputFormat::Json, false);

    let outcome = trigger(&extractor, &predictor, "kobieta").await.unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&formatter.format_outcome(&outcome).unwrap()).unwrap();

    assert_eq!(value["extracted"]["sex"], "K");
    assert!(value["extracted"]["age"].is_null());
    assert_eq!(value["error"], "missing sex, age or 5 km pace");
}
