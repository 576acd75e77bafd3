//! Integration tests for the Field Extractor

#[cfg(test)]
mod tests {
    use crate::{ExtractionRequest, ExtractionResult, ExtractorConfig, FieldExtractor, SPAN_NAME};
    use pacer_domain::{ChatRequest, LlmProvider, Sex, TraceOutcome, TraceRecord, TraceSink};
    use pacer_llm::{LlmError, MockProvider};
    use pacer_observe::{RecordingSink, TraceError};

    fn extractor_with(
        llm: MockProvider,
        sink: RecordingSink,
    ) -> FieldExtractor<MockProvider, RecordingSink> {
        FieldExtractor::new(llm, sink, ExtractorConfig::default())
    }

    struct PanickingProvider;

    impl LlmProvider for PanickingProvider {
        type Error = LlmError;

        fn complete(&self, _request: &ChatRequest) -> Result<String, Self::Error> {
            panic!("provider client bug");
        }
    }

    struct PanickingSink;

    impl TraceSink for PanickingSink {
        type Error = TraceError;

        fn record(&self, _record: &TraceRecord) -> Result<(), Self::Error> {
            panic!("tracing client bug");
        }
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let llm = MockProvider::new(r#"{"sex":"M","age":37,"pace":5.23}"#);
        let extractor = extractor_with(llm.clone(), RecordingSink::new());

        let result = extractor
            .extract(ExtractionRequest::new(
                "I am a man, 37 years old, 5km pace 5.23 min/km",
            ))
            .await;

        let profile = result.complete().expect("result should be complete");
        assert_eq!(profile.sex, Sex::Male);
        assert_eq!(profile.age, 37);
        assert_eq!(profile.pace_per_km, 5.23);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_extraction_with_no_data() {
        let llm = MockProvider::new(r#"{"sex":null,"age":null,"pace":null}"#);
        let extractor = extractor_with(llm, RecordingSink::new());

        let result = extractor.extract(ExtractionRequest::new("hello")).await;

        assert!(result.complete().is_none());
        assert!(result.error().is_none());
    }

    #[tokio::test]
    async fn test_extraction_with_provider_error() {
        let extractor = extractor_with(MockProvider::failing("timeout"), RecordingSink::new());

        let result = extractor.extract(ExtractionRequest::new("anything")).await;

        let error = result.error().expect("provider error should fail the result");
        assert!(!error.is_empty());
        assert!(error.contains("timeout"));
    }

    #[tokio::test]
    async fn test_extraction_with_invalid_json() {
        let extractor = extractor_with(MockProvider::new("This is not JSON"), RecordingSink::new());

        let result = extractor.extract(ExtractionRequest::new("Some text")).await;
        assert!(matches!(result, ExtractionResult::Failed { .. }));
    }

    #[tokio::test]
    async fn test_extraction_with_fenced_json() {
        let llm = MockProvider::new("```json\n{\"sex\":\"M\",\"age\":37,\"pace\":5.23}\n```");
        let extractor = extractor_with(llm, RecordingSink::new());

        let result = extractor.extract(ExtractionRequest::new("Some text")).await;
        assert!(result.error().is_some(), "fenced JSON must not be salvaged");
    }

    #[tokio::test]
    async fn test_extraction_zero_age_is_incomplete() {
        let llm = MockProvider::new(r#"{"sex":"M","age":0,"pace":5.23}"#);
        let extractor = extractor_with(llm, RecordingSink::new());

        let result = extractor.extract(ExtractionRequest::new("newborn runner")).await;

        // Well-formed, no error, yet rejected by the all-or-nothing check
        assert!(result.error().is_none());
        assert_eq!(result.fields().unwrap().age, Some(0));
        assert!(result.complete().is_none());
    }

    #[tokio::test]
    async fn test_empty_text_is_passed_through() {
        let llm = MockProvider::new(r#"{"sex":null,"age":null,"pace":null}"#);
        let extractor = extractor_with(llm.clone(), RecordingSink::new());

        extractor.extract(ExtractionRequest::new("")).await;

        assert_eq!(llm.call_count(), 1);
        assert_eq!(llm.last_request().unwrap().last_user_content(), Some(""));
    }

    #[tokio::test]
    async fn test_panicking_provider_is_contained() {
        let extractor =
            FieldExtractor::new(PanickingProvider, RecordingSink::new(), ExtractorConfig::default());

        let result = extractor.extract(ExtractionRequest::new("text")).await;
        assert!(result.error().unwrap().starts_with("Extraction task failed"));
    }

    #[tokio::test]
    async fn test_trace_recorded_on_success() {
        let sink = RecordingSink::new();
        let llm = MockProvider::new(r#"{"sex":"K","age":29,"pace":6.1}"#);
        let extractor = extractor_with(llm, sink.clone());

        extractor.extract(ExtractionRequest::new("kobieta, 29 lat")).await;

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, SPAN_NAME);
        assert_eq!(records[0].model, "gpt-4o");
        assert_eq!(records[0].input, "kobieta, 29 lat");
        match &records[0].outcome {
            TraceOutcome::Output(json) => assert!(json.contains("\"K\"")),
            other => panic!("Expected output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_trace_recorded_on_failure() {
        let sink = RecordingSink::new();
        let extractor = extractor_with(MockProvider::failing("rate limited"), sink.clone());

        extractor.extract(ExtractionRequest::new("text")).await;

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_error());
    }

    #[tokio::test]
    async fn test_trace_failure_does_not_mask_result() {
        let llm = MockProvider::new(r#"{"sex":"M","age":37,"pace":5.23}"#);
        let extractor = extractor_with(llm, RecordingSink::failing("tracing offline"));

        let result = extractor.extract(ExtractionRequest::new("text")).await;
        assert!(result.complete().is_some());
    }

    #[tokio::test]
    async fn test_panicking_sink_does_not_mask_result() {
        let llm = MockProvider::new(r#"{"sex":"M","age":37,"pace":5.23}"#);
        let extractor = FieldExtractor::new(llm, PanickingSink, ExtractorConfig::default());

        let result = extractor.extract(ExtractionRequest::new("text")).await;

        assert!(result.error().is_none());
        let profile = result.complete().expect("sink panic must not discard the result");
        assert_eq!(profile.sex, Sex::Male);
        assert_eq!(profile.age, 37);
    }

    #[tokio::test]
    async fn test_panicking_sink_does_not_mask_error() {
        let extractor = FieldExtractor::new(
            MockProvider::failing("upstream 500"),
            PanickingSink,
            ExtractorConfig::default(),
        );

        let result = extractor.extract(ExtractionRequest::new("text")).await;
        assert!(result.error().unwrap().contains("upstream 500"));
    }

    #[tokio::test]
    async fn test_trace_failure_does_not_mask_error() {
        let extractor = extractor_with(
            MockProvider::failing("upstream 500"),
            RecordingSink::failing("tracing offline"),
        );

        let result = extractor.extract(ExtractionRequest::new("text")).await;
        let error = result.error().unwrap();
        assert!(error.contains("upstream 500"));
        assert!(!error.contains("tracing offline"));
    }

    #[tokio::test]
    async fn test_extract_with_model() {
        let sink = RecordingSink::new();
        let llm = MockProvider::new(r#"{"sex":"M","age":50,"pace":4.8}"#);
        let extractor = extractor_with(llm.clone(), sink.clone());

        let result = extractor.extract_with_model("text", "gpt-4o-mini").await;

        assert!(result.complete().is_some());
        assert_eq!(llm.last_request().unwrap().model, "gpt-4o-mini");
        assert_eq!(sink.records()[0].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_no_sink_configured() {
        let llm = MockProvider::new(r#"{"sex":"M","age":50,"pace":4.8}"#);
        let extractor =
            FieldExtractor::new(llm, None::<RecordingSink>, ExtractorConfig::default());

        let result = extractor.extract(ExtractionRequest::new("text")).await;
        assert!(result.complete().is_some());
    }
}
