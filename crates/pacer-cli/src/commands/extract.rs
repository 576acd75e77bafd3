//! Extract command implementation.

use crate::error::Result;
use crate::output::Formatter;
use pacer_domain::{LlmProvider, TraceSink};
use pacer_extractor::{ExtractionRequest, FieldExtractor};
use std::fmt::Display;

/// Execute the extract command.
pub async fn execute_extract<L, S>(
    text: &str,
    extractor: &FieldExtractor<L, S>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider + Send + Sync + 'static,
    S: TraceSink + Send + Sync + 'static,
    L::Error: Display,
    S::Error: Display,
{
    let result = extractor.extract(ExtractionRequest::new(text)).await;
    let rendered = formatter.format_extraction(&result)?;

    if result.error().is_none() || formatter.is_json() {
        println!("{}", rendered);
    } else {
        eprintln!("{}", rendered);
    }

    Ok(())
}
