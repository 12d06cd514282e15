use std::path::Path;
use std::time::Duration;

use extractor_core::{ExtractorError, ProgressReporter, TableSet, assemble};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::provider::{Credentials, DocumentRef, ExtractionProvider, ExtractionResponse};

const COMPLETED_MESSAGE: &str = "Extraction completed!";

/// Run one extraction request and assemble its tables.
///
/// The timeout, if any, covers the whole provider call; on expiry nothing is
/// assembled. Progress always ends at 1.0 before tables are returned.
pub async fn run_extraction(
    provider: &dyn ExtractionProvider,
    document: &DocumentRef,
    credentials: &Credentials,
    timeout: Option<Duration>,
    progress: &mut ProgressReporter,
) -> Result<TableSet, ExtractorError> {
    let run_id = Uuid::new_v4();
    let span = info_span!(
        "extraction",
        %run_id,
        provider = provider.name(),
        document = %document
    );

    async move {
        info!("extraction started");
        let call = provider.extract(document, credentials, progress);

        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(timeout_secs = limit.as_secs_f64(), "extraction timed out");
                    return Err(ExtractorError::Upstream(format!(
                        "extraction timed out after {:.1}s",
                        limit.as_secs_f64()
                    )));
                }
            },
            None => call.await,
        };

        let response = result.map_err(|e| {
            warn!(error = %e, "extraction failed");
            ExtractorError::upstream(e)
        })?;

        if !progress.is_complete() {
            progress.finish(COMPLETED_MESSAGE);
        }

        let tables = assemble(response.into_record_sets())?;
        info!(rows = tables.total_rows(), "extraction finished");
        Ok(tables)
    }
    .instrument(span)
    .await
}

/// Load a previously saved provider response from a JSON file.
pub fn load_response_file(path: &Path) -> Result<ExtractionResponse, ExtractorError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ExtractorError::NotFound(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ExtractorError::Shape(format!(
            "{} is not an extraction response: {e}",
            path.display()
        ))
    })
}
