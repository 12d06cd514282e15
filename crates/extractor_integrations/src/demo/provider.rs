use anyhow::{Context, Result};
use async_trait::async_trait;
use extractor_core::ProgressReporter;
use tracing::debug;

use super::{data, scaled_sleep};
use crate::provider::{Credentials, DocumentRef, ExtractionProvider, ExtractionResponse};

/// Fixed pipeline steps: fraction, status line, delay after the step (ms).
const STEPS: [(f64, &str, u64); 5] = [
    (0.1, "Reading PDF file...", 500),
    (0.5, "PDF content extracted successfully", 500),
    (0.6, "Analyzing document content...", 800),
    (0.8, "Processing contract details...", 700),
    (1.0, "Extraction completed!", 300),
];

/// Simulated extraction service.
///
/// Walks a fixed sequence of timed steps and returns the canned sample
/// records regardless of the document's content.
pub struct DemoExtractionProvider {
    delay_scale: f64,
}

impl DemoExtractionProvider {
    /// `delay_scale` multiplies every step delay; 0 runs instantly.
    pub fn new(delay_scale: f64) -> Self {
        Self { delay_scale }
    }
}

#[async_trait]
impl ExtractionProvider for DemoExtractionProvider {
    fn name(&self) -> &str {
        "demo"
    }

    async fn extract(
        &self,
        document: &DocumentRef,
        credentials: &Credentials,
        progress: &mut ProgressReporter,
    ) -> Result<ExtractionResponse> {
        debug!(endpoint = %credentials.endpoint, "simulating extraction");

        if let DocumentRef::File { path } = document {
            tokio::fs::metadata(path)
                .await
                .with_context(|| format!("cannot open {}", path.display()))?;
        }

        for (fraction, message, delay_ms) in STEPS {
            progress.report(fraction, message);
            scaled_sleep(delay_ms, self.delay_scale).await;
        }

        Ok(ExtractionResponse::from_record_sets(data::record_sets()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run_extraction;
    use extractor_core::{Entity, ExtractorError};
    use std::time::Duration;

    fn drive_doc() -> DocumentRef {
        DocumentRef::Drive {
            id: "pdf_001".into(),
            name: "Contract_ABC_Corporation.pdf".into(),
        }
    }

    fn creds() -> Credentials {
        Credentials::new("dummy_endpoint", "dummy_token")
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_sequence() {
        let provider = DemoExtractionProvider::new(1.0);
        let (mut progress, mut rx) = ProgressReporter::channel();

        provider.extract(&drive_doc(), &creds(), &mut progress).await.unwrap();

        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }
        let fractions: Vec<f64> = updates.iter().map(|u| u.fraction).collect();
        assert_eq!(fractions, vec![0.1, 0.5, 0.6, 0.8, 1.0]);
        assert_eq!(updates[4].message, "Extraction completed!");
    }

    #[tokio::test]
    async fn test_returns_seven_record_sets() {
        let provider = DemoExtractionProvider::new(0.0);
        let mut progress = ProgressReporter::silent();
        let response = provider.extract(&drive_doc(), &creds(), &mut progress).await.unwrap();
        assert_eq!(response.output_records.len(), Entity::COUNT);
    }

    #[tokio::test]
    async fn test_missing_local_file_fails() {
        let provider = DemoExtractionProvider::new(0.0);
        let mut progress = ProgressReporter::silent();
        let doc = DocumentRef::file("/definitely/not/here/order_form.pdf");
        let err = run_extraction(&provider, &doc, &creds(), None, &mut progress)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractorError::Upstream(ref m) if m.contains("order_form.pdf")));
        assert_eq!(progress.emitted(), 0);
    }

    #[tokio::test]
    async fn test_local_file_extraction() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("order_form.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let provider = DemoExtractionProvider::new(0.0);
        let mut progress = ProgressReporter::silent();
        let tables = run_extraction(&provider, &DocumentRef::file(&path), &creds(), None, &mut progress)
            .await
            .unwrap();
        assert_eq!(tables.get(Entity::Contract).row_count(), 3);
        assert!(progress.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_timeout_aborts_demo_pipeline() {
        let provider = DemoExtractionProvider::new(1.0);
        let mut progress = ProgressReporter::silent();
        let err = run_extraction(
            &provider,
            &drive_doc(),
            &creds(),
            Some(Duration::from_millis(900)),
            &mut progress,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ExtractorError::Upstream(_)));
        assert!(!progress.is_complete());
    }
}
