use extractor_core::{ExtractorError, ProgressReporter};
use tracing::{info, warn};

use crate::drive::{ContractSummary, DocumentStore, DriveFile, DriveFolder};

/// Outcome of extracting every PDF in a folder.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub folder: DriveFolder,
    pub files: Vec<DriveFile>,
    pub summaries: Vec<ContractSummary>,
    /// Names of files that yielded no summary.
    pub skipped: Vec<String>,
}

impl BatchReport {
    pub fn files_found(&self) -> usize {
        self.files.len()
    }

    pub fn extracted(&self) -> usize {
        self.summaries.len()
    }

    /// Summary rows in CSV column order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.summaries.iter().map(ContractSummary::to_row).collect()
    }
}

/// Summarize every PDF in `folder`, in listing order.
///
/// Reports `(i + 1) / n` after each file and ends at 1.0. Any store failure
/// aborts the whole batch.
pub async fn extract_folder(
    store: &dyn DocumentStore,
    folder: &DriveFolder,
    progress: &mut ProgressReporter,
) -> Result<BatchReport, ExtractorError> {
    let files: Vec<DriveFile> = store
        .list_pdfs(&folder.id)
        .await
        .map_err(ExtractorError::upstream)?
        .into_iter()
        .filter(DriveFile::is_pdf)
        .collect();

    info!(folder = %folder.name, files = files.len(), "starting folder extraction");

    let total = files.len();
    let mut summaries = Vec::new();
    let mut skipped = Vec::new();

    for (i, file) in files.iter().enumerate() {
        progress.report(
            i as f64 / total as f64,
            format!("Processing: {} ({}/{})", file.name, i + 1, total),
        );

        match store.summarize(file).await.map_err(ExtractorError::upstream)? {
            Some(summary) => summaries.push(summary),
            None => {
                warn!(file = %file.name, "no contract details extracted");
                skipped.push(file.name.clone());
            }
        }

        progress.report((i + 1) as f64 / total as f64, format!("Processed: {}", file.name));
    }

    progress.finish("Extraction completed!");
    info!(
        extracted = summaries.len(),
        skipped = skipped.len(),
        "folder extraction finished"
    );

    Ok(BatchReport {
        folder: folder.clone(),
        files,
        summaries,
        skipped,
    })
}
