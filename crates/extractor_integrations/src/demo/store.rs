use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{data, scaled_sleep};
use crate::drive::{ContractSummary, DocumentStore, DriveFile, DriveFolder};

/// Per-file processing delay in milliseconds.
const SUMMARIZE_DELAY_MS: u64 = 1000;

/// Simulated document store with fixed folders and files.
///
/// Every folder lists the same five PDFs; three of them carry a canned
/// contract summary.
pub struct DemoDocumentStore {
    delay_scale: f64,
    folders: Vec<DriveFolder>,
    files: Vec<DriveFile>,
    summaries: Vec<ContractSummary>,
}

impl DemoDocumentStore {
    /// `delay_scale` multiplies the per-file delay; 0 runs instantly.
    pub fn new(delay_scale: f64) -> Self {
        Self {
            delay_scale,
            folders: data::folders(),
            files: data::pdf_files(),
            summaries: data::summaries(),
        }
    }
}

#[async_trait]
impl DocumentStore for DemoDocumentStore {
    async fn list_folders(&self) -> Result<Vec<DriveFolder>> {
        Ok(self.folders.clone())
    }

    async fn list_pdfs(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        if !self.folders.iter().any(|f| f.id == folder_id) {
            anyhow::bail!("folder {folder_id} does not exist");
        }
        debug!(folder_id, files = self.files.len(), "listing PDFs");
        Ok(self.files.clone())
    }

    async fn summarize(&self, file: &DriveFile) -> Result<Option<ContractSummary>> {
        scaled_sleep(SUMMARIZE_DELAY_MS, self.delay_scale).await;
        Ok(self
            .summaries
            .iter()
            .find(|s| s.filename == file.name)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::find_folder;
    use extractor_core::ExtractorError;

    #[tokio::test]
    async fn test_lists_four_folders_under_root() {
        let store = DemoDocumentStore::new(0.0);
        let folders = store.list_folders().await.unwrap();
        assert_eq!(folders.len(), 4);
        assert!(folders.iter().all(|f| f.parents == vec!["root"]));
    }

    #[tokio::test]
    async fn test_lists_five_pdfs() {
        let store = DemoDocumentStore::new(0.0);
        let files = store.list_pdfs("folder_003").await.unwrap();
        assert_eq!(files.len(), 5);
        assert_eq!(files[0].size_label(), "2000.0 KB");
        assert_eq!(files[4].modified_date(), "2024-02-15");
    }

    #[tokio::test]
    async fn test_find_folder_by_id_or_name() {
        let store = DemoDocumentStore::new(0.0);
        let by_id = find_folder(&store, "folder_004").await.unwrap();
        let by_name = find_folder(&store, "Service Agreements").await.unwrap();
        assert_eq!(by_id, by_name);

        let err = find_folder(&store, "Archive").await.unwrap_err();
        assert!(matches!(err, ExtractorError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_summarize_known_and_unknown_files() {
        let store = DemoDocumentStore::new(0.0);
        let files = store.list_pdfs("folder_001").await.unwrap();

        let known = store.summarize(&files[0]).await.unwrap().unwrap();
        assert_eq!(known.party_1, "ABC Corporation");
        assert_eq!(known.party_2, "Trulioo Inc.");

        assert!(store.summarize(&files[3]).await.unwrap().is_none());
    }
}
