//! Document store types: folders, PDF files and per-file contract summaries.
//!
//! Field names follow the Google Drive v3 JSON shape so listings can be
//! loaded from Drive-style payloads.

use anyhow::Result;
use async_trait::async_trait;
use extractor_core::ExtractorError;
use serde::{Deserialize, Serialize};

const PDF_MIME_TYPE: &str = "application/pdf";

/// A folder in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFolder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// Metadata for a single file in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "deserialize_file_size")]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_time: Option<String>,
}

fn default_mime_type() -> String {
    PDF_MIME_TYPE.to_string()
}

/// File sizes in a Drive listing are int64 values, which the JSON API sends
/// as decimal strings. Saved listings may carry plain numbers instead, and
/// folders or shortcuts carry none at all.
fn deserialize_file_size<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Bytes(u64),
        Decimal(String),
    }

    match Option::<RawSize>::deserialize(d)? {
        None => Ok(None),
        Some(RawSize::Bytes(n)) => Ok(Some(n)),
        Some(RawSize::Decimal(s)) if s.trim().is_empty() => Ok(None),
        Some(RawSize::Decimal(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| {
                <D::Error as serde::de::Error>::custom(format!("invalid file size '{s}': {e}"))
            }),
    }
}

impl DriveFile {
    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME_TYPE || self.name.to_ascii_lowercase().ends_with(".pdf")
    }

    /// Size in kilobytes with one decimal, e.g. `2000.0 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size.unwrap_or(0) as f64 / 1024.0)
    }

    /// Modification date as `YYYY-MM-DD`, or `Unknown`.
    pub fn modified_date(&self) -> &str {
        match &self.modified_time {
            Some(ts) => ts.get(..10).unwrap_or(ts),
            None => "Unknown",
        }
    }
}

/// Key fields pulled from one contract during a folder extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub filename: String,
    pub contract_date: String,
    pub party_1: String,
    pub party_2: String,
    pub contract_value: String,
    pub contract_type: String,
    pub status: String,
}

impl ContractSummary {
    pub const CSV_HEADERS: [&'static str; 7] = [
        "filename",
        "contract_date",
        "party_1",
        "party_2",
        "contract_value",
        "contract_type",
        "status",
    ];

    /// Values in [`Self::CSV_HEADERS`] order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.filename.clone(),
            self.contract_date.clone(),
            self.party_1.clone(),
            self.party_2.clone(),
            self.contract_value.clone(),
            self.contract_type.clone(),
            self.status.clone(),
        ]
    }
}

/// Read access to a folder-organised document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List the folders available for extraction.
    async fn list_folders(&self) -> Result<Vec<DriveFolder>>;

    /// List the PDF files in a folder.
    async fn list_pdfs(&self, folder_id: &str) -> Result<Vec<DriveFile>>;

    /// Summarize one file. `None` if no contract could be extracted from it.
    async fn summarize(&self, file: &DriveFile) -> Result<Option<ContractSummary>>;
}

/// Resolve a folder by id, falling back to its display name.
pub async fn find_folder(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<DriveFolder, ExtractorError> {
    let folders = store.list_folders().await.map_err(ExtractorError::upstream)?;
    folders
        .iter()
        .find(|f| f.id == key)
        .or_else(|| folders.iter().find(|f| f.name == key))
        .cloned()
        .ok_or_else(|| ExtractorError::NotFound(format!("folder '{key}'")))
}
