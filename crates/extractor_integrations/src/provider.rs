//! Extraction provider abstraction.
//!
//! A provider turns one source document into seven record sets. The core
//! treats it as an opaque, possibly slow call that reports progress.

use anyhow::Result;
use async_trait::async_trait;
use extractor_core::{ProgressReporter, RecordSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ── Request types ──────────────────────────────────────────────────

/// The document an extraction runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DocumentRef {
    /// A local PDF file.
    File { path: PathBuf },
    /// A file held by a document store.
    Drive { id: String, name: String },
}

impl DocumentRef {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Short name for logs and progress messages.
    pub fn display_name(&self) -> String {
        match self {
            Self::File { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Drive { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Opaque endpoint/token pair handed through to the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint: String,
    pub token: String,
}

impl Credentials {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

// ── Response types ─────────────────────────────────────────────────

/// One positional entry of a provider response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(default)]
    pub data: RecordSet,
}

/// Provider response: record sets in [`extractor_core::Entity::ALL`] order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub output_records: Vec<OutputRecord>,
}

impl ExtractionResponse {
    pub fn from_record_sets(sets: Vec<RecordSet>) -> Self {
        Self {
            output_records: sets.into_iter().map(|data| OutputRecord { data }).collect(),
        }
    }

    pub fn into_record_sets(self) -> Vec<RecordSet> {
        self.output_records.into_iter().map(|r| r.data).collect()
    }
}

// ── Provider trait ─────────────────────────────────────────────────

/// A source of extraction results.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Extract the seven record sets from `document`.
    ///
    /// Progress goes through `progress`; any error is terminal.
    async fn extract(
        &self,
        document: &DocumentRef,
        credentials: &Credentials,
        progress: &mut ProgressReporter,
    ) -> Result<ExtractionResponse>;
}
