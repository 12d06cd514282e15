use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::info;

use extractor_core::{ExtractorConfig, ExtractorError, ProgressReporter, ProgressUpdate, TableSet, assemble};
use extractor_docs::csv::{batch_file_name, generate_csv};
use extractor_docs::{ExportOptions, export_table_set, save_atomic};
use extractor_integrations::{
    ContractSummary, Credentials, DemoDocumentStore, DemoExtractionProvider, DocumentRef,
    DocumentStore, extract_folder, find_folder, load_response_file, run_extraction,
};

// ---------------------------------------------------------------------------
// Document store listings
// ---------------------------------------------------------------------------

pub async fn folders(config: &ExtractorConfig) -> Result<()> {
    let store = DemoDocumentStore::new(config.step_delay_scale);
    let folders = store.list_folders().await?;
    for folder in folders {
        println!("{:<12} {}", folder.id, folder.name);
    }
    Ok(())
}

pub async fn files(config: &ExtractorConfig, folder: &str) -> Result<()> {
    let store = DemoDocumentStore::new(config.step_delay_scale);
    let folder = find_folder(&store, folder).await?;
    let files = store.list_pdfs(&folder.id).await?;

    println!("Selected Folder: {}", folder.name);
    println!("PDF Files Found: {}", files.len());
    println!();
    println!("{:<40} {:>12}  {}", "Name", "Size", "Modified");
    for file in &files {
        println!(
            "{:<40} {:>12}  {}",
            file.name,
            file.size_label(),
            file.modified_date()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Single-document extraction
// ---------------------------------------------------------------------------

pub async fn extract(
    config: &ExtractorConfig,
    document: &str,
    out: Option<PathBuf>,
    credentials: &Credentials,
) -> Result<()> {
    let store = DemoDocumentStore::new(config.step_delay_scale);
    let document = resolve_document(&store, document).await?;
    let provider = DemoExtractionProvider::new(config.step_delay_scale);
    let timeout = config.extraction_timeout_secs.map(Duration::from_secs);

    let (mut progress, rx) = ProgressReporter::channel();
    let printer = spawn_progress_printer(rx);
    let result = run_extraction(&provider, &document, credentials, timeout, &mut progress).await;
    drop(progress);
    let _ = printer.await;

    let tables = result?;
    println!("Extraction completed successfully!");
    print_preview(&tables);
    write_workbook(config, &tables, out)?;
    Ok(())
}

/// Export a saved provider response without calling any provider.
pub fn export(config: &ExtractorConfig, response: &Path, out: Option<PathBuf>) -> Result<()> {
    let response = load_response_file(response)?;
    let tables = assemble(response.into_record_sets())?;
    print_preview(&tables);
    write_workbook(config, &tables, out)?;
    Ok(())
}

/// Resolve a local file path, or else a document store file by id or name.
pub async fn resolve_document(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<DocumentRef, ExtractorError> {
    let path = Path::new(key);
    if path.is_file() {
        return Ok(DocumentRef::file(path));
    }

    let folders = store.list_folders().await.map_err(ExtractorError::upstream)?;
    for folder in &folders {
        let files = store
            .list_pdfs(&folder.id)
            .await
            .map_err(ExtractorError::upstream)?;
        if let Some(file) = files.into_iter().find(|f| f.id == key || f.name == key) {
            return Ok(DocumentRef::Drive {
                id: file.id,
                name: file.name,
            });
        }
    }

    Err(ExtractorError::NotFound(format!("document '{key}'")))
}

fn write_workbook(config: &ExtractorConfig, tables: &TableSet, out: Option<PathBuf>) -> Result<PathBuf> {
    let bytes = export_table_set(tables, &ExportOptions::from(config))?;
    let path = out.unwrap_or_else(|| config.output_path(&config.export_file_name));
    save_atomic(&path, &bytes).with_context(|| format!("Failed to save {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(path)
}

/// One line per sheet: sheet name, label, row and column counts.
pub fn preview_lines(tables: &TableSet) -> Vec<String> {
    tables
        .tables()
        .iter()
        .map(|t| {
            format!(
                "{:<24} {:<26} {:>4} rows  {:>2} columns",
                t.entity.sheet_name(),
                t.entity.title(),
                t.row_count(),
                t.columns.len()
            )
        })
        .collect()
}

fn print_preview(tables: &TableSet) {
    for line in preview_lines(tables) {
        println!("{line}");
    }
}

// ---------------------------------------------------------------------------
// Folder extraction
// ---------------------------------------------------------------------------

pub async fn batch(config: &ExtractorConfig, folder: &str, out: Option<PathBuf>) -> Result<()> {
    let store = DemoDocumentStore::new(config.step_delay_scale);
    let folder = find_folder(&store, folder).await?;
    println!("Extracting from PDF files in '{}'", folder.name);

    let (mut progress, rx) = ProgressReporter::channel();
    let printer = spawn_progress_printer(rx);
    let result = extract_folder(&store, &folder, &mut progress).await;
    drop(progress);
    let _ = printer.await;
    let report = result?;

    println!(
        "Successfully extracted information from {} of {} files",
        report.extracted(),
        report.files_found()
    );
    for name in &report.skipped {
        println!("  skipped: {name}");
    }

    let csv = generate_csv(&ContractSummary::CSV_HEADERS, &report.rows())?;
    let path = out.unwrap_or_else(|| config.output_path(&batch_file_name(&chrono::Local::now())));
    save_atomic(&path, csv.as_bytes()).with_context(|| format!("Failed to save {}", path.display()))?;
    info!(path = %path.display(), rows = report.extracted(), "batch results saved");
    println!("Saved {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress display
// ---------------------------------------------------------------------------

fn format_progress(update: &ProgressUpdate) -> String {
    format!("[{:>3.0}%] {}", update.fraction * 100.0, update.message)
}

fn spawn_progress_printer(mut rx: UnboundedReceiver<ProgressUpdate>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            println!("{}", format_progress(&update));
        }
    })
}
