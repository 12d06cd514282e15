mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use extractor_core::config::ExtractorConfig;
use extractor_core::{ExtractorError, logging};
use extractor_integrations::Credentials;

#[derive(Parser, Debug)]
#[command(
    name = "contract-extractor",
    version,
    about = "Extract contract tables from order forms and export them to a spreadsheet"
)]
struct Cli {
    /// Config file to use instead of ~/.contract_extractor/config.json
    #[arg(long, global = true, env = "CONTRACT_EXTRACTOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the folders available in the document store
    Folders,
    /// List the PDF files in a folder (id or name)
    Files { folder: String },
    /// Extract one document (local path, or document store id/name) into a workbook
    Extract {
        document: String,
        /// Output workbook path
        #[arg(long)]
        out: Option<PathBuf>,
        /// Extraction service endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Extraction service token
        #[arg(
            long,
            env = "CONTRACT_EXTRACTOR_TOKEN",
            hide_env_values = true,
            default_value = "dummy_token"
        )]
        token: String,
    },
    /// Export a saved extraction response (JSON) into a workbook
    Export {
        response: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Extract contract summaries from every PDF in a folder into a CSV file
    Batch {
        folder: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

async fn run(command: Command, config: &ExtractorConfig) -> Result<()> {
    match command {
        Command::Folders => commands::folders(config).await,
        Command::Files { folder } => commands::files(config, &folder).await,
        Command::Extract {
            document,
            out,
            endpoint,
            token,
        } => {
            let endpoint = endpoint.unwrap_or_else(|| config.extraction_endpoint.clone());
            let credentials = Credentials::new(endpoint, token);
            commands::extract(config, &document, out, &credentials).await
        }
        Command::Export { response, out } => commands::export(config, &response, out),
        Command::Batch { folder, out } => commands::batch(config, &folder, out).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExtractorConfig::load_from_path(path)?,
        None => ExtractorConfig::load()?,
    };

    let _guard = logging::init_logging(&config.log_level).context("Failed to initialize logging")?;
    info!("contract-extractor v{}", env!("CARGO_PKG_VERSION"));

    let result = run(cli.command, &config).await;
    if let Err(e) = &result {
        error!("{e:#}");
        if let Some(err) = e.downcast_ref::<ExtractorError>() {
            eprintln!("{}", err.user_message());
        }
    }
    result
}
