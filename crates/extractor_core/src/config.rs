use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExtractorError;

/// Default workbook file name offered for a single-document extraction.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "Legacy_Data_Line_Items.xlsx";

/// Application configuration stored at `~/.contract_extractor/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    // Extraction
    pub extraction_endpoint: String,
    pub extraction_timeout_secs: Option<u64>,
    /// Multiplier applied to the simulated pipeline's step delays. 0 disables them.
    pub step_delay_scale: f64,

    // Export
    pub column_width: f64,
    pub currency_format: bool,
    pub export_file_name: String,
    pub output_dir: Option<PathBuf>,

    // General
    pub log_level: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            extraction_endpoint: "dummy_endpoint".into(),
            extraction_timeout_secs: None,
            step_delay_scale: 1.0,
            column_width: 15.0,
            currency_format: true,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.into(),
            output_dir: None,
            log_level: "info".into(),
        }
    }
}

impl ExtractorConfig {
    /// Returns the base config directory: `~/.contract_extractor/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".contract_extractor"))
    }

    /// Returns the config file path: `~/.contract_extractor/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.contract_extractor/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Ensures all required directories exist.
    pub fn ensure_dirs() -> Result<()> {
        for dir in [Self::base_dir()?, Self::logs_dir()?] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    /// Loads config from disk, or creates default if missing.
    pub fn load() -> Result<Self> {
        Self::ensure_dirs()?;
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load config from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            config.validate()?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Saves config to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// Save config to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Reject values the exporter and pipeline cannot use.
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.column_width.is_nan() || self.column_width <= 0.0 || self.column_width > 255.0 {
            return Err(ExtractorError::Config(format!(
                "column_width must be in (0, 255], got {}",
                self.column_width
            )));
        }
        if self.step_delay_scale.is_nan() || self.step_delay_scale < 0.0 {
            return Err(ExtractorError::Config(format!(
                "step_delay_scale must be non-negative, got {}",
                self.step_delay_scale
            )));
        }
        if self.extraction_timeout_secs == Some(0) {
            return Err(ExtractorError::Config(
                "extraction_timeout_secs must be positive when set".into(),
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ExtractorError::Config("export_file_name is empty".into()));
        }
        Ok(())
    }

    /// Where a workbook named `file_name` should be written.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}
