use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::ExtractorConfig;

/// Initializes logging with a daily-rotated file under
/// `~/.contract_extractor/logs` plus compact console output on stderr.
///
/// `RUST_LOG` wins over `level`. Returns a guard that must be kept alive for
/// the duration of the process.
pub fn init_logging(level: &str) -> Result<WorkerGuard> {
    let logs_dir = ExtractorConfig::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "contract-extractor");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

/// Initialize file-only logging to a custom directory with a custom filter.
pub fn init_logging_to_dir(logs_dir: &std::path::Path, filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "contract-extractor");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(filter))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,extractor_core={level},extractor_docs={level},extractor_integrations={level},extractor_app={level}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_to_dir_creates_directory() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let logs_dir = tmp.path().join("nested").join("logs");
        assert!(!logs_dir.exists());

        // The global subscriber can only be installed once per process, so
        // only the directory creation is asserted.
        let _guard = init_logging_to_dir(&logs_dir, "warn");
        assert!(logs_dir.exists());
    }

    #[test]
    fn test_second_init_reports_error() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let first = init_logging_to_dir(&tmp.path().join("a"), "info");
        let second = init_logging_to_dir(&tmp.path().join("b"), "info");

        // Whichever call lost the race to install the subscriber must fail
        // with a logging error rather than panic.
        if let Err(e) = second {
            assert!(e.to_string().contains("logging"), "unexpected error: {e}");
        }
        drop(first);
    }

    #[test]
    fn test_env_filter_accepts_levels() {
        for level in ["info", "debug", "warn", "trace"] {
            drop(env_filter(level));
        }
    }
}
