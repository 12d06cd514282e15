pub mod assembler;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod progress;

pub use assembler::{TableSet, assemble};
pub use config::ExtractorConfig;
pub use error::{ErrorCategory, ExtractorError};
pub use model::{CellValue, Entity, Record, RecordSet, Table};
pub use progress::{ProgressReporter, ProgressUpdate};
