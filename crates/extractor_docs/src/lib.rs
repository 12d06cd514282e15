// Output documents: the seven-sheet workbook and the batch summary CSV.

pub mod csv;
pub mod save;
pub mod xlsx;

pub use save::save_atomic;
pub use xlsx::{ExportOptions, export_table_set, export_tables};
