use extractor_core::{CellValue, Entity, ExtractorConfig, ExtractorError, Table, TableSet};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{debug, info};

const CURRENCY_FORMAT: &str = "$#,##0.00";

/// Largest integer magnitude an Excel number (an f64) holds exactly.
const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// Cosmetic settings for the exported workbook.
///
/// Excel stores numbers as f64, so integers beyond 2^53 are written as text
/// to keep every digit. Such cells never get the currency format.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Width applied to every used column on every sheet.
    pub column_width: f64,
    /// Display currency columns as `$#,##0.00`. Cell values are unchanged.
    pub currency_format: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            column_width: 15.0,
            currency_format: true,
        }
    }
}

impl From<&ExtractorConfig> for ExportOptions {
    fn from(config: &ExtractorConfig) -> Self {
        Self {
            column_width: config.column_width,
            currency_format: config.currency_format,
        }
    }
}

/// Export an assembled [`TableSet`] as an XLSX workbook.
pub fn export_table_set(tables: &TableSet, options: &ExportOptions) -> Result<Vec<u8>, ExtractorError> {
    export_tables(tables.tables(), options)
}

/// Export seven tables as one XLSX workbook, one sheet per table.
///
/// Sheets are bound by position to [`Entity::ALL`]. Every table is checked
/// before anything is written, so a shape error never yields a document.
/// Returns the raw bytes of the xlsx file.
pub fn export_tables(tables: &[Table], options: &ExportOptions) -> Result<Vec<u8>, ExtractorError> {
    check_shape(tables)?;

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let currency_format = Format::new().set_num_format(CURRENCY_FORMAT);

    for table in tables {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, table, options, &header_format, &currency_format).map_err(|e| {
            ExtractorError::Export(format!(
                "failed to write sheet {}: {e}",
                table.entity.sheet_name()
            ))
        })?;
        debug!(
            sheet = table.entity.sheet_name(),
            rows = table.row_count(),
            "wrote sheet"
        );
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| ExtractorError::Export(format!("failed to save workbook to buffer: {e}")))?;

    info!(bytes = bytes.len(), "exported workbook");
    Ok(bytes)
}

fn check_shape(tables: &[Table]) -> Result<(), ExtractorError> {
    if tables.len() != Entity::COUNT {
        return Err(ExtractorError::Shape(format!(
            "expected {} tables, got {}",
            Entity::COUNT,
            tables.len()
        )));
    }

    for (position, (table, expected)) in tables.iter().zip(Entity::ALL).enumerate() {
        if table.entity != expected {
            return Err(ExtractorError::Shape(format!(
                "table at position {position} is {}, expected {}",
                table.entity, expected
            )));
        }
        if u16::try_from(table.columns.len()).is_err() {
            return Err(ExtractorError::Shape(format!(
                "sheet {} has too many columns ({})",
                expected,
                table.columns.len()
            )));
        }
        if let Some((row_idx, row)) = table
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != table.columns.len())
        {
            return Err(ExtractorError::Shape(format!(
                "sheet {} row {row_idx} has {} cells, header has {}",
                expected,
                row.len(),
                table.columns.len()
            )));
        }
    }

    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    table: &Table,
    options: &ExportOptions,
    header_format: &Format,
    currency_format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(table.entity.sheet_name())?;

    for (col, header) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, header_format)?;
    }

    let currency_columns: Vec<bool> = table
        .columns
        .iter()
        .map(|c| options.currency_format && table.entity.is_currency_column(c))
        .collect();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            match cell {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    worksheet.write_boolean(excel_row, col, *b)?;
                }
                CellValue::Integer(i) if i.unsigned_abs() > MAX_EXACT_INTEGER as u64 => {
                    debug!(value = *i, col = col_idx, "integer exceeds f64 precision, writing as text");
                    worksheet.write_string(excel_row, col, i.to_string())?;
                }
                CellValue::Integer(_) | CellValue::Number(_) => {
                    let num = cell.as_f64().unwrap_or_default();
                    if currency_columns[col_idx] {
                        worksheet.write_number_with_format(excel_row, col, num, currency_format)?;
                    } else {
                        worksheet.write_number(excel_row, col, num)?;
                    }
                }
                CellValue::Text(s) => {
                    worksheet.write_string(excel_row, col, s)?;
                }
            }
        }
    }

    for col in 0..table.columns.len() {
        worksheet.set_column_width(col as u16, options.column_width)?;
    }

    Ok(())
}
