use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};

/// Generate a CSV string from headers and rows.
///
/// Each field is properly quoted/escaped by the `csv` crate.
pub fn generate_csv<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(headers)
        .context("Failed to write header record")?;

    for row in rows {
        let fields: Vec<&str> = row.iter().map(|s| s.as_ref()).collect();
        writer
            .write_record(&fields)
            .context("Failed to write data record")?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;

    String::from_utf8(bytes).context("CSV output contained invalid UTF-8")
}

/// File name for a batch extraction export, e.g.
/// `google_drive_extraction_20240115_103000.csv`.
pub fn batch_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("google_drive_extraction_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_generate_csv_basic() {
        let headers = &["filename", "status"];
        let rows = vec![
            vec!["Contract_ABC_Corporation.pdf", "Active"],
            vec!["Service_Contract_GlobalTech.pdf", "Pending"],
        ];
        let result = generate_csv(headers, &rows).unwrap();
        assert!(result.starts_with("filename,status\n"));
        assert!(result.contains("Service_Contract_GlobalTech.pdf,Pending"));
    }

    #[test]
    fn test_generate_csv_quotes_commas() {
        let headers = &["contract_value"];
        let rows = vec![vec!["$50,000".to_string()]];
        let result = generate_csv(headers, &rows).unwrap();
        // Fields containing commas should be quoted
        assert!(result.contains("\"$50,000\""));
    }

    #[test]
    fn test_generate_csv_empty_rows() {
        let headers = &["A", "B"];
        let rows: Vec<Vec<String>> = vec![];
        let result = generate_csv(headers, &rows).unwrap();
        assert_eq!(result.lines().count(), 1);
    }

    #[test]
    fn test_batch_file_name() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            batch_file_name(&at),
            "google_drive_extraction_20240115_103000.csv"
        );
    }
}
