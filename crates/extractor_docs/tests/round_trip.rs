//! Read exported workbooks back with calamine and compare against the input tables.

use std::io::{Cursor, Read};

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use extractor_core::{CellValue, Entity, Record, RecordSet, TableSet, assemble};
use extractor_docs::{ExportOptions, export_table_set};

/// Sheet name plus every row (header first) rendered as text.
type SheetDump = (String, Vec<Vec<String>>);

fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn read_back(bytes: Vec<u8>) -> Vec<SheetDump> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let names = workbook.sheet_names();
    names
        .into_iter()
        .map(|name| {
            let range = workbook.worksheet_range(&name).unwrap();
            let rows = range
                .rows()
                .map(|row| row.iter().map(cell_text).collect())
                .collect();
            (name, rows)
        })
        .collect()
}

/// Raw XML of one part inside the xlsx zip container.
fn xml_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

fn record(pairs: &[(&str, CellValue)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn sample_tables() -> TableSet {
    let schedule = vec![
        record(&[
            ("Schedule ID", "SCH-001".into()),
            ("Period", "Q1 2024".into()),
            ("Allocated Units", CellValue::Integer(1000)),
            ("Used Units", CellValue::Integer(850)),
            ("Remaining Units", CellValue::Integer(150)),
            ("Usage Percentage", "85%".into()),
        ]),
        record(&[
            ("Schedule ID", "SCH-002".into()),
            ("Period", "Q2 2024".into()),
            ("Allocated Units", CellValue::Integer(1200)),
            ("Used Units", CellValue::Integer(900)),
            ("Remaining Units", CellValue::Integer(300)),
            ("Usage Percentage", "75%".into()),
        ]),
    ];
    let mut sets: Vec<RecordSet> = vec![Vec::new(); Entity::COUNT];
    sets[0] = vec![record(&[
        ("Contract ID", "CNT-001".into()),
        ("Client Name", "ABC Corporation".into()),
        ("Contract Value", CellValue::Integer(50000)),
        ("Status", "Active".into()),
    ])];
    sets[2] = vec![
        record(&[
            ("Line Item ID", "LI-001".into()),
            ("Unit Price", CellValue::Number(2.99)),
            ("Total Amount", CellValue::Number(299.0)),
        ]),
        record(&[
            ("Line Item ID", "LI-002".into()),
            ("Category", "Screening".into()),
        ]),
    ];
    sets[3] = schedule.clone();
    sets[5] = schedule;
    assemble(sets).unwrap()
}

fn expected_rows(tables: &TableSet, entity: Entity) -> Vec<Vec<String>> {
    let table = tables.get(entity);
    let mut rows = vec![table.columns.clone()];
    rows.extend(
        table
            .rows
            .iter()
            .map(|row| row.iter().map(CellValue::to_string).collect()),
    );
    rows
}

#[test]
fn test_round_trip_preserves_sheets_headers_and_values() {
    let tables = sample_tables();
    let bytes = export_table_set(&tables, &ExportOptions::default()).unwrap();
    let sheets = read_back(bytes);

    let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
    let expected_names: Vec<&str> = Entity::ALL.iter().map(|e| e.sheet_name()).collect();
    assert_eq!(names, expected_names);

    for ((_, rows), entity) in sheets.iter().zip(Entity::ALL) {
        assert_eq!(rows, &expected_rows(&tables, entity), "sheet {entity}");
    }
}

#[test]
fn test_currency_format_does_not_change_values() {
    let tables = sample_tables();
    let plain = ExportOptions {
        currency_format: false,
        ..Default::default()
    };
    let formatted = read_back(export_table_set(&tables, &ExportOptions::default()).unwrap());
    let unformatted = read_back(export_table_set(&tables, &plain).unwrap());
    assert_eq!(formatted, unformatted);
}

#[test]
fn test_currency_format_applied_to_currency_cells() {
    let tables = sample_tables();
    let plain = ExportOptions {
        currency_format: false,
        ..Default::default()
    };
    let formatted = export_table_set(&tables, &ExportOptions::default()).unwrap();
    let unformatted = export_table_set(&tables, &plain).unwrap();

    assert!(xml_part(&formatted, "xl/styles.xml").contains(r#"formatCode="$#,##0.00""#));
    assert!(!xml_part(&unformatted, "xl/styles.xml").contains(r#"formatCode="$#,##0.00""#));

    // Contract Value is the third column, so its first data cell is C2.
    assert_eq!(tables.get(Entity::Contract).column_index("Contract Value"), Some(2));
    assert!(xml_part(&formatted, "xl/worksheets/sheet1.xml").contains(r#"<c r="C2" s="#));
    assert!(xml_part(&unformatted, "xl/worksheets/sheet1.xml").contains(r#"<c r="C2"><v>50000</v>"#));
}

#[test]
fn test_column_width_set_on_every_used_column() {
    let tables = sample_tables();
    let wide = ExportOptions {
        column_width: 30.0,
        ..Default::default()
    };
    let default_bytes = export_table_set(&tables, &ExportOptions::default()).unwrap();
    let wide_bytes = export_table_set(&tables, &wide).unwrap();

    // Excel stores widths padded to whole pixels: 15 -> 15.7109375, 30 -> 30.7109375.
    for (i, table) in tables.tables().iter().enumerate() {
        let part = format!("xl/worksheets/sheet{}.xml", i + 1);
        let n = table.columns.len();
        assert!(
            xml_part(&default_bytes, &part).contains(&format!(
                r#"<col min="1" max="{n}" width="15.7109375" customWidth="1"/>"#
            )),
            "sheet {}",
            table.entity
        );
        assert!(
            xml_part(&wide_bytes, &part).contains(&format!(
                r#"<col min="1" max="{n}" width="30.7109375" customWidth="1"/>"#
            )),
            "sheet {}",
            table.entity
        );
    }
}

#[test]
fn test_large_integers_keep_every_digit() {
    let mut sets: Vec<RecordSet> = vec![Vec::new(); Entity::COUNT];
    sets[4] = vec![record(&[
        ("Rate ID", "RT-001".into()),
        ("Max Volume", CellValue::Integer(9_007_199_254_740_993)),
        ("Min Volume", CellValue::Integer(1000)),
    ])];
    let tables = assemble(sets).unwrap();
    let sheets = read_back(export_table_set(&tables, &ExportOptions::default()).unwrap());

    let (_, rows) = &sheets[4];
    assert_eq!(rows[1], vec!["RT-001", "9007199254740993", "1000"]);
}

#[test]
fn test_export_is_idempotent() {
    let tables = sample_tables();
    let first = read_back(export_table_set(&tables, &ExportOptions::default()).unwrap());
    let second = read_back(export_table_set(&tables, &ExportOptions::default()).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_single_contract_row_scenario() {
    let mut sets: Vec<RecordSet> = vec![Vec::new(); Entity::COUNT];
    sets[0] = vec![record(&[
        ("id", "CNT-001".into()),
        ("client", "ABC Corporation".into()),
        ("value", CellValue::Integer(50000)),
        ("status", "Active".into()),
    ])];
    let tables = assemble(sets).unwrap();
    let sheets = read_back(export_table_set(&tables, &ExportOptions::default()).unwrap());

    assert_eq!(sheets.len(), 7);

    let (name, rows) = &sheets[0];
    assert_eq!(name, "Contract");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["id", "client", "value", "status"]);
    assert_eq!(rows[1], vec!["CNT-001", "ABC Corporation", "50000", "Active"]);

    for ((name, rows), entity) in sheets.iter().zip(Entity::ALL).skip(1) {
        assert_eq!(rows.len(), 1, "sheet {name} should hold only a header");
        assert_eq!(rows[0].len(), entity.columns().len());
    }
}
