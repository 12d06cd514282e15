//! Canned sample records, folders and files.

use extractor_core::{CellValue, Entity, RecordSet};

use crate::drive::{ContractSummary, DriveFile, DriveFolder};

fn t(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn i(v: i64) -> CellValue {
    CellValue::Integer(v)
}

fn n(v: f64) -> CellValue {
    CellValue::Number(v)
}

/// Zip each row with the entity's declared columns.
fn records(entity: Entity, rows: Vec<Vec<CellValue>>) -> RecordSet {
    rows.into_iter()
        .map(|row| {
            entity
                .columns()
                .iter()
                .map(|c| c.to_string())
                .zip(row)
                .collect()
        })
        .collect()
}

pub fn contracts() -> RecordSet {
    records(
        Entity::Contract,
        vec![
            vec![t("CNT-001"), t("ABC Corporation"), i(50000), t("2024-01-01"), t("2024-12-31"), t("Active"), t("Service Agreement")],
            vec![t("CNT-002"), t("XYZ Industries Ltd"), i(75000), t("2024-02-01"), t("2025-01-31"), t("Active"), t("Licensing Deal")],
            vec![t("CNT-003"), t("Global Tech Solutions"), i(120000), t("2024-03-01"), t("2025-02-28"), t("Pending"), t("Partnership Agreement")],
        ],
    )
}

pub fn subscriptions() -> RecordSet {
    records(
        Entity::Subscription,
        vec![
            vec![t("SUB-001"), t("Premium Identity Verification"), n(299.99), t("Active"), t("2024-01-15"), t("Monthly")],
            vec![t("SUB-002"), t("Standard Background Check"), n(199.99), t("Active"), t("2024-02-01"), t("Quarterly")],
            vec![t("SUB-003"), t("Enhanced Due Diligence"), n(449.99), t("Trial"), t("2024-03-10"), t("Annual")],
        ],
    )
}

pub fn line_items() -> RecordSet {
    records(
        Entity::LineItemSource,
        vec![
            vec![t("LI-001"), t("Identity Verification - Basic"), i(100), n(2.99), n(299.00), t("Verification")],
            vec![t("LI-002"), t("Background Check - Standard"), i(50), n(5.99), n(299.50), t("Screening")],
            vec![t("LI-003"), t("Document Verification"), i(75), n(3.49), n(261.75), t("Document")],
            vec![t("LI-004"), t("AML Screening"), i(25), n(8.99), n(224.75), t("Compliance")],
        ],
    )
}

pub fn consumption_schedule(entity: Entity) -> RecordSet {
    records(
        entity,
        vec![
            vec![t("SCH-001"), t("Q1 2024"), i(1000), i(850), i(150), t("85%")],
            vec![t("SCH-002"), t("Q2 2024"), i(1200), i(900), i(300), t("75%")],
            vec![t("SCH-003"), t("Q3 2024"), i(1500), i(1100), i(400), t("73%")],
        ],
    )
}

pub fn consumption_rate(entity: Entity) -> RecordSet {
    records(
        entity,
        vec![
            vec![t("RT-001"), t("Basic Verification"), n(1.99), t("Standard"), i(100), i(999)],
            vec![t("RT-002"), t("Enhanced Check"), n(3.99), t("Premium"), i(500), i(1999)],
            vec![t("RT-003"), t("Document Scan"), n(2.49), t("Standard"), i(200), i(999)],
            vec![t("RT-004"), t("Real-time Monitoring"), n(5.99), t("Enterprise"), i(1000), i(9999)],
        ],
    )
}

/// All seven record sets in extraction order. The Lis tables reuse the Sub samples.
pub fn record_sets() -> Vec<RecordSet> {
    vec![
        contracts(),
        subscriptions(),
        line_items(),
        consumption_schedule(Entity::SubConsumptionSchedule),
        consumption_rate(Entity::SubConsumptionRate),
        consumption_schedule(Entity::LisConsumptionSchedule),
        consumption_rate(Entity::LisConsumptionRate),
    ]
}

pub fn folders() -> Vec<DriveFolder> {
    [
        ("folder_001", "Contracts 2024"),
        ("folder_002", "Legal Documents"),
        ("folder_003", "Client Files - Q1"),
        ("folder_004", "Service Agreements"),
    ]
    .into_iter()
    .map(|(id, name)| DriveFolder {
        id: id.into(),
        name: name.into(),
        parents: vec!["root".into()],
    })
    .collect()
}

pub fn pdf_files() -> Vec<DriveFile> {
    [
        ("pdf_001", "Contract_ABC_Corporation.pdf", 2_048_000, "2024-01-15T10:30:00Z"),
        ("pdf_002", "Agreement_XYZ_Industries.pdf", 1_536_000, "2024-01-20T14:45:00Z"),
        ("pdf_003", "Service_Contract_GlobalTech.pdf", 3_072_000, "2024-02-01T09:15:00Z"),
        ("pdf_004", "Partnership_Agreement_TechCorp.pdf", 2_560_000, "2024-02-10T16:20:00Z"),
        ("pdf_005", "Licensing_Deal_InnovateAI.pdf", 1_792_000, "2024-02-15T11:10:00Z"),
    ]
    .into_iter()
    .map(|(id, name, size, modified)| DriveFile {
        id: id.into(),
        name: name.into(),
        mime_type: "application/pdf".into(),
        size: Some(size),
        modified_time: Some(modified.into()),
    })
    .collect()
}

pub fn summaries() -> Vec<ContractSummary> {
    [
        ("Contract_ABC_Corporation.pdf", "2024-01-15", "ABC Corporation", "$50,000", "Service Agreement", "Active"),
        ("Agreement_XYZ_Industries.pdf", "2024-01-20", "XYZ Industries Ltd", "$75,000", "Licensing Deal", "Active"),
        ("Service_Contract_GlobalTech.pdf", "2024-02-01", "Global Tech Solutions", "$120,000", "Partnership Agreement", "Pending"),
    ]
    .into_iter()
    .map(|(filename, date, party, value, kind, status)| ContractSummary {
        filename: filename.into(),
        contract_date: date.into(),
        party_1: party.into(),
        party_2: "Trulioo Inc.".into(),
        contract_value: value.into(),
        contract_type: kind.into(),
        status: status.into(),
    })
    .collect()
}
