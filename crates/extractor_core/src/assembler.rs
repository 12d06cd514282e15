//! Record set to table assembly.
//!
//! A pure structural transform: one table per record set, same order, same
//! rows. Nothing is validated, coerced or recomputed.

use tracing::debug;

use crate::error::ExtractorError;
use crate::model::{CellValue, Entity, RecordSet, Table};

/// The seven assembled tables of one extraction, in [`Entity::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    /// All tables in positional order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The table for a given entity.
    pub fn get(&self, entity: Entity) -> &Table {
        &self.tables[entity.index()]
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(Table::row_count).sum()
    }
}

/// Assemble seven record sets into seven tables.
///
/// Columns are the union of keys across a record set's rows in first-seen
/// order; a row missing a key gets an explicit [`CellValue::Null`]. An empty
/// record set yields the entity's declared columns with no rows.
pub fn assemble(record_sets: Vec<RecordSet>) -> Result<TableSet, ExtractorError> {
    if record_sets.len() != Entity::COUNT {
        return Err(ExtractorError::Shape(format!(
            "expected {} record sets, got {}",
            Entity::COUNT,
            record_sets.len()
        )));
    }

    let tables: Vec<Table> = Entity::ALL
        .iter()
        .zip(record_sets)
        .map(|(entity, records)| assemble_table(*entity, records))
        .collect();

    debug!(
        rows = tables.iter().map(Table::row_count).sum::<usize>(),
        "assembled extraction tables"
    );

    Ok(TableSet { tables })
}

fn assemble_table(entity: Entity, records: RecordSet) -> Table {
    if records.is_empty() {
        return Table::empty(entity);
    }

    let mut columns: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .into_iter()
        .map(|mut record| {
            columns
                .iter()
                .map(|col| record.swap_remove(col).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Table {
        entity,
        columns,
        rows,
    }
}
