//! Tabular data model for extraction results.
//!
//! An extraction always yields seven record sets, one per [`Entity`], in the
//! order of [`Entity::ALL`]. Each record set is assembled into a [`Table`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Cell values
// ---------------------------------------------------------------------------

/// A single cell as produced by the extraction provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One row of a record set: column name to value, in provider order.
pub type Record = IndexMap<String, CellValue>;

/// An ordered sequence of rows for one entity.
pub type RecordSet = Vec<Record>;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

const CONTRACT_COLUMNS: &[&str] = &[
    "Contract ID",
    "Client Name",
    "Contract Value",
    "Start Date",
    "End Date",
    "Status",
    "Contract Type",
];

const SUBSCRIPTION_COLUMNS: &[&str] = &[
    "Subscription ID",
    "Service Type",
    "Monthly Fee",
    "Status",
    "Start Date",
    "Billing Cycle",
];

const LINE_ITEM_COLUMNS: &[&str] = &[
    "Line Item ID",
    "Description",
    "Quantity",
    "Unit Price",
    "Total Amount",
    "Category",
];

const SCHEDULE_COLUMNS: &[&str] = &[
    "Schedule ID",
    "Period",
    "Allocated Units",
    "Used Units",
    "Remaining Units",
    "Usage Percentage",
];

const RATE_COLUMNS: &[&str] = &[
    "Rate ID",
    "Service",
    "Rate per Unit",
    "Tier",
    "Min Volume",
    "Max Volume",
];

/// The seven extracted entities, in positional order.
///
/// Declaration order is the extraction order; [`Entity::index`] relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Contract,
    Subscription,
    LineItemSource,
    SubConsumptionSchedule,
    SubConsumptionRate,
    LisConsumptionSchedule,
    LisConsumptionRate,
}

impl Entity {
    /// Number of record sets in every extraction result.
    pub const COUNT: usize = 7;

    /// All entities in the fixed extraction order.
    pub const ALL: [Entity; Entity::COUNT] = [
        Entity::Contract,
        Entity::Subscription,
        Entity::LineItemSource,
        Entity::SubConsumptionSchedule,
        Entity::SubConsumptionRate,
        Entity::LisConsumptionSchedule,
        Entity::LisConsumptionRate,
    ];

    /// Position of this entity in the extraction result.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Worksheet name in the exported workbook.
    ///
    /// `lisConsmptionSchedule` is spelled the way downstream consumers expect.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Self::Contract => "Contract",
            Self::Subscription => "Subscription",
            Self::LineItemSource => "LineItemSource",
            Self::SubConsumptionSchedule => "subConsumptionSchedule",
            Self::SubConsumptionRate => "subConsumptionRate",
            Self::LisConsumptionSchedule => "lisConsmptionSchedule",
            Self::LisConsumptionRate => "lisConsumptionRate",
        }
    }

    /// Human-readable label used in previews.
    pub fn title(self) -> &'static str {
        match self {
            Self::Contract => "Contract Data",
            Self::Subscription => "Subscription Data",
            Self::LineItemSource => "Line Item Source",
            Self::SubConsumptionSchedule => "Sub Consumption Schedule",
            Self::SubConsumptionRate => "Sub Consumption Rate",
            Self::LisConsumptionSchedule => "LIS Consumption Schedule",
            Self::LisConsumptionRate => "LIS Consumption Rate",
        }
    }

    /// Declared column schema. Used as the header of an empty table.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Contract => CONTRACT_COLUMNS,
            Self::Subscription => SUBSCRIPTION_COLUMNS,
            Self::LineItemSource => LINE_ITEM_COLUMNS,
            Self::SubConsumptionSchedule | Self::LisConsumptionSchedule => SCHEDULE_COLUMNS,
            Self::SubConsumptionRate | Self::LisConsumptionRate => RATE_COLUMNS,
        }
    }

    /// Columns that hold currency amounts.
    pub fn is_currency_column(self, column: &str) -> bool {
        let currency: &[&str] = match self {
            Self::Contract => &["Contract Value"],
            Self::Subscription => &["Monthly Fee"],
            Self::LineItemSource => &["Unit Price", "Total Amount"],
            Self::SubConsumptionSchedule | Self::LisConsumptionSchedule => &[],
            Self::SubConsumptionRate | Self::LisConsumptionRate => &["Rate per Unit"],
        };
        currency.contains(&column)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// An assembled record set: fixed column set, ordered rows.
///
/// Every row holds exactly `columns.len()` cells when built by the
/// assembler. Tables are read-only once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub entity: Entity,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table carrying the entity's declared columns.
    pub fn empty(entity: Entity) -> Self {
        Self {
            entity,
            columns: entity.columns().iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Look up a cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }
}
