use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Canonical column names (post-normalization, all lowercase)
// ---------------------------------------------------------------------------

pub const COL_DATE_TIME: &str = "date/time";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_PERSONS_INJURED: &str = "number of persons injured";
pub const COL_PEDESTRIANS_INJURED: &str = "number of pedestrians injured";
// The source dataset uses singular spellings for these two.
pub const COL_CYCLISTS_INJURED: &str = "number of cyclist injured";
pub const COL_MOTORISTS_INJURED: &str = "number of motorist injured";
pub const COL_STREET: &str = "on street name";

// ---------------------------------------------------------------------------
// CellValue – a single cell in a record
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the source CSV's loose typing.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Null,
}

impl CellValue {
    /// Numeric interpretation for thresholds, sentinels and averages.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integral interpretation for injury counts.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M")),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// CollisionRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single collision record (one row of the source table).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionRecord {
    /// Dynamic columns: column_name → value.
    pub cells: BTreeMap<String, CellValue>,
}

impl CollisionRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Numeric view of a column; `None` when absent, null or non-numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_f64)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(CellValue::as_str)
    }

    /// The canonical merged crash timestamp, present once normalized.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.get(COL_DATE_TIME).and_then(CellValue::as_timestamp)
    }
}

// ---------------------------------------------------------------------------
// CollisionTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An ordered sequence of records plus the source column order, which the
/// per-row `BTreeMap` alone would not preserve for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionTable {
    /// Column names in display order.
    pub columns: Vec<String>,
    /// All records (rows), in source order.
    pub rows: Vec<CollisionRecord>,
}

impl CollisionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
