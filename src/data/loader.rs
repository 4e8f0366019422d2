use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::error::DataAccessError;
use super::model::{CellValue, CollisionRecord, CollisionTable};

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

pub const SOURCE_DATE: &str = "CRASH DATE";
pub const SOURCE_TIME: &str = "CRASH TIME";

/// Name of the column holding the merged crash timestamp, before the
/// normalizer renames it to the canonical `date/time`.
pub const MERGED_COLUMN: &str = "CRASH DATE_CRASH TIME";

/// Columns the rest of the pipeline relies on; absence is fatal at load.
pub const REQUIRED_SOURCE_COLUMNS: [&str; 9] = [
    SOURCE_DATE,
    SOURCE_TIME,
    "LATITUDE",
    "LONGITUDE",
    "NUMBER OF PERSONS INJURED",
    "NUMBER OF PEDESTRIANS INJURED",
    "NUMBER OF CYCLIST INJURED",
    "NUMBER OF MOTORIST INJURED",
    "ON STREET NAME",
];

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Read up to `row_limit` records from the collision CSV at `path`, merging
/// the crash date and crash time fields into one leading timestamp column.
///
/// Any other cell parses speculatively (integer, then float, then string;
/// empty → null). The result is raw: column names keep their source casing
/// and no row has been dropped yet.
pub fn load_records(path: &Path, row_limit: usize) -> Result<CollisionTable, DataAccessError> {
    let file = File::open(path).map_err(|source| DataAccessError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for required in REQUIRED_SOURCE_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataAccessError::MissingColumn(required.to_string()));
        }
    }
    let date_idx = column_index(&headers, SOURCE_DATE)?;
    let time_idx = column_index(&headers, SOURCE_TIME)?;

    // Merged column first, then the remaining source columns in order.
    let mut columns = Vec::with_capacity(headers.len() - 1);
    columns.push(MERGED_COLUMN.to_string());
    columns.extend(
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx && *i != time_idx)
            .map(|(_, h)| h.clone()),
    );

    let mut rows = Vec::new();
    for result in reader.records().take(row_limit) {
        let record = result?;

        let mut cells = BTreeMap::new();
        let merged = parse_timestamp(
            record.get(date_idx).unwrap_or(""),
            record.get(time_idx).unwrap_or(""),
        )
        .map_or(CellValue::Null, CellValue::Timestamp);
        cells.insert(MERGED_COLUMN.to_string(), merged);

        for (i, value) in record.iter().enumerate() {
            if i == date_idx || i == time_idx {
                continue;
            }
            cells.insert(headers[i].clone(), parse_cell(value));
        }
        rows.push(CollisionRecord { cells });
    }

    log::debug!("read {} records from `{}`", rows.len(), path.display());
    Ok(CollisionTable { columns, rows })
}

fn column_index(headers: &[String], name: &str) -> Result<usize, DataAccessError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataAccessError::MissingColumn(name.to_string()))
}

/// Speculative typing for a raw CSV cell.
fn parse_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(v) = raw.parse::<f64>() {
        return CellValue::Float(v);
    }
    CellValue::String(raw.to_string())
}

/// Combine the `%m/%d/%Y` crash date with the `%H:%M` crash time (seconds
/// occasionally present). Unparseable pairs yield `None`; survival of the
/// row is decided by coordinate cleaning, not time parsing.
fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%m/%d/%Y").ok()?;
    let time = time.trim();
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()?;
    Some(date.and_time(time))
}
