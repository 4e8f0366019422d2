use super::loader::MERGED_COLUMN;
use super::model::{CollisionRecord, CollisionTable, COL_DATE_TIME, COL_LATITUDE, COL_LONGITUDE};

/// Clean a freshly loaded table:
///
/// 1. lowercase every column name;
/// 2. drop rows with a null/absent latitude or longitude;
/// 3. drop rows where either coordinate is the zero sentinel (an unset
///    location, not a real-world position);
/// 4. rename the merged crash timestamp column to [`COL_DATE_TIME`].
///
/// Row order is preserved and the transform is idempotent.
pub fn normalize(table: CollisionTable) -> CollisionTable {
    let merged_lower = MERGED_COLUMN.to_lowercase();

    let columns = table
        .columns
        .iter()
        .map(|name| canonical_name(name, &merged_lower))
        .collect();

    let rows = table
        .rows
        .into_iter()
        .map(|row| lowercase_keys(row, &merged_lower))
        .filter(has_usable_coordinates)
        .collect();

    CollisionTable { columns, rows }
}

fn canonical_name(name: &str, merged_lower: &str) -> String {
    let name = name.to_lowercase();
    if name == merged_lower {
        COL_DATE_TIME.to_string()
    } else {
        name
    }
}

fn lowercase_keys(row: CollisionRecord, merged_lower: &str) -> CollisionRecord {
    let cells = row
        .cells
        .into_iter()
        .map(|(name, value)| (canonical_name(&name, merged_lower), value))
        .collect();
    CollisionRecord { cells }
}

/// Both coordinates present (non-null) and neither equal to zero.
fn has_usable_coordinates(row: &CollisionRecord) -> bool {
    let present = |column| row.get(column).is_some_and(|cell| !cell.is_null());
    if !present(COL_LATITUDE) || !present(COL_LONGITUDE) {
        return false;
    }
    row.number(COL_LATITUDE) != Some(0.0) && row.number(COL_LONGITUDE) != Some(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use std::collections::BTreeMap;

    fn raw_row(lat: CellValue, lon: CellValue) -> CollisionRecord {
        let mut cells = BTreeMap::new();
        cells.insert(MERGED_COLUMN.to_string(), CellValue::Null);
        cells.insert("LATITUDE".to_string(), lat);
        cells.insert("LONGITUDE".to_string(), lon);
        cells.insert("BOROUGH".to_string(), CellValue::String("QUEENS".into()));
        CollisionRecord { cells }
    }

    fn raw_table(rows: Vec<CollisionRecord>) -> CollisionTable {
        CollisionTable {
            columns: vec![
                MERGED_COLUMN.to_string(),
                "LATITUDE".to_string(),
                "LONGITUDE".to_string(),
                "BOROUGH".to_string(),
            ],
            rows,
        }
    }

    #[test]
    fn lowercases_columns_and_renames_merged_timestamp() {
        let table = normalize(raw_table(vec![raw_row(
            CellValue::Float(40.7),
            CellValue::Float(-73.9),
        )]));

        assert_eq!(
            table.columns,
            vec![COL_DATE_TIME, "latitude", "longitude", "borough"]
        );
        let row = &table.rows[0];
        assert!(row.get(COL_LATITUDE).is_some());
        assert!(row.get("BOROUGH").is_none());
        assert!(row.get("borough").is_some());
        assert!(row.get(COL_DATE_TIME).is_some());
    }

    #[test]
    fn drops_rows_with_null_or_missing_coordinates() {
        let mut no_lon = raw_row(CellValue::Float(40.7), CellValue::Null);
        no_lon.cells.remove("LONGITUDE");

        let table = normalize(raw_table(vec![
            raw_row(CellValue::Float(40.7), CellValue::Float(-73.9)),
            raw_row(CellValue::Null, CellValue::Float(-73.9)),
            raw_row(CellValue::Float(40.7), CellValue::Null),
            no_lon,
        ]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn drops_zero_sentinel_coordinates() {
        let table = normalize(raw_table(vec![
            raw_row(CellValue::Float(0.0), CellValue::Float(-73.9)),
            raw_row(CellValue::Float(40.7), CellValue::Float(0.0)),
            raw_row(CellValue::Integer(0), CellValue::Integer(0)),
            raw_row(CellValue::Float(40.7), CellValue::Float(-73.9)),
        ]));
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].number(COL_LATITUDE), Some(40.7));
    }

    #[test]
    fn keeps_non_numeric_coordinate_text() {
        // Junk text is non-null and not the zero sentinel; views drop such
        // rows at projection time instead.
        let table = normalize(raw_table(vec![raw_row(
            CellValue::String("n/a".into()),
            CellValue::Float(-73.9),
        )]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn preserves_row_order() {
        let table = normalize(raw_table(vec![
            raw_row(CellValue::Float(40.1), CellValue::Float(-73.9)),
            raw_row(CellValue::Float(0.0), CellValue::Float(0.0)),
            raw_row(CellValue::Float(40.2), CellValue::Float(-73.9)),
            raw_row(CellValue::Float(40.3), CellValue::Float(-73.9)),
        ]));
        let lats: Vec<f64> = table
            .rows
            .iter()
            .filter_map(|r| r.number(COL_LATITUDE))
            .collect();
        assert_eq!(lats, vec![40.1, 40.2, 40.3]);
    }

    #[test]
    fn is_idempotent() {
        let once = normalize(raw_table(vec![
            raw_row(CellValue::Float(40.7), CellValue::Float(-73.9)),
            raw_row(CellValue::Null, CellValue::Float(-73.9)),
            raw_row(CellValue::Float(0.0), CellValue::Float(-73.9)),
        ]));
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn normalized_rows_have_nonzero_coordinates() {
        let table = normalize(raw_table(vec![
            raw_row(CellValue::Float(40.7), CellValue::Float(-73.9)),
            raw_row(CellValue::Float(0.0), CellValue::Float(-73.9)),
            raw_row(CellValue::Null, CellValue::Null),
            raw_row(CellValue::Float(40.8), CellValue::Float(-74.0)),
        ]));
        for row in &table.rows {
            let lat = row.get(COL_LATITUDE).unwrap();
            let lon = row.get(COL_LONGITUDE).unwrap();
            assert!(!lat.is_null() && !lon.is_null());
            assert_ne!(lat.as_f64(), Some(0.0));
            assert_ne!(lon.as_f64(), Some(0.0));
        }
    }
}
