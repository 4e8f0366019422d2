use std::fmt;

use chrono::Timelike;

use super::error::ComputationError;
use super::model::{
    CollisionRecord, CollisionTable, COL_CYCLISTS_INJURED, COL_LATITUDE, COL_LONGITUDE,
    COL_MOTORISTS_INJURED, COL_PEDESTRIANS_INJURED, COL_PERSONS_INJURED, COL_STREET,
};

// ---------------------------------------------------------------------------
// View parameter & result types
// ---------------------------------------------------------------------------

/// Which class of road user a ranking concerns. Resolved to its count column
/// here, at the API boundary, instead of matching free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffectedType {
    Pedestrians,
    Cyclists,
    Motorists,
}

impl AffectedType {
    pub const ALL: [AffectedType; 3] = [
        AffectedType::Pedestrians,
        AffectedType::Cyclists,
        AffectedType::Motorists,
    ];

    /// The injured-count column this selector reads.
    pub fn column(self) -> &'static str {
        match self {
            AffectedType::Pedestrians => COL_PEDESTRIANS_INJURED,
            AffectedType::Cyclists => COL_CYCLISTS_INJURED,
            AffectedType::Motorists => COL_MOTORISTS_INJURED,
        }
    }
}

impl fmt::Display for AffectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AffectedType::Pedestrians => "Pedestrians",
            AffectedType::Cyclists => "Cyclists",
            AffectedType::Motorists => "Motorists",
        })
    }
}

/// A single map point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of the dangerous-streets ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetCount {
    pub street: String,
    pub injured: i64,
}

// ---------------------------------------------------------------------------
// Query views — pure functions over the normalized table
// ---------------------------------------------------------------------------

/// Locations of collisions that injured at least `min_injured` people
/// (inclusive). Rows whose coordinates do not read as numbers are dropped.
pub fn injury_locations(table: &CollisionTable, min_injured: i64) -> Vec<GeoPoint> {
    table
        .rows
        .iter()
        .filter(|row| {
            row.number(COL_PERSONS_INJURED)
                .is_some_and(|n| n >= min_injured as f64)
        })
        .filter_map(geo_point)
        .collect()
}

/// Every record's location, for drawing an unfiltered slice on the map.
pub fn locations(table: &CollisionTable) -> Vec<GeoPoint> {
    table.rows.iter().filter_map(geo_point).collect()
}

fn geo_point(row: &CollisionRecord) -> Option<GeoPoint> {
    Some(GeoPoint {
        latitude: row.number(COL_LATITUDE)?,
        longitude: row.number(COL_LONGITUDE)?,
    })
}

/// The subsequence of records whose crash hour equals `hour` (0–23).
/// Records without a parsed timestamp never match.
pub fn hour_slice(table: &CollisionTable, hour: u32) -> CollisionTable {
    CollisionTable {
        columns: table.columns.clone(),
        rows: table
            .rows
            .iter()
            .filter(|row| row.timestamp().is_some_and(|ts| ts.hour() == hour))
            .cloned()
            .collect(),
    }
}

/// Fixed-width count histogram of the minute component, buckets 0–59.
pub fn minute_histogram(table: &CollisionTable) -> [u32; 60] {
    let mut buckets = [0u32; 60];
    for row in &table.rows {
        if let Some(ts) = row.timestamp() {
            buckets[ts.minute() as usize] += 1;
        }
    }
    buckets
}

/// Mean coordinate of the table, used to center the map. Fails over an
/// empty row set; callers check emptiness first.
pub fn midpoint(table: &CollisionTable) -> Result<GeoPoint, ComputationError> {
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut count = 0usize;
    for point in table.rows.iter().filter_map(geo_point) {
        lat_sum += point.latitude;
        lon_sum += point.longitude;
        count += 1;
    }
    if count == 0 {
        return Err(ComputationError {
            aggregate: "midpoint",
        });
    }
    Ok(GeoPoint {
        latitude: lat_sum / count as f64,
        longitude: lon_sum / count as f64,
    })
}

/// Streets ranked by the selected injured count, descending. Ties keep
/// their original relative order; records without a street name are
/// dropped; at most `limit` entries are returned.
pub fn dangerous_streets(
    table: &CollisionTable,
    affected: AffectedType,
    limit: usize,
) -> Vec<StreetCount> {
    let column = affected.column();

    let mut ranked: Vec<(&CollisionRecord, f64)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let injured = row.number(column)?;
            (injured >= 1.0).then_some((row, injured))
        })
        .collect();
    // Vec::sort_by is stable, so ties keep source order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .filter_map(|(row, injured)| {
            Some(StreetCount {
                street: row.text(COL_STREET)?.to_string(),
                injured: injured as i64,
            })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::MERGED_COLUMN;
    use crate::data::model::{CellValue, COL_DATE_TIME};
    use crate::data::normalize::normalize;
    use chrono::NaiveDate;

    fn row(cells: &[(&str, CellValue)]) -> CollisionRecord {
        CollisionRecord {
            cells: cells
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    fn table(rows: Vec<CollisionRecord>) -> CollisionTable {
        CollisionTable {
            columns: vec![COL_DATE_TIME.to_string(), COL_LATITUDE.to_string()],
            rows,
        }
    }

    fn crash(lat: f64, lon: f64, injured: i64, hour: u32, minute: u32) -> CollisionRecord {
        let ts = NaiveDate::from_ymd_opt(2019, 9, 6)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        row(&[
            (COL_DATE_TIME, CellValue::Timestamp(ts)),
            (COL_LATITUDE, CellValue::Float(lat)),
            (COL_LONGITUDE, CellValue::Float(lon)),
            (COL_PERSONS_INJURED, CellValue::Integer(injured)),
        ])
    }

    fn street_crash(street: Option<&str>, column: &str, injured: i64) -> CollisionRecord {
        let street_cell = match street {
            Some(name) => CellValue::String(name.to_string()),
            None => CellValue::Null,
        };
        row(&[
            (COL_STREET, street_cell),
            (column, CellValue::Integer(injured)),
        ])
    }

    #[test]
    fn injury_filter_is_inclusive_and_monotonic() {
        let t = table((0..=5).map(|n| crash(40.7, -73.9, n, 12, 0)).collect());

        assert_eq!(injury_locations(&t, 1).len(), 5);
        assert_eq!(injury_locations(&t, 3).len(), 3);
        assert_eq!(injury_locations(&t, 19).len(), 0);
        assert!(injury_locations(&t, 1).len() >= injury_locations(&t, 19).len());
    }

    #[test]
    fn injury_filter_skips_null_counts_and_junk_coordinates() {
        let mut no_count = crash(40.7, -73.9, 9, 12, 0);
        no_count
            .cells
            .insert(COL_PERSONS_INJURED.to_string(), CellValue::Null);
        let mut junk_lat = crash(40.7, -73.9, 9, 12, 0);
        junk_lat
            .cells
            .insert(COL_LATITUDE.to_string(), CellValue::String("n/a".into()));

        let t = table(vec![no_count, junk_lat, crash(40.8, -74.0, 2, 12, 0)]);
        let points = injury_locations(&t, 1);
        assert_eq!(points, vec![GeoPoint { latitude: 40.8, longitude: -74.0 }]);
    }

    #[test]
    fn hour_slice_matches_hour_and_ignores_null_timestamps() {
        let mut no_ts = crash(40.7, -73.9, 0, 14, 10);
        no_ts.cells.insert(COL_DATE_TIME.to_string(), CellValue::Null);

        let t = table(vec![
            crash(40.7, -73.9, 0, 14, 10),
            crash(40.8, -74.0, 0, 9, 30),
            crash(40.6, -73.8, 0, 14, 45),
            no_ts,
        ]);
        let slice = hour_slice(&t, 14);
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.columns, t.columns);
    }

    #[test]
    fn histogram_counts_sum_to_slice_size() {
        let t = table(vec![
            crash(40.7, -73.9, 0, 14, 5),
            crash(40.7, -73.9, 0, 14, 5),
            crash(40.7, -73.9, 0, 14, 59),
            crash(40.7, -73.9, 0, 9, 30),
        ]);
        let slice = hour_slice(&t, 14);
        let hist = minute_histogram(&slice);

        assert_eq!(hist.iter().sum::<u32>() as usize, slice.len());
        assert_eq!(hist[5], 2);
        assert_eq!(hist[59], 1);
        assert_eq!(hist[30], 0);
    }

    #[test]
    fn midpoint_averages_coordinates() {
        let t = table(vec![
            crash(40.0, -74.0, 0, 12, 0),
            crash(41.0, -73.0, 0, 12, 0),
        ]);
        let mid = midpoint(&t).unwrap();
        assert!((mid.latitude - 40.5).abs() < 1e-9);
        assert!((mid.longitude - -73.5).abs() < 1e-9);
    }

    #[test]
    fn midpoint_of_empty_slice_fails() {
        let err = midpoint(&table(Vec::new())).unwrap_err();
        assert_eq!(err.aggregate, "midpoint");
    }

    #[test]
    fn streets_rank_descending_with_stable_ties() {
        let t = table(vec![
            street_crash(Some("ATLANTIC AVE"), COL_PEDESTRIANS_INJURED, 2),
            street_crash(Some("BROADWAY"), COL_PEDESTRIANS_INJURED, 2),
            street_crash(Some("CANAL ST"), COL_PEDESTRIANS_INJURED, 5),
            street_crash(Some("DELANCEY ST"), COL_PEDESTRIANS_INJURED, 0),
        ]);
        let ranking = dangerous_streets(&t, AffectedType::Pedestrians, 5);

        let names: Vec<&str> = ranking.iter().map(|s| s.street.as_str()).collect();
        assert_eq!(names, vec!["CANAL ST", "ATLANTIC AVE", "BROADWAY"]);
        assert!(ranking.windows(2).all(|w| w[0].injured >= w[1].injured));
    }

    #[test]
    fn streets_drop_nulls_then_truncate() {
        let t = table(vec![
            street_crash(None, COL_CYCLISTS_INJURED, 9),
            street_crash(Some("BROADWAY"), COL_CYCLISTS_INJURED, 3),
            street_crash(Some("CANAL ST"), COL_CYCLISTS_INJURED, 2),
            street_crash(Some("ATLANTIC AVE"), COL_CYCLISTS_INJURED, 1),
        ]);
        let ranking = dangerous_streets(&t, AffectedType::Cyclists, 2);
        assert_eq!(
            ranking,
            vec![
                StreetCount { street: "BROADWAY".into(), injured: 3 },
                StreetCount { street: "CANAL ST".into(), injured: 2 },
            ]
        );
    }

    #[test]
    fn street_ranking_is_bounded_by_qualifying_rows() {
        let t = table(vec![
            street_crash(Some("BROADWAY"), COL_MOTORISTS_INJURED, 4),
            street_crash(Some("CANAL ST"), COL_MOTORISTS_INJURED, 0),
        ]);
        assert_eq!(dangerous_streets(&t, AffectedType::Motorists, 5).len(), 1);
    }

    #[test]
    fn affected_type_resolves_to_its_own_column() {
        let t = table(vec![
            street_crash(Some("BROADWAY"), COL_PEDESTRIANS_INJURED, 4),
            street_crash(Some("CANAL ST"), COL_MOTORISTS_INJURED, 2),
        ]);
        let pedestrians = dangerous_streets(&t, AffectedType::Pedestrians, 5);
        let motorists = dangerous_streets(&t, AffectedType::Motorists, 5);

        assert_eq!(pedestrians[0].street, "BROADWAY");
        assert_eq!(pedestrians.len(), 1);
        assert_eq!(motorists[0].street, "CANAL ST");
        assert_eq!(motorists.len(), 1);
    }

    // The worked example from the dashboard's acceptance notes: three raw
    // rows, one with sentinel coordinates.
    #[test]
    fn end_to_end_pipeline_example() {
        let ts = |h, m| {
            CellValue::Timestamp(
                NaiveDate::from_ymd_opt(2019, 9, 6)
                    .unwrap()
                    .and_hms_opt(h, m, 0)
                    .unwrap(),
            )
        };
        let raw = |lat, lon, injured, h, m| {
            row(&[
                (MERGED_COLUMN, ts(h, m)),
                ("LATITUDE", CellValue::Float(lat)),
                ("LONGITUDE", CellValue::Float(lon)),
                ("NUMBER OF PERSONS INJURED", CellValue::Integer(injured)),
            ])
        };
        let normalized = normalize(CollisionTable {
            columns: vec![
                MERGED_COLUMN.to_string(),
                "LATITUDE".to_string(),
                "LONGITUDE".to_string(),
                "NUMBER OF PERSONS INJURED".to_string(),
            ],
            rows: vec![
                raw(40.7, -73.9, 3, 14, 5),
                raw(0.0, 0.0, 5, 14, 5),
                raw(40.8, -74.0, 0, 9, 30),
            ],
        });

        // sentinel row dropped
        assert_eq!(normalized.len(), 2);

        // threshold 1 keeps only the three-injured crash
        let points = injury_locations(&normalized, 1);
        assert_eq!(points, vec![GeoPoint { latitude: 40.7, longitude: -73.9 }]);

        // hour 14 slice holds one row, at minute five
        let slice = hour_slice(&normalized, 14);
        assert_eq!(slice.len(), 1);
        let hist = minute_histogram(&slice);
        assert_eq!(hist[5], 1);
        assert_eq!(hist.iter().sum::<u32>(), 1);
    }
}
