use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DataAccessError;
use super::loader::load_records;
use super::model::CollisionTable;
use super::normalize::normalize;

/// Memoizes the load→normalize pipeline per row-limit parameter.
///
/// The cache exclusively owns each canonical table and hands out shared
/// read-only handles. Entries live for the life of the process; the source
/// file is assumed static. Owned by application state rather than global,
/// so tests can re-instantiate it per case.
pub struct DatasetCache {
    source: PathBuf,
    entries: HashMap<usize, Arc<CollisionTable>>,
    loads: usize,
}

impl DatasetCache {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            entries: HashMap::new(),
            loads: 0,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The normalized table for `row_limit`, computed on first request.
    /// A failed load is not memoized; the next call retries.
    pub fn get(&mut self, row_limit: usize) -> Result<Arc<CollisionTable>, DataAccessError> {
        if let Some(table) = self.entries.get(&row_limit) {
            return Ok(Arc::clone(table));
        }

        let raw = load_records(&self.source, row_limit)?;
        let read = raw.len();
        let table = Arc::new(normalize(raw));
        self.loads += 1;
        log::info!(
            "loaded `{}`: {} records read, {} kept after cleaning (row limit {})",
            self.source.display(),
            read,
            table.len(),
            row_limit,
        );
        self.entries.insert(row_limit, Arc::clone(&table));
        Ok(table)
    }

    /// Number of pipeline executions so far; observable in tests.
    pub fn loads(&self) -> usize {
        self.loads
    }
}
