use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::data::cache::DatasetCache;
use crate::data::model::CollisionTable;
use crate::data::views::{self, AffectedType, GeoPoint, StreetCount};

/// Number of entries shown in the street ranking.
pub const STREET_RANKING_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// egui repaints every frame, so each view's derived result is held here and
/// recomputed only when its control changes or a new table loads.
pub struct AppState {
    /// Memoized load→normalize pipeline, keyed by row limit.
    pub cache: DatasetCache,
    /// Rows to request from the cache.
    pub row_limit: usize,
    /// Canonical normalized table (None until a load succeeds).
    pub table: Option<Arc<CollisionTable>>,

    // -- user controls --
    /// Minimum injured persons for the injury map (1–19).
    pub injured_threshold: i64,
    /// Hour of day under inspection (0–23).
    pub hour: u32,
    /// Road-user class for the street ranking.
    pub affected: AffectedType,
    /// Whether the raw-data window is open.
    pub show_raw: bool,

    // -- derived view results --
    pub injury_points: Vec<GeoPoint>,
    pub hour_points: Vec<GeoPoint>,
    pub hour_count: usize,
    pub minute_counts: [u32; 60],
    pub map_center: Option<GeoPoint>,
    pub street_ranking: Vec<StreetCount>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build state over the configured source and run the initial load.
    pub fn new(config: &Config) -> Self {
        let mut state = Self {
            cache: DatasetCache::new(config.data_path.clone()),
            row_limit: config.row_limit,
            table: None,
            injured_threshold: 1,
            hour: 0,
            affected: AffectedType::Pedestrians,
            show_raw: false,
            injury_points: Vec::new(),
            hour_points: Vec::new(),
            hour_count: 0,
            minute_counts: [0; 60],
            map_center: None,
            street_ranking: Vec::new(),
            status_message: None,
        };
        state.reload();
        state
    }

    /// Fetch the table from the cache and rebuild every view.
    pub fn reload(&mut self) {
        match self.cache.get(self.row_limit) {
            Ok(table) => {
                self.table = Some(table);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load collision data: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.table = None;
            }
        }
        self.refresh_all();
    }

    /// Point the dashboard at a different collision export.
    pub fn open_source(&mut self, path: PathBuf) {
        self.cache = DatasetCache::new(path);
        self.reload();
    }

    pub fn refresh_all(&mut self) {
        self.refresh_injury_view();
        self.refresh_hour_view();
        self.refresh_street_view();
    }

    /// Recompute the injury map after its threshold slider moves.
    pub fn refresh_injury_view(&mut self) {
        self.injury_points = match &self.table {
            Some(table) => views::injury_locations(table, self.injured_threshold),
            None => Vec::new(),
        };
    }

    /// Recompute the hour slice, its minute histogram and the map center.
    pub fn refresh_hour_view(&mut self) {
        let Some(table) = &self.table else {
            self.hour_points = Vec::new();
            self.hour_count = 0;
            self.minute_counts = [0; 60];
            self.map_center = None;
            return;
        };

        let slice = views::hour_slice(table, self.hour);
        self.hour_count = slice.len();
        self.minute_counts = views::minute_histogram(&slice);
        self.hour_points = views::locations(&slice);
        // The midpoint is undefined over an empty slice; leave the map
        // uncentered rather than invent a fallback.
        self.map_center = if slice.is_empty() {
            None
        } else {
            match views::midpoint(&slice) {
                Ok(center) => Some(center),
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            }
        };
    }

    /// Recompute the street ranking after the selector changes.
    pub fn refresh_street_view(&mut self) {
        self.street_ranking = match &self.table {
            Some(table) => views::dangerous_streets(table, self.affected, STREET_RANKING_SIZE),
            None => Vec::new(),
        };
    }
}
