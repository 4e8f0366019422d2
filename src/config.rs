use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Optional configuration file looked up in the working directory.
const CONFIG_FILE: &str = "crashview.json";

/// Environment variable overriding the data path.
const DATA_ENV: &str = "CRASHVIEW_DATA";

const DEFAULT_DATA_PATH: &str = "data.csv";
const DEFAULT_ROW_LIMIT: usize = 100_000;

/// Startup parameters: where the collision export lives and how many rows
/// of it to load.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_path: PathBuf,
    pub row_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl Config {
    /// Read `crashview.json` if present, apply the `CRASHVIEW_DATA`
    /// override, and sanity-check the result. Configuration problems fall
    /// back to defaults with a logged warning rather than stopping the app.
    pub fn load() -> Self {
        let mut config = match fs::read_to_string(CONFIG_FILE) {
            Ok(text) => Self::from_json(&text),
            Err(_) => Config::default(),
        };
        if let Some(path) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(path);
        }
        config.validated()
    }

    fn from_json(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed {CONFIG_FILE}: {e}");
                Config::default()
            }
        }
    }

    fn validated(mut self) -> Self {
        if self.row_limit == 0 {
            log::warn!("row_limit must be positive; using {DEFAULT_ROW_LIMIT}");
            self.row_limit = DEFAULT_ROW_LIMIT;
        }
        self
    }
}
