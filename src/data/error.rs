use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The source file could not be read or understood. Fatal at startup: the
/// dashboard renders nothing until a readable source is supplied.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("cannot open collision data at `{path}`: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed collision data: {0}")]
    Csv(#[from] csv::Error),

    #[error("collision data is missing required column `{0}`")]
    MissingColumn(String),
}

/// An aggregate was requested over an empty row set. Callers are expected to
/// check for emptiness before invoking the aggregate.
#[derive(Debug, Error)]
#[error("cannot compute the {aggregate} of zero records")]
pub struct ComputationError {
    pub aggregate: &'static str,
}
