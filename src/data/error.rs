use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset loading errors
// ---------------------------------------------------------------------------

/// Errors raised while loading and preparing the rental dataset.
///
/// `MissingInput` is the one expected failure mode: the dashboard refuses to
/// start without its data file and tells the user which file to supply.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Missing '{}'! Place the rental dataset next to the executable and restart.", path.display())]
    MissingInput { path: PathBuf },

    #[error("IO error reading data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV decoding error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Row {row}: cannot parse timestamp '{value}'")]
    Timestamp { row: usize, value: String },
}
