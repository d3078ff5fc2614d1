//! Structured error types for the flight data layer.
//!
//! Library consumers get typed, composable errors; binary or test code can
//! still wrap these in `anyhow` for convenience.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be opened at construction time.
    #[error("failed to open database at {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// A query failed to prepare, bind, or execute.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The connection could not be released cleanly at teardown.
    #[error("failed to close database: {0}")]
    Close(rusqlite::Error),
}
