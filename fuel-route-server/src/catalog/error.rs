//! Catalog error types.

use std::path::PathBuf;

/// Errors that abort loading the station catalog.
///
/// Individual bad rows are not errors; they are skipped and counted.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset file could not be opened
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row could not be read
    #[error("failed to read CSV headers: {0}")]
    Headers(#[from] csv::Error),

    /// Required columns are absent from the header row
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },
}
