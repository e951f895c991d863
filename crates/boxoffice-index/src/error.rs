//! Error types for the `boxoffice-index` crate.
//!
//! Every [`LoadError`] is fatal: the service refuses to start serving
//! without a fully loaded dataset.

use std::path::PathBuf;

/// Errors that can occur while loading the movie dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        /// The dataset path that was attempted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The dataset is not valid JSON.
    #[error("failed to parse dataset JSON: {source}")]
    Json {
        /// The underlying parse error.
        #[from]
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an array.
    #[error("dataset must be a JSON array of movie records, found {found}")]
    NotAnArray {
        /// The JSON type that was found instead.
        found: &'static str,
    },
}
