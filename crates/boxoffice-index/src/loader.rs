//! Reading the movie dataset from disk.
//!
//! The dataset is a single JSON array. Its elements are not validated:
//! field names are assumed, not checked, and elements that are not objects
//! are kept as movies without fields.

use std::path::Path;

use boxoffice_types::Movie;
use serde_json::Value;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::LoadError;

/// Read and parse the dataset file at `path`.
pub fn load_movies(path: &Path) -> Result<Vec<Movie>, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_movies(&contents)
}

/// Parse a dataset from a JSON string.
pub fn parse_movies(json: &str) -> Result<Vec<Movie>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(LoadError::NotAnArray {
            found: json_type(&value),
        });
    };

    Ok(items.into_iter().map(Movie::from).collect())
}

/// Load the dataset at `path` and build the catalog over it.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    info!(path = %path.display(), "loading movies data file");
    let movies = load_movies(path)?;
    let catalog = Catalog::new(movies);
    catalog.log_summary();
    Ok(catalog)
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
