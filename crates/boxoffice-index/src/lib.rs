//! Dataset loading and per-category aggregate indexes.
//!
//! The dataset is read once at startup and turned into a [`Catalog`]: the
//! full movie collection plus one [`CategoryIndex`] per [`Category`]. The
//! catalog is never mutated afterwards, so it can be shared across request
//! handlers without locks.
//!
//! # Modules
//!
//! - [`error`] -- Load failures (all fatal at startup).
//! - [`index`] -- [`IndexEntry`] aggregates and the [`CategoryIndex`] builder.
//! - [`catalog`] -- The immutable snapshot served to requests.
//! - [`loader`] -- Reading and parsing the dataset file.
//!
//! [`Category`]: boxoffice_types::Category

pub mod catalog;
pub mod error;
pub mod index;
pub mod loader;

// Re-export primary types at crate root.
pub use catalog::Catalog;
pub use error::LoadError;
pub use index::{CategoryIndex, EntrySummary, IndexEntry};
pub use loader::{load_catalog, load_movies, parse_movies};
