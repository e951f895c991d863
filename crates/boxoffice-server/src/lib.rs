//! Catalog API server for the box-office movie dataset.
//!
//! This crate provides an Axum HTTP server that exposes the immutable
//! [`Catalog`] as a small hierarchy of GET-only resources:
//!
//! - **`GET /`** -- informational HTML page
//! - **`GET /movies`** -- every movie record, in dataset order
//! - **`GET /{studios|genres|ratings}`** -- keys present in one index
//! - **`GET /{index}/{key}`** -- totals for one index entry
//! - **`GET /{index}/{key}/movies`** -- member movies of one entry
//!
//! # Architecture
//!
//! Axum only provides the transport. Every request lands in a single
//! fallback service, the [`dispatch`] module, which walks an ordered
//! [`RouteTable`] of path patterns, calls the first matching handler, and
//! encodes its [`Payload`] or [`ResourceError`] onto the wire. Handlers are
//! plain functions over the shared [`AppState`]; nothing is mutated after
//! startup, so requests never contend on locks.
//!
//! [`Catalog`]: boxoffice_index::Catalog
//! [`RouteTable`]: routing::RouteTable
//! [`Payload`]: handlers::Payload
//! [`ResourceError`]: error::ResourceError

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod routing;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ResourceError;
pub use router::build_router;
pub use routing::{Captures, PathPattern, RouteTable, Segment};
pub use server::{ServerConfig, ServerError, serve, start_server};
pub use state::AppState;
