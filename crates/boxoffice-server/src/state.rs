//! Shared application state for the catalog API.
//!
//! [`AppState`] is assembled once at startup and wrapped in an [`Arc`]. It
//! holds the immutable [`Catalog`], the root page document, and the route
//! table the dispatcher walks. Nothing in it changes while serving, so
//! handlers read it concurrently without synchronization.

use std::sync::Arc;

use axum::body::Bytes;
use boxoffice_index::Catalog;

use crate::page::DEFAULT_ROOT_PAGE;
use crate::routing::RouteTable;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The indexed movie dataset.
    pub catalog: Arc<Catalog>,
    /// The HTML document served at `/`.
    pub root_page: Bytes,
    /// Ordered route bindings used by the dispatcher.
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Create state over `catalog` with the built-in root page and the
    /// standard route table.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            root_page: Bytes::from_static(DEFAULT_ROOT_PAGE.as_bytes()),
            routes: Arc::new(RouteTable::standard()),
        }
    }

    /// Replace the root page document.
    #[must_use]
    pub fn with_root_page(mut self, page: impl Into<Bytes>) -> Self {
        self.root_page = page.into();
        self
    }

    /// Replace the route table.
    #[must_use]
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = Arc::new(routes);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::empty())
    }
}
