//! Axum router construction for the catalog API.
//!
//! The Axum router carries no routes of its own: every request falls
//! through to [`dispatch::dispatch`], which applies the ordered
//! [`RouteTable`](crate::routing::RouteTable) held in [`AppState`].

use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::dispatch;
use crate::state::AppState;

/// Build the complete Axum router for the catalog server.
///
/// Layers, innermost first:
/// - panic isolation -- a panicking handler yields a JSON 500 for that
///   request only
/// - HTTP tracing spans
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(dispatch::dispatch)
        .layer(CatchPanicLayer::custom(dispatch::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
