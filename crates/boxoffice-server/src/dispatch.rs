//! Request dispatch.
//!
//! Every request passes through [`dispatch`], the single fallback service
//! of the Axum router:
//!
//! ```text
//! RECEIVED  -> path parsed (query string ignored)
//!     -> UNMATCHED: no route -> 404 text
//!     -> MATCHED:   handler invoked with captures
//!         -> HANDLED: Ok(payload)       -> 200
//!         -> HANDLED: Err(NotFound)     -> 404 text
//!         -> FAULTED: Err(fault) / panic -> 500 JSON
//! ```
//!
//! Faults are isolated per request. Handler panics are caught by the
//! [`CatchPanicLayer`](tower_http::catch_panic::CatchPanicLayer) installed
//! in [`build_router`](crate::router::build_router) and rendered by
//! [`panic_response`].

use std::any::Any;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use crate::error::{ResourceError, fault_response, not_found};
use crate::handlers::Payload;
use crate::state::AppState;

/// Methods the catalog answers; everything else gets 405.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Result of resolving a path against the route table.
#[derive(Debug)]
pub enum Outcome {
    /// No route pattern matched the path.
    Unmatched,
    /// A route matched and its handler ran.
    Matched {
        /// Name of the matching route.
        route: &'static str,
        /// What the handler returned.
        result: Result<Payload, ResourceError>,
    },
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::Unmatched => not_found(),
            Self::Matched { result: Ok(payload), .. } => payload.into_response(),
            Self::Matched { result: Err(e), .. } => e.into_response(),
        }
    }
}

/// Resolve `path` against the state's route table and run the handler.
pub fn resolve(state: &AppState, path: &str) -> Outcome {
    let Some((route, captures)) = state.routes.find(path) else {
        return Outcome::Unmatched;
    };
    let result = (route.handler())(state, &captures);
    Outcome::Matched {
        route: route.name(),
        result,
    }
}

/// Axum fallback service: dispatch one request.
pub async fn dispatch(State(state): State<Arc<AppState>>, method: Method, uri: Uri) -> Response {
    let path = uri.path();
    debug!(%method, path, "request for path");

    if method != Method::GET && method != Method::HEAD {
        return method_not_allowed();
    }

    let outcome = resolve(&state, path);
    match &outcome {
        Outcome::Unmatched => debug!(path, "no route matched"),
        Outcome::Matched {
            route,
            result: Err(e),
        } if e.is_not_found() => debug!(route, path, "entry not found"),
        Outcome::Matched {
            route,
            result: Err(e),
        } => error!(route, path, error = %e, "handler fault"),
        Outcome::Matched { .. } => {}
    }
    outcome.into_response()
}

/// The 405 response for non-GET methods.
pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [
            (header::ALLOW, ALLOWED_METHODS),
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
        ],
        "Method not allowed",
    )
        .into_response()
}

/// Render a caught handler panic as a JSON 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");
    error!(panic = message, "handler panicked");
    fault_response(&format!("internal error: {message}"))
}

#[cfg(test)]
mod tests {
    use boxoffice_index::{Catalog, parse_movies};

    use super::*;

    fn state() -> AppState {
        let movies = parse_movies(r#"[{"title": "A", "genre": "Action", "revenue": 1, "tickets": 1}]"#)
            .unwrap_or_default();
        AppState::new(Catalog::new(movies))
    }

    #[test]
    fn unmatched_paths() {
        assert!(matches!(resolve(&state(), "/nope"), Outcome::Unmatched));
    }

    #[test]
    fn matched_paths_report_their_route() {
        let outcome = resolve(&state(), "/genres/action/movies");
        assert!(matches!(
            outcome,
            Outcome::Matched {
                route: "entry_movies",
                result: Ok(Payload::Json(_))
            }
        ));
    }

    #[test]
    fn missing_entry_is_matched_not_found() {
        let outcome = resolve(&state(), "/genres/horror");
        assert!(matches!(
            outcome,
            Outcome::Matched { route: "entry_summary", result: Err(ResourceError::NotFound(_)) }
        ));
        assert_eq!(outcome.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn panic_payloads_are_described() {
        let response = panic_response(Box::new("simulated"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = panic_response(Box::new(String::from("owned")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_get_is_rejected_with_allow_header() {
        let response = method_not_allowed();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW).and_then(|v| v.to_str().ok()),
            Some(ALLOWED_METHODS)
        );
    }
}
