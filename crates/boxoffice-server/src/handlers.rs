//! Resource handlers for the catalog API.
//!
//! Every handler is a synchronous, read-only function of the shared
//! [`AppState`] and the segments captured by its route. None of them
//! mutate state or perform I/O; they only build a [`Payload`] or report a
//! [`ResourceError`].
//!
//! # Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/` | [`root`] |
//! | `GET` | `/movies` | [`all_movies`] |
//! | `GET` | `/{index}` | [`list_keys`] |
//! | `GET` | `/{index}/{key}` | [`entry_summary`] |
//! | `GET` | `/{index}/{key}/movies` | [`entry_movies`] |

use std::borrow::Cow;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use boxoffice_index::IndexEntry;
use boxoffice_types::{CategoryKey, Movie};
use percent_encoding::percent_decode_str;
use serde::{Serialize, Serializer};

use crate::error::ResourceError;
use crate::routing::Captures;
use crate::state::AppState;

/// A successful handler result, ready to be written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// An HTML document.
    Html(Bytes),
    /// A serialized JSON document.
    Json(Bytes),
}

impl Payload {
    /// Serialize `value` as a JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ResourceError> {
        Ok(Self::Json(Bytes::from(serde_json::to_vec(value)?)))
    }

    /// The raw body bytes.
    pub const fn body(&self) -> &Bytes {
        match self {
            Self::Html(body) | Self::Json(body) => body,
        }
    }
}

impl IntoResponse for Payload {
    fn into_response(self) -> Response {
        match self {
            Self::Html(body) => Html(body).into_response(),
            Self::Json(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        }
    }
}

/// Serializes shared movie records as a JSON array without copying them.
struct MovieList<'a>(&'a [Arc<Movie>]);

impl Serialize for MovieList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(AsRef::<Movie>::as_ref))
    }
}

// ---------------------------------------------------------------------------
// GET / -- informational page
// ---------------------------------------------------------------------------

/// Serve the informational HTML page loaded at startup.
pub fn root(state: &AppState, _captures: &Captures<'_>) -> Result<Payload, ResourceError> {
    Ok(Payload::Html(state.root_page.clone()))
}

// ---------------------------------------------------------------------------
// GET /movies -- full collection
// ---------------------------------------------------------------------------

/// Return every movie record in dataset order.
pub fn all_movies(state: &AppState, _captures: &Captures<'_>) -> Result<Payload, ResourceError> {
    Payload::json(&MovieList(state.catalog.movies()))
}

// ---------------------------------------------------------------------------
// GET /{index} -- keys of one index
// ---------------------------------------------------------------------------

/// Return the keys present in one category index.
///
/// Key order is not part of the contract; the keys come back sorted.
pub fn list_keys(state: &AppState, captures: &Captures<'_>) -> Result<Payload, ResourceError> {
    let category = captures
        .category(0)
        .ok_or_else(|| ResourceError::Internal(String::from("route captured no index name")))?;
    let keys: Vec<&CategoryKey> = state.catalog.index(category).keys().collect();
    Payload::json(&keys)
}

// ---------------------------------------------------------------------------
// GET /{index}/{key} -- entry totals
// ---------------------------------------------------------------------------

/// Return `{totalRevenue, totalTickets, numMovies}` for one entry.
pub fn entry_summary(state: &AppState, captures: &Captures<'_>) -> Result<Payload, ResourceError> {
    let entry = find_entry(state, captures)?;
    Payload::json(&entry.summary())
}

// ---------------------------------------------------------------------------
// GET /{index}/{key}/movies -- entry members
// ---------------------------------------------------------------------------

/// Return the member movies of one entry, in dataset order.
pub fn entry_movies(state: &AppState, captures: &Captures<'_>) -> Result<Payload, ResourceError> {
    let entry = find_entry(state, captures)?;
    Payload::json(&MovieList(entry.movies()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the `(index, key)` captures to an entry.
///
/// The key is percent-decoded, then normalized exactly like the keys were
/// at build time, so `Walt%20Disney`, `walt disney ` and `WALT DISNEY` all
/// find the same entry.
fn find_entry<'s>(
    state: &'s AppState,
    captures: &Captures<'_>,
) -> Result<&'s IndexEntry, ResourceError> {
    let category = captures
        .category(0)
        .ok_or_else(|| ResourceError::Internal(String::from("route captured no index name")))?;
    let raw = captures
        .text(1)
        .ok_or_else(|| ResourceError::Internal(String::from("route captured no entry key")))?;
    let key = decode_segment(raw)?;

    state
        .catalog
        .index(category)
        .lookup(&key)
        .ok_or_else(|| ResourceError::NotFound(format!("{category}/{key}")))
}

/// Percent-decode a path segment into UTF-8 text.
///
/// A `%` not followed by two hex digits, or escapes that decode to invalid
/// UTF-8, are both rejected.
pub fn decode_segment(raw: &str) -> Result<Cow<'_, str>, ResourceError> {
    if let Some(at) = malformed_escape(raw) {
        return Err(ResourceError::InvalidSegment(format!(
            "{raw}: malformed percent escape at byte {at}"
        )));
    }
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| ResourceError::InvalidSegment(format!("{raw}: {e}")))
}

/// Position of the first `%` that does not start a `%XX` escape.
fn malformed_escape(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'%')
        .map(|(at, _)| at)
        .find(|&at| {
            let digits = bytes.get(at.saturating_add(1)..at.saturating_add(3));
            !digits.is_some_and(|d| d.iter().all(u8::is_ascii_hexdigit))
        })
}

#[cfg(test)]
mod tests {
    use boxoffice_index::{Catalog, parse_movies};

    use super::*;
    use crate::routing::RouteTable;

    fn state() -> AppState {
        let movies = parse_movies(
            r#"[
                {"title": "A", "studio": "Walt Disney", "genre": "Action", "revenue": 10, "tickets": 1},
                {"title": "B", "studio": "Fox", "genre": "Sci-Fi/Fantasy", "revenue": 20, "tickets": 2}
            ]"#,
        )
        .unwrap_or_default();
        AppState::new(Catalog::new(movies))
    }

    fn call(state: &AppState, path: &str) -> Result<Payload, ResourceError> {
        let routes = RouteTable::standard();
        let (route, captures) = routes
            .find(path)
            .ok_or_else(|| ResourceError::NotFound(path.to_owned()))?;
        (route.handler())(state, &captures)
    }

    fn json(payload: &Payload) -> serde_json::Value {
        serde_json::from_slice(payload.body()).unwrap_or_default()
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(decode_segment("walt%20disney").ok().as_deref(), Some("walt disney"));
        assert_eq!(decode_segment("plain").ok().as_deref(), Some("plain"));
        assert!(decode_segment("%FF%FE").is_err());
    }

    #[test]
    fn rejects_malformed_escapes() {
        for raw in ["%zz", "fox%", "fox%2", "%%41", "a%g1"] {
            assert!(
                matches!(decode_segment(raw), Err(ResourceError::InvalidSegment(_))),
                "{raw} should be rejected"
            );
        }
        assert_eq!(decode_segment("100%25").ok().as_deref(), Some("100%"));
    }

    #[test]
    fn malformed_key_is_a_fault() {
        let state = state();
        let err = call(&state, "/studios/%zz");
        assert!(matches!(err, Err(ResourceError::InvalidSegment(_))));
    }

    #[test]
    fn entry_lookup_decodes_and_normalizes() {
        let state = state();
        for path in [
            "/studios/walt%20disney",
            "/studios/Walt%20Disney",
            "/studios/%20WALT%20DISNEY%20",
        ] {
            let payload = call(&state, path);
            assert!(payload.is_ok(), "{path} should resolve");
        }
    }

    #[test]
    fn encoded_slash_resolves_to_dashed_key() {
        let state = state();
        let payload = call(&state, "/genres/sci-fi%2Ffantasy/movies");
        let body = payload.as_ref().map(json).unwrap_or_default();
        assert_eq!(body[0]["title"], "B");
    }

    #[test]
    fn unknown_key_is_not_found() {
        let state = state();
        let err = call(&state, "/studios/unknown");
        assert!(err.is_err_and(|e| e.is_not_found()));
    }

    #[test]
    fn invalid_utf8_key_is_a_fault() {
        let state = state();
        let err = call(&state, "/studios/%FF");
        assert!(matches!(err, Err(ResourceError::InvalidSegment(_))));
    }

    #[test]
    fn summary_omits_member_list() {
        let state = state();
        let body = call(&state, "/genres/action")
            .as_ref()
            .map(json)
            .unwrap_or_default();
        assert_eq!(
            body,
            serde_json::json!({"totalRevenue": 10, "totalTickets": 1, "numMovies": 1})
        );
    }

    #[test]
    fn missing_captures_are_faults() {
        let state = state();
        let err = entry_summary(&state, &Captures::default());
        assert!(matches!(err, Err(ResourceError::Internal(_))));
        let err = list_keys(&state, &Captures::default());
        assert!(matches!(err, Err(ResourceError::Internal(_))));
    }

    #[test]
    fn root_serves_html() {
        let state = state();
        let payload = call(&state, "/");
        assert!(matches!(payload, Ok(Payload::Html(_))));
    }
}
