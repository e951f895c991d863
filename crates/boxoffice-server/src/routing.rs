//! Ordered path-pattern routing.
//!
//! A [`RouteTable`] is an ordered list of `(PathPattern, Handler)` bindings
//! evaluated first-match-wins. Patterns are anchored: they must consume the
//! whole path, modulo one optional trailing slash (the root pattern matches
//! exactly `/`). Each pattern is a sequence of [`Segment`] matchers, so
//! specificity is decided by table order and segment shape, never by an
//! implicit engine rule.
//!
//! # Data Flow
//! ```text
//! request path (query already stripped)
//!     -> RouteTable::find (linear scan, table order)
//!     -> PathPattern::matches (segment by segment)
//!     -> Some((route, captures)) | None
//! ```

use core::fmt;

use boxoffice_types::Category;

use crate::error::ResourceError;
use crate::handlers::{self, Payload};
use crate::state::AppState;

/// A resource handler: a pure function of the shared state and the
/// segments captured by its route.
pub type Handler = fn(&AppState, &Captures<'_>) -> Result<Payload, ResourceError>;

/// One segment matcher within a [`PathPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text; captures nothing.
    Literal(&'static str),
    /// Matches an index name (`studios`, `genres`, `ratings`) and captures
    /// it as a [`Category`].
    Category,
    /// Matches any non-empty segment and captures it verbatim (still
    /// percent-encoded). The name is only used for display.
    Param(&'static str),
}

impl Segment {
    fn accept<'p>(self, part: &'p str, captures: &mut Captures<'p>) -> bool {
        match self {
            Self::Literal(text) => part == text,
            Self::Category => Category::from_segment(part).is_some_and(|category| {
                captures.values.push(Capture::Category(category));
                true
            }),
            Self::Param(_) => {
                if part.is_empty() {
                    return false;
                }
                captures.values.push(Capture::Text(part));
                true
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Category => f.write_str("{category}"),
            Self::Param(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// A single captured path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture<'p> {
    /// A typed index name.
    Category(Category),
    /// Raw segment text.
    Text(&'p str),
}

/// Segments captured by a matching pattern, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures<'p> {
    values: Vec<Capture<'p>>,
}

impl<'p> Captures<'p> {
    /// The capture at `position`, if any.
    pub fn get(&self, position: usize) -> Option<Capture<'p>> {
        self.values.get(position).copied()
    }

    /// The capture at `position` if it is a category.
    pub fn category(&self, position: usize) -> Option<Category> {
        match self.get(position)? {
            Capture::Category(category) => Some(category),
            Capture::Text(_) => None,
        }
    }

    /// The capture at `position` if it is raw text.
    pub fn text(&self, position: usize) -> Option<&'p str> {
        match self.get(position)? {
            Capture::Text(text) => Some(text),
            Capture::Category(_) => None,
        }
    }
}

/// An anchored path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// The pattern matching exactly `/`.
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// A pattern built from segment matchers, left to right.
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Match `path` against this pattern, returning the captures on success.
    pub fn matches<'p>(&self, path: &'p str) -> Option<Captures<'p>> {
        let rest = path.strip_prefix('/')?;
        if self.segments.is_empty() {
            return rest.is_empty().then(Captures::default);
        }

        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let mut parts = rest.split('/');
        let mut captures = Captures::default();
        for segment in &self.segments {
            let part = parts.next()?;
            if !segment.accept(part, &mut captures) {
                return None;
            }
        }
        parts.next().is_none().then_some(captures)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// A named `(pattern, handler)` binding.
#[derive(Debug, Clone)]
pub struct Route {
    name: &'static str,
    pattern: PathPattern,
    handler: Handler,
}

impl Route {
    /// Route name used in logs.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The pattern this route matches.
    pub const fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The bound handler.
    pub const fn handler(&self) -> Handler {
        self.handler
    }
}

/// Ordered route bindings, evaluated first-match-wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// An empty table; every path is unmatched.
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a binding. Earlier bindings take precedence.
    #[must_use]
    pub fn route(mut self, name: &'static str, pattern: PathPattern, handler: Handler) -> Self {
        self.routes.push(Route {
            name,
            pattern,
            handler,
        });
        self
    }

    /// The catalog's route table:
    ///
    /// 1. `/` -- root page
    /// 2. `/movies` -- all movies
    /// 3. `/{category}` -- keys of one index
    /// 4. `/{category}/{key}` -- totals for one entry
    /// 5. `/{category}/{key}/movies` -- members of one entry
    pub fn standard() -> Self {
        Self::new()
            .route("root", PathPattern::root(), handlers::root)
            .route(
                "all_movies",
                PathPattern::new([Segment::Literal("movies")]),
                handlers::all_movies,
            )
            .route(
                "list_keys",
                PathPattern::new([Segment::Category]),
                handlers::list_keys,
            )
            .route(
                "entry_summary",
                PathPattern::new([Segment::Category, Segment::Param("key")]),
                handlers::entry_summary,
            )
            .route(
                "entry_movies",
                PathPattern::new([
                    Segment::Category,
                    Segment::Param("key"),
                    Segment::Literal("movies"),
                ]),
                handlers::entry_movies,
            )
    }

    /// Find the first route matching `path`, with its captures.
    pub fn find<'p>(&self, path: &'p str) -> Option<(&Route, Captures<'p>)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.matches(path).map(|captures| (route, captures)))
    }

    /// Iterate over bindings in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
