//! The immutable catalog snapshot.
//!
//! [`Catalog`] owns the full movie collection and the three category
//! indexes built from it. It is constructed once, before the server
//! accepts requests, and only ever read afterwards.

use std::sync::Arc;

use boxoffice_types::{Category, Movie};
use tracing::{info, warn};

use crate::index::CategoryIndex;

/// The movie collection plus its studio, genre, and rating indexes.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Arc<Movie>>,
    studios: CategoryIndex,
    genres: CategoryIndex,
    ratings: CategoryIndex,
}

impl Catalog {
    /// Build all indexes over `movies`, keeping dataset order.
    pub fn new(movies: Vec<Movie>) -> Self {
        let movies: Vec<Arc<Movie>> = movies.into_iter().map(Arc::new).collect();

        let studios = CategoryIndex::build(Category::Studios, &movies);
        let genres = CategoryIndex::build(Category::Genres, &movies);
        let ratings = CategoryIndex::build(Category::Ratings, &movies);

        let catalog = Self {
            movies,
            studios,
            genres,
            ratings,
        };
        catalog.report_data_quality();
        catalog
    }

    /// An empty catalog.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// All movies in dataset order.
    pub fn movies(&self) -> &[Arc<Movie>] {
        &self.movies
    }

    /// Number of movies loaded.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Returns `true` if the dataset held no movies.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// The index for one category.
    pub const fn index(&self, category: Category) -> &CategoryIndex {
        match category {
            Category::Studios => &self.studios,
            Category::Genres => &self.genres,
            Category::Ratings => &self.ratings,
        }
    }

    fn report_data_quality(&self) {
        let non_objects = self.movies.iter().filter(|m| !m.is_object()).count();
        if non_objects > 0 {
            warn!(
                records = non_objects,
                "dataset elements are not objects; listed but not indexed"
            );
        }
        for category in Category::ALL {
            let index = self.index(category);
            let gaps = index.data_gaps();
            if gaps > 0 {
                warn!(
                    index = %category,
                    movies = gaps,
                    "movies missing numeric revenue or tickets; counted as zero"
                );
            }
        }
    }

    /// Log a one-line summary of the loaded catalog.
    pub fn log_summary(&self) {
        info!(
            movies = self.movies.len(),
            studios = self.studios.len(),
            genres = self.genres.len(),
            ratings = self.ratings.len(),
            "finished loading and indexing movies"
        );
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog(values: serde_json::Value) -> Catalog {
        let movies = match values {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Movie::from)
                .collect(),
            _ => Vec::new(),
        };
        Catalog::new(movies)
    }

    #[test]
    fn indexes_are_built_independently() {
        let c = catalog(json!([
            {"title": "One", "studio": "Fox", "genre": "Drama", "rating": "R", "revenue": 1, "tickets": 1},
            {"title": "Two", "studio": "Fox", "rating": "PG", "revenue": 2, "tickets": 2}
        ]));
        assert_eq!(c.len(), 2);
        assert_eq!(c.index(Category::Studios).len(), 1);
        assert_eq!(c.index(Category::Genres).len(), 1);
        assert_eq!(c.index(Category::Ratings).len(), 2);
        assert_eq!(c.index(Category::Ratings).category(), Category::Ratings);
    }

    #[test]
    fn uncategorized_movies_stay_in_the_full_list() {
        let c = catalog(json!([
            {"title": "Orphan", "revenue": 5, "tickets": 1}
        ]));
        assert_eq!(c.len(), 1);
        for category in Category::ALL {
            assert!(c.index(category).is_empty());
        }
    }

    #[test]
    fn index_members_share_the_catalog_records() {
        let c = catalog(json!([
            {"title": "Shared", "studio": "Fox", "genre": "Action", "revenue": 1, "tickets": 1}
        ]));
        let in_studio = c
            .index(Category::Studios)
            .get("fox")
            .and_then(|e| e.movies().first().cloned());
        let in_genre = c
            .index(Category::Genres)
            .get("action")
            .and_then(|e| e.movies().first().cloned());
        let original = c.movies().first().cloned();
        assert!(matches!((&in_studio, &original), (Some(a), Some(b)) if Arc::ptr_eq(a, b)));
        assert!(matches!((&in_genre, &original), (Some(a), Some(b)) if Arc::ptr_eq(a, b)));
    }

    #[test]
    fn empty_catalog() {
        let c = Catalog::empty();
        assert!(c.is_empty());
        assert!(c.index(Category::Genres).is_empty());
    }
}
