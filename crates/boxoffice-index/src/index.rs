//! Per-category aggregate indexes.
//!
//! A [`CategoryIndex`] maps each [`CategoryKey`] of one [`Category`] to an
//! [`IndexEntry`] holding the member movies (in dataset order) and the
//! running revenue and ticket totals over exactly those movies.
//!
//! # Numeric gaps
//!
//! A member movie whose `revenue` or `tickets` is missing or not a JSON
//! number contributes zero to that total. The movie is still a member and
//! still counts toward `numMovies`; the entry records it in
//! [`IndexEntry::data_gaps`] so the builder can report it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use boxoffice_types::{Amount, Category, CategoryKey, Movie};
use serde::Serialize;

/// Aggregate record for one category key.
///
/// Entries are created lazily on the first contributing movie, so the
/// member list is never empty.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    total_revenue: Amount,
    total_tickets: Amount,
    movies: Vec<Arc<Movie>>,
    data_gaps: usize,
}

impl IndexEntry {
    fn first(movie: &Arc<Movie>) -> Self {
        let mut entry = Self {
            total_revenue: Amount::ZERO,
            total_tickets: Amount::ZERO,
            movies: Vec::new(),
            data_gaps: 0,
        };
        entry.push(movie);
        entry
    }

    fn push(&mut self, movie: &Arc<Movie>) {
        let revenue = movie.revenue();
        let tickets = movie.tickets();
        if revenue.is_none() || tickets.is_none() {
            self.data_gaps = self.data_gaps.saturating_add(1);
        }
        self.total_revenue += revenue.unwrap_or(Amount::ZERO);
        self.total_tickets += tickets.unwrap_or(Amount::ZERO);
        self.movies.push(Arc::clone(movie));
    }

    /// Sum of `revenue` over the member movies.
    pub const fn total_revenue(&self) -> Amount {
        self.total_revenue
    }

    /// Sum of `tickets` over the member movies.
    pub const fn total_tickets(&self) -> Amount {
        self.total_tickets
    }

    /// Member movies in dataset order.
    pub fn movies(&self) -> &[Arc<Movie>] {
        &self.movies
    }

    /// Number of member movies.
    pub fn num_movies(&self) -> usize {
        self.movies.len()
    }

    /// Number of member movies missing a numeric `revenue` or `tickets`.
    pub const fn data_gaps(&self) -> usize {
        self.data_gaps
    }

    /// The aggregate view of this entry, without the member list.
    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            total_revenue: self.total_revenue,
            total_tickets: self.total_tickets,
            num_movies: self.movies.len(),
        }
    }
}

/// Totals for one index entry, as served by the entry resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    /// Sum of member revenue.
    pub total_revenue: Amount,
    /// Sum of member ticket sales.
    pub total_tickets: Amount,
    /// Number of member movies.
    pub num_movies: usize,
}

/// Mapping from category key to aggregate entry for one category.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    category: Category,
    entries: BTreeMap<CategoryKey, IndexEntry>,
}

impl CategoryIndex {
    /// Build the index for `category` in a single pass over `movies`.
    ///
    /// Movies whose category field is absent, `null`, not a string, or
    /// blank after normalization are left out of this index.
    pub fn build(category: Category, movies: &[Arc<Movie>]) -> Self {
        let mut entries: BTreeMap<CategoryKey, IndexEntry> = BTreeMap::new();

        for movie in movies {
            let Some(key) = movie.category_key(category) else {
                continue;
            };
            match entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(IndexEntry::first(movie));
                }
                Entry::Occupied(mut slot) => slot.get_mut().push(movie),
            }
        }

        Self { category, entries }
    }

    /// The category this index is built over.
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Look up an entry by an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    /// Look up an entry by a raw value, normalizing it first.
    ///
    /// `" Action "`, `"ACTION"` and `"action"` all resolve to the same
    /// entry. A value that normalizes to nothing finds nothing.
    pub fn lookup(&self, raw: &str) -> Option<&IndexEntry> {
        CategoryKey::normalize(raw).and_then(|key| self.entries.get(&key))
    }

    /// Keys present in the index, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.entries.keys()
    }

    /// Iterate over `(key, entry)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &IndexEntry)> {
        self.entries.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no movie contributed to this index.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total member movies with numeric gaps across all entries.
    pub fn data_gaps(&self) -> usize {
        self.entries
            .values()
            .map(IndexEntry::data_gaps)
            .fold(0, usize::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn movies(values: Value) -> Vec<Arc<Movie>> {
        let Value::Array(items) = values else {
            return Vec::new();
        };
        items
            .into_iter()
            .map(Movie::from)
            .map(Arc::new)
            .collect()
    }

    fn sample() -> Vec<Arc<Movie>> {
        movies(json!([
            {"title": "A", "studio": "Fox", "genre": "Action", "revenue": 100, "tickets": 10},
            {"title": "B", "studio": "fox ", "genre": " action ", "revenue": 50, "tickets": 5},
            {"title": "C", "studio": "Disney", "genre": "Animation/Family", "revenue": 7, "tickets": 1},
            {"title": "D", "studio": null, "genre": "", "revenue": 3, "tickets": 3},
            {"title": "E", "genre": "ACTION", "revenue": 1, "tickets": 2}
        ]))
    }

    #[test]
    fn variants_fold_into_one_entry() {
        let index = CategoryIndex::build(Category::Studios, &sample());
        let fox = index.get("fox");
        assert!(fox.is_some());
        let summary = fox.map(IndexEntry::summary);
        assert_eq!(
            summary,
            Some(EntrySummary {
                total_revenue: Amount::Int(150),
                total_tickets: Amount::Int(15),
                num_movies: 2,
            })
        );
    }

    #[test]
    fn absent_null_and_blank_values_are_excluded() {
        let all = sample();
        let studios = CategoryIndex::build(Category::Studios, &all);
        let member_count: usize = studios.iter().map(|(_, e)| e.num_movies()).sum();
        // D (null) and E (absent) are not members.
        assert_eq!(member_count, 3);

        let genres = CategoryIndex::build(Category::Genres, &all);
        let member_count: usize = genres.iter().map(|(_, e)| e.num_movies()).sum();
        // D (blank genre) is not a member.
        assert_eq!(member_count, 4);
    }

    #[test]
    fn members_keep_dataset_order() {
        let index = CategoryIndex::build(Category::Genres, &sample());
        let titles: Vec<&str> = index
            .get("action")
            .map(|e| e.movies().iter().map(|m| m.title()).collect())
            .unwrap_or_default();
        assert_eq!(titles, ["A", "B", "E"]);
    }

    #[test]
    fn each_member_appears_exactly_once() {
        let all = sample();
        let index = CategoryIndex::build(Category::Studios, &all);
        for movie in &all {
            let Some(key) = movie.category_key(Category::Studios) else {
                continue;
            };
            let occurrences = index
                .get(key.as_str())
                .map(|e| e.movies().iter().filter(|m| Arc::ptr_eq(m, movie)).count())
                .unwrap_or_default();
            assert_eq!(occurrences, 1, "{} should appear once", movie.title());
        }
    }

    #[test]
    fn totals_equal_sums_over_members() {
        let all = sample();
        for category in Category::ALL {
            let index = CategoryIndex::build(category, &all);
            for (key, entry) in index.iter() {
                let revenue = entry
                    .movies()
                    .iter()
                    .filter_map(|m| m.revenue())
                    .fold(Amount::ZERO, |acc, a| acc + a);
                let tickets = entry
                    .movies()
                    .iter()
                    .filter_map(|m| m.tickets())
                    .fold(Amount::ZERO, |acc, a| acc + a);
                assert_eq!(entry.total_revenue(), revenue, "revenue for {key}");
                assert_eq!(entry.total_tickets(), tickets, "tickets for {key}");
                assert!(entry.num_movies() > 0);
            }
        }
    }

    #[test]
    fn lookup_normalizes_the_request_value() {
        let index = CategoryIndex::build(Category::Genres, &sample());
        assert!(index.lookup("  ACTION ").is_some());
        assert!(index.lookup("Animation/Family").is_some());
        assert!(index.lookup("animation-family").is_some());
        assert!(index.lookup("horror").is_none());
        assert!(index.lookup("   ").is_none());
    }

    #[test]
    fn missing_numbers_contribute_zero_and_are_counted() {
        let all = movies(json!([
            {"rating": "PG", "revenue": 10, "tickets": 1},
            {"rating": "pg", "tickets": 4},
            {"rating": "PG", "revenue": "lots", "tickets": 2}
        ]));
        let index = CategoryIndex::build(Category::Ratings, &all);
        let entry = index.get("pg");
        assert_eq!(entry.map(IndexEntry::total_revenue), Some(Amount::Int(10)));
        assert_eq!(entry.map(IndexEntry::total_tickets), Some(Amount::Int(7)));
        assert_eq!(entry.map(IndexEntry::num_movies), Some(3));
        assert_eq!(index.data_gaps(), 2);
    }

    #[test]
    fn empty_dataset_builds_empty_index() {
        let index = CategoryIndex::build(Category::Genres, &[]);
        assert!(index.is_empty());
        assert_eq!(index.keys().count(), 0);
        assert_eq!(index.category(), Category::Genres);
    }

    #[test]
    fn summary_serializes_with_camel_case_fields() {
        let index = CategoryIndex::build(Category::Studios, &sample());
        let json = index
            .get("fox")
            .and_then(|e| serde_json::to_value(e.summary()).ok());
        assert_eq!(
            json,
            Some(json!({"totalRevenue": 150, "totalTickets": 15, "numMovies": 2}))
        );
    }
}
