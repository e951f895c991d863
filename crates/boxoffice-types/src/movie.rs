//! Movie records.
//!
//! A [`Movie`] wraps the dataset element exactly as it appeared in the
//! file. Only the category fields and the numeric `revenue` / `tickets`
//! fields are ever interpreted; every other attribute is carried opaquely
//! and serialized back unchanged, in its original order.
//!
//! Elements that are not JSON objects are still movies: they have no
//! fields, so they appear in the full list but in no index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::amount::Amount;
use crate::category::{Category, CategoryKey};

/// Field holding a movie's box-office revenue.
pub const REVENUE_FIELD: &str = "revenue";

/// Field holding a movie's ticket sales.
pub const TICKETS_FIELD: &str = "tickets";

/// A single movie record from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Movie(Value);

impl Movie {
    /// Wrap a JSON object as a movie record.
    pub const fn new(attributes: Map<String, Value>) -> Self {
        Self(Value::Object(attributes))
    }

    /// Returns `true` if the element is a JSON object.
    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    /// Look up a single attribute. Non-object elements have none.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.as_object()?.get(field)
    }

    /// The raw value of a category field, if it is a string.
    ///
    /// Absent, `null`, and non-string values all read as `None`.
    pub fn category_value(&self, category: Category) -> Option<&str> {
        self.get(category.field()).and_then(Value::as_str)
    }

    /// The normalized key of a category field, if it has one.
    pub fn category_key(&self, category: Category) -> Option<CategoryKey> {
        self.category_value(category).and_then(CategoryKey::normalize)
    }

    /// Box-office revenue, if present and numeric.
    pub fn revenue(&self) -> Option<Amount> {
        self.get(REVENUE_FIELD).and_then(Amount::from_json)
    }

    /// Ticket sales, if present and numeric.
    pub fn tickets(&self) -> Option<Amount> {
        self.get(TICKETS_FIELD).and_then(Amount::from_json)
    }

    /// Display title for log lines, falling back to a placeholder.
    pub fn title(&self) -> &str {
        self.get("title")
            .and_then(Value::as_str)
            .unwrap_or("<untitled>")
    }
}

impl From<Map<String, Value>> for Movie {
    fn from(attributes: Map<String, Value>) -> Self {
        Self::new(attributes)
    }
}

impl From<Value> for Movie {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn movie(value: Value) -> Movie {
        Movie::from(value)
    }

    #[test]
    fn reads_category_fields() {
        let m = movie(json!({"studio": " Fox ", "genre": "Action/Adventure", "rating": null}));
        assert_eq!(m.category_value(Category::Studios), Some(" Fox "));
        assert_eq!(
            m.category_key(Category::Genres).map(CategoryKey::into_inner),
            Some(String::from("action-adventure"))
        );
        assert_eq!(m.category_key(Category::Ratings), None);
    }

    #[test]
    fn non_string_categories_read_as_absent() {
        let m = movie(json!({"studio": 7, "genre": ["Drama"]}));
        assert_eq!(m.category_value(Category::Studios), None);
        assert_eq!(m.category_value(Category::Genres), None);
    }

    #[test]
    fn numeric_fields() {
        let m = movie(json!({"revenue": 100, "tickets": "ten"}));
        assert_eq!(m.revenue(), Some(Amount::Int(100)));
        assert_eq!(m.tickets(), None);
    }

    #[test]
    fn serializes_all_attributes_in_order() {
        let m = movie(json!({"title": "Brave", "studio": "Disney", "year": 2012, "extra": {"a": 1}}));
        let text = serde_json::to_string(&m).unwrap_or_default();
        assert_eq!(
            text,
            r#"{"title":"Brave","studio":"Disney","year":2012,"extra":{"a":1}}"#
        );
    }

    #[test]
    fn non_objects_have_no_fields() {
        for value in [json!([1, 2]), json!("movie"), json!(null), json!(7)] {
            let m = movie(value.clone());
            assert!(!m.is_object());
            assert_eq!(m.category_key(Category::Genres), None);
            assert_eq!(m.revenue(), None);
            assert_eq!(m.title(), "<untitled>");
            assert_eq!(serde_json::to_value(&m).ok(), Some(value));
        }
    }

    #[test]
    fn wraps_object_maps() {
        let mut attributes = Map::new();
        attributes.insert(String::from("studio"), json!("Fox"));
        let m = Movie::from(attributes);
        assert!(m.is_object());
        assert_eq!(m.category_value(Category::Studios), Some("Fox"));
    }
}
