//! Query filters understood by every document store
//!
//! Filters are deliberately small: equality, case-insensitive substring and
//! boolean AND/OR composition. Backends either evaluate them directly
//! ([`Filter::matches`]) or translate them into their own query language.

use bson::oid::ObjectId;
use bson::{Bson, Document};

/// A predicate over stored documents
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,

    /// Field equals the given value exactly
    Eq { field: String, value: Bson },

    /// Field is a string containing `needle`, ignoring case
    Contains { field: String, needle: String },

    /// Every sub-filter matches (empty = match all)
    And(Vec<Filter>),

    /// At least one sub-filter matches (empty = match none)
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Match a single document by its store identifier
    pub fn id(id: ObjectId) -> Self {
        Filter::eq("_id", id)
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Case-insensitive substring search over several fields (logical OR)
    pub fn search(fields: &[&str], needle: &str) -> Self {
        Filter::Or(
            fields
                .iter()
                .map(|field| Filter::contains(*field, needle))
                .collect(),
        )
    }

    /// Combine filters with AND, collapsing the trivial cases
    pub fn all_of(mut filters: Vec<Filter>) -> Self {
        filters.retain(|f| *f != Filter::All);
        match filters.len() {
            0 => Filter::All,
            1 => filters.remove(0),
            _ => Filter::And(filters),
        }
    }

    /// Evaluate the filter against a document
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => doc.get(field) == Some(value),
            Filter::Contains { field, needle } => match doc.get(field) {
                Some(Bson::String(s)) => s.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}
