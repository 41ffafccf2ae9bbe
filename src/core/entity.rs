//! Traits tying typed records to their collection and list filters

use crate::core::collection::Collection;
use crate::core::query::Filter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// A typed record persisted in one collection.
///
/// Records are validated at the API boundary, converted to BSON documents on
/// insert and read back as documents through the serialization layer.
pub trait Record: Serialize + DeserializeOwned + Validate + Send + Sync + 'static {
    /// Query-string parameters accepted by the list endpoint
    type Query: ListQuery;

    /// The collection this record lives in
    fn collection() -> Collection;

    /// The plural resource name used in URLs (e.g. "customers")
    fn resource_name() -> &'static str {
        Self::collection().resource_name()
    }
}

/// Query-string parameters of a list endpoint
pub trait ListQuery: DeserializeOwned + Default + Send + Sync + 'static {
    /// Translate the parameters into a store filter
    fn filter(&self) -> Filter;
}

/// Treat an empty query-string value the same as an absent one
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
