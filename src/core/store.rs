//! Document store gateway

use crate::core::collection::Collection;
use crate::core::query::Filter;
use anyhow::Result;
use async_trait::async_trait;
use bson::Document;
use bson::oid::ObjectId;

/// Create/find access to the four collections
///
/// Implementations only build and run queries: no validation, no
/// transformation and no error translation beyond passing store failures
/// through as `anyhow::Error`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in logs and error messages
    fn backend_name(&self) -> &'static str;

    /// Insert a document; the store generates and returns its `_id`
    async fn insert(&self, collection: Collection, document: Document) -> Result<ObjectId>;

    /// All documents matching the filter, in the store's natural order
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>>;

    /// First document matching the filter
    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    /// Names of the collections that currently exist
    async fn collection_names(&self) -> Result<Vec<String>>;
}
