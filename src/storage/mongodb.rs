//! MongoDB document store using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! One MongoDB collection per [`Collection`], named by its singular name
//! ("customer", "installer", "material", "order"). Documents are stored as
//! given; the driver generates `_id` as an `ObjectId` on insert.
//!
//! # Filters
//!
//! [`Filter`] values are translated to MongoDB query documents. Substring
//! filters become a case-insensitive `$regex` over the escaped needle, so
//! user input is always matched literally.

use crate::core::collection::Collection;
use crate::core::error::StorageError;
use crate::core::query::Filter;
use crate::core::store::DocumentStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};

/// Translate a filter into a MongoDB query document
pub fn filter_to_document(filter: &Filter) -> Document {
    match filter {
        Filter::All => doc! {},
        Filter::Eq { field, value } => doc! { field.as_str(): value.clone() },
        Filter::Contains { field, needle } => doc! {
            field.as_str(): { "$regex": regex::escape(needle), "$options": "i" }
        },
        Filter::And(filters) if filters.is_empty() => doc! {},
        Filter::And(filters) => doc! { "$and": clauses(filters) },
        // MongoDB rejects an empty `$or`
        Filter::Or(filters) if filters.is_empty() => doc! { "_id": { "$exists": false } },
        Filter::Or(filters) => doc! { "$or": clauses(filters) },
    }
}

fn clauses(filters: &[Filter]) -> Vec<Bson> {
    filters
        .iter()
        .map(|f| Bson::Document(filter_to_document(f)))
        .collect()
}

/// Document store backed by MongoDB
///
/// # Example
///
/// ```rust,ignore
/// let store = MongoDocumentStore::connect("mongodb://localhost:27017", "hantverk").await?;
/// let id = store.insert(Collection::Customer, doc! { "name": "Alice" }).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDocumentStore {
    database: Database,
}

impl MongoDocumentStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to a MongoDB deployment and select a database
    pub async fn connect(url: &str, database_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(url).await.map_err(|e| {
            anyhow::Error::new(StorageError::ConnectionError {
                backend: "MongoDB".to_string(),
                message: e.to_string(),
            })
        })?;

        tracing::info!(database = database_name, "connected to MongoDB");
        Ok(Self::new(client.database(database_name)))
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, collection: Collection, document: Document) -> Result<ObjectId> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| anyhow!("Failed to insert into {}: {}", collection, e))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow!("Inserted id in {} is not an ObjectId", collection))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(filter_to_document(filter))
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", collection, e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {} documents: {}", collection, e))
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        self.collection(collection)
            .find_one(filter_to_document(filter))
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", collection, e))
    }

    async fn collection_names(&self) -> Result<Vec<String>> {
        self.database
            .list_collection_names()
            .await
            .map_err(|e| anyhow!("Failed to list collections: {}", e))
    }
}
