//! Document store backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use self::in_memory::InMemoryDocumentStore;
#[cfg(feature = "mongodb_backend")]
pub use self::mongodb::MongoDocumentStore;

use crate::config::DatabaseConfig;
use crate::core::store::DocumentStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the store described by the database configuration
///
/// A configured URL selects MongoDB when the `mongodb_backend` feature is
/// compiled in; everything else runs on the in-memory store.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.url.as_deref() {
        #[cfg(feature = "mongodb_backend")]
        Some(url) => {
            let store = MongoDocumentStore::connect(url, config.name()).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        Some(_) => {
            tracing::warn!(
                "DATABASE_URL is set but the mongodb_backend feature is disabled; using in-memory store"
            );
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        None => {
            tracing::info!("no database configured; using in-memory store");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}
