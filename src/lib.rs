//! # Hantverk API
//!
//! Backend for a craftsman dashboard: customers, installers, materials and
//! orders stored in a document database and served over a small JSON API.
//!
//! ## Features
//!
//! - **Typed records**: request bodies validated at the boundary
//! - **Server-side pricing**: missing unit prices resolved from the material
//!   catalogue, order totals computed once on create
//! - **Read-time enrichment**: listed orders carry customer and installer names
//! - **Pluggable storage**: in-memory store by default, MongoDB behind the
//!   `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hantverk::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryDocumentStore::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod orders;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        collection::Collection,
        entity::{ListQuery, Record},
        error::{ApiError, ApiResult},
        query::Filter,
        store::DocumentStore,
        validation::Validated,
    };

    // === Records ===
    pub use crate::entities::{
        Customer, CustomerQuery, Installer, InstallerQuery, Material, MaterialQuery, Order,
        OrderItem, OrderQuery, RecordService,
    };
    pub use crate::orders::{EnrichedOrder, OrderCreated, OrderEngine};

    // === Storage ===
    pub use crate::storage::InMemoryDocumentStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDocumentStore;

    // === Config ===
    pub use crate::config::{AppConfig, DatabaseConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
