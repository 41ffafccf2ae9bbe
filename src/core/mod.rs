//! Core module containing the record model, store seam and error types

pub mod collection;
pub mod entity;
pub mod error;
pub mod id;
pub mod query;
pub mod serialize;
pub mod store;
pub mod validation;

pub use collection::Collection;
pub use entity::{ListQuery, Record};
pub use error::{ApiError, ApiResult};
pub use query::Filter;
pub use store::DocumentStore;
pub use validation::Validated;
