//! Order creation with server-side pricing, and enriched order listing

pub mod engine;
pub mod pricing;

pub use engine::{EnrichedOrder, OrderCreated, OrderEngine};
