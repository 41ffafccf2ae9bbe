//! Route table

use super::diagnostics;
use super::handlers::{AppState, create_order, create_record, list_orders, list_records};
use crate::core::entity::Record;
use crate::entities::{Customer, Installer, Material};
use axum::{Router, routing::get};

/// Build all API routes:
/// - GET / and GET /schema
/// - POST/GET /customers, /installers, /materials
/// - POST/GET /orders (priced on create, enriched on list)
/// - GET /test
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(diagnostics::root))
        .route("/schema", get(diagnostics::schema))
        .route("/test", get(diagnostics::test_database))
        .merge(record_routes::<Customer>())
        .merge(record_routes::<Installer>())
        .merge(record_routes::<Material>())
        .route("/orders", get(list_orders).post(create_order))
        .with_state(state)
}

/// Create/list routes for a pass-through record type
fn record_routes<T: Record>() -> Router<AppState> {
    let path = format!("/{}", T::resource_name());
    Router::new().route(&path, get(list_records::<T>).post(create_record::<T>))
}
