//! HTTP handlers for the record endpoints
//!
//! Customers, installers and materials share one generic create/list pair;
//! orders go through the [`OrderEngine`].

use crate::config::AppConfig;
use crate::core::entity::Record;
use crate::core::error::ApiResult;
use crate::core::id;
use crate::core::store::DocumentStore;
use crate::core::validation::Validated;
use crate::entities::order::{Order, OrderQuery};
use crate::entities::service::RecordService;
use crate::orders::{EnrichedOrder, OrderCreated, OrderEngine};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn records<T: Record>(&self) -> RecordService<T> {
        RecordService::new(self.store.clone())
    }

    pub fn orders(&self) -> OrderEngine {
        OrderEngine::new(self.store.clone())
    }
}

/// Response for a created record
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

/// `POST /{resource}`
pub async fn create_record<T: Record>(
    State(state): State<AppState>,
    Validated(record): Validated<T>,
) -> ApiResult<Json<Created>> {
    let id = state.records::<T>().create(&record).await?;
    Ok(Json(Created {
        id: id::encode(&id),
    }))
}

/// `GET /{resource}`
pub async fn list_records<T: Record>(
    State(state): State<AppState>,
    Query(query): Query<T::Query>,
) -> ApiResult<Json<Vec<Value>>> {
    let records = state.records::<T>().list(&query).await?;
    Ok(Json(records))
}

/// `POST /orders`
pub async fn create_order(
    State(state): State<AppState>,
    Validated(order): Validated<Order>,
) -> ApiResult<Json<OrderCreated>> {
    let created = state.orders().create_order(order).await?;
    Ok(Json(created))
}

/// `GET /orders`
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> ApiResult<Json<Vec<EnrichedOrder>>> {
    let orders = state.orders().list_orders(&query).await?;
    Ok(Json(orders))
}
