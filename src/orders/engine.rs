//! Order pricing and enrichment
//!
//! Creating an order resolves every missing unit price from the material
//! catalogue, computes the total once and persists the result. Listing orders
//! attaches the customer and installer names, looked up at read time.

use crate::core::collection::Collection;
use crate::core::entity::ListQuery;
use crate::core::error::{ApiResult, EntityError, FieldValidationError, ValidationError};
use crate::core::id;
use crate::core::query::Filter;
use crate::core::serialize;
use crate::core::store::DocumentStore;
use crate::entities::order::{Order, OrderQuery};
use crate::orders::pricing;
use bson::Document;
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Response of a successful order creation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreated {
    pub id: String,
    pub total: f64,
}

/// A serialized order with denormalized names attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedOrder {
    #[serde(flatten)]
    pub order: Map<String, Value>,
    pub customer_name: Option<String>,
    pub installer_name: Option<String>,
}

#[derive(Clone)]
pub struct OrderEngine {
    store: Arc<dyn DocumentStore>,
}

impl OrderEngine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Price and persist a validated order.
    ///
    /// Fails with `MaterialNotFound` when an item without an explicit unit
    /// price references a material that does not exist, and with a field
    /// error when the total overflows `f64`. Both checks happen before the
    /// insert, so a failed creation persists nothing.
    pub async fn create_order(&self, mut order: Order) -> ApiResult<OrderCreated> {
        for item in order.items.iter_mut() {
            if item.unit_price.is_some() {
                continue;
            }
            let material_id = id::decode(&item.material_id)?;
            let material = self
                .store
                .find_one(Collection::Material, &Filter::id(material_id))
                .await?
                .ok_or_else(|| EntityError::MaterialNotFound {
                    material_id: item.material_id.clone(),
                })?;
            item.unit_price = Some(pricing::material_price(&material));
        }

        let total = pricing::order_total(&order.items);
        if !total.is_finite() {
            return Err(ValidationError::FieldErrors(vec![FieldValidationError {
                field: "total".to_string(),
                message: "order total is too large".to_string(),
            }])
            .into());
        }
        order.total = Some(total);

        let document = bson::to_document(&order)?;
        let id = self.store.insert(Collection::Order, document).await?;

        tracing::info!(
            order_id = %id,
            items = order.items.len(),
            total,
            "order created"
        );

        Ok(OrderCreated {
            id: id::encode(&id),
            total,
        })
    }

    /// List orders matching the query, each enriched with customer and
    /// installer names. Store order is preserved.
    pub async fn list_orders(&self, query: &OrderQuery) -> ApiResult<Vec<EnrichedOrder>> {
        let filter = query.filter();
        tracing::debug!(?filter, "listing orders");

        let documents = self.store.find(Collection::Order, &filter).await?;
        try_join_all(documents.into_iter().map(|doc| self.enrich(doc))).await
    }

    async fn enrich(&self, doc: Document) -> ApiResult<EnrichedOrder> {
        let customer_ref = reference(&doc, "customer_id");
        let installer_ref = reference(&doc, "installer_id");

        let (customer_name, installer_name) = futures::try_join!(
            self.name_of(Collection::Customer, customer_ref.as_deref()),
            self.name_of(Collection::Installer, installer_ref.as_deref()),
        )?;

        let order = match serialize::to_json(doc) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Ok(EnrichedOrder {
            order,
            customer_name,
            installer_name,
        })
    }

    /// Name of the referenced record, or `None` when the reference is absent
    /// or dangling
    async fn name_of(
        &self,
        collection: Collection,
        reference: Option<&str>,
    ) -> ApiResult<Option<String>> {
        let Some(reference) = reference else {
            return Ok(None);
        };

        let id = id::decode(reference)?;
        let Some(record) = self.store.find_one(collection, &Filter::id(id)).await? else {
            tracing::warn!(%collection, reference, "dangling reference");
            return Ok(None);
        };

        Ok(record.get_str("name").ok().map(String::from))
    }
}

/// A non-empty string reference stored on the order
fn reference(doc: &Document, field: &str) -> Option<String> {
    doc.get_str(field)
        .ok()
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use crate::entities::order::OrderItem;
    use crate::storage::InMemoryDocumentStore;
    use bson::doc;
    use bson::oid::ObjectId;

    fn engine() -> (OrderEngine, Arc<InMemoryDocumentStore>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        (OrderEngine::new(store.clone()), store)
    }

    fn order(customer_id: &str, items: Vec<OrderItem>) -> Order {
        Order {
            customer_id: customer_id.to_string(),
            installer_id: None,
            items,
            status: "new".to_string(),
            scheduled_date: None,
            total: None,
            notes: None,
        }
    }

    fn item(material_id: &str, quantity: f64, unit_price: Option<f64>) -> OrderItem {
        OrderItem {
            material_id: material_id.to_string(),
            quantity,
            unit_price,
        }
    }

    #[tokio::test]
    async fn test_explicit_prices_ignore_catalogue() {
        let (engine, store) = engine();
        let unknown = ObjectId::new().to_hex();

        let created = engine
            .create_order(order(
                "c1",
                vec![item(&unknown, 3.0, Some(1.25)), item("not-even-an-id", 2.0, Some(0.5))],
            ))
            .await
            .unwrap();

        assert_eq!(created.total, 4.75);
        let stored = store
            .find(Collection::Order, &Filter::All)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_price_resolved_from_material() {
        let (engine, store) = engine();
        let material_id = store
            .insert(Collection::Material, doc! { "sku": "M1", "name": "Skruv", "price": 2.5 })
            .await
            .unwrap();

        let created = engine
            .create_order(order("c1", vec![item(&material_id.to_hex(), 4.0, None)]))
            .await
            .unwrap();
        assert_eq!(created.total, 10.0);

        let stored = store
            .find_one(Collection::Order, &Filter::All)
            .await
            .unwrap()
            .unwrap();
        let items = stored.get_array("items").unwrap();
        let first = items[0].as_document().unwrap();
        assert_eq!(first.get_f64("unit_price").unwrap(), 2.5);
        assert_eq!(stored.get_f64("total").unwrap(), 10.0);
    }

    #[tokio::test]
    async fn test_material_without_price_counts_as_zero() {
        let (engine, store) = engine();
        let material_id = store
            .insert(Collection::Material, doc! { "sku": "M2", "name": "Gratis" })
            .await
            .unwrap();

        let created = engine
            .create_order(order("c1", vec![item(&material_id.to_hex(), 5.0, None)]))
            .await
            .unwrap();
        assert_eq!(created.total, 0.0);
    }

    #[tokio::test]
    async fn test_missing_material_persists_nothing() {
        let (engine, store) = engine();
        let ghost = ObjectId::new().to_hex();

        let err = engine
            .create_order(order(
                "c1",
                vec![item(&ghost, 1.0, Some(3.0)), item(&ghost, 1.0, None)],
            ))
            .await
            .unwrap_err();

        match err {
            ApiError::Entity(EntityError::MaterialNotFound { material_id }) => {
                assert_eq!(material_id, ghost)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let stored = store.find(Collection::Order, &Filter::All).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_material_reference_is_invalid_identifier() {
        let (engine, _) = engine();
        let err = engine
            .create_order(order("c1", vec![item("xyz", 1.0, None)]))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_IDENTIFIER");
    }

    #[tokio::test]
    async fn test_empty_order_totals_zero() {
        let (engine, _) = engine();
        let created = engine.create_order(order("c1", vec![])).await.unwrap();
        assert_eq!(created.total, 0.0);
        assert!(id::decode(&created.id).is_ok());
    }

    #[tokio::test]
    async fn test_client_total_is_overwritten() {
        let (engine, _) = engine();
        let mut payload = order("c1", vec![item("m", 2.0, Some(2.0))]);
        payload.total = Some(999.0);

        let created = engine.create_order(payload).await.unwrap();
        assert_eq!(created.total, 4.0);
    }

    #[tokio::test]
    async fn test_overflowing_total_rejected_and_not_persisted() {
        let (engine, store) = engine();
        let err = engine
            .create_order(order("c1", vec![item("m", 1e200, Some(1e200))]))
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.status_code(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
        let stored = store.find(Collection::Order, &Filter::All).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_list_enriches_names() {
        let (engine, store) = engine();
        let customer = store
            .insert(Collection::Customer, doc! { "name": "Alice" })
            .await
            .unwrap();
        let installer = store
            .insert(Collection::Installer, doc! { "name": "Erik", "active": true })
            .await
            .unwrap();

        let mut payload = order(&customer.to_hex(), vec![]);
        payload.installer_id = Some(installer.to_hex());
        let created = engine.create_order(payload).await.unwrap();

        let listed = engine.list_orders(&OrderQuery::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].order["id"], created.id);
        assert_eq!(listed[0].customer_name.as_deref(), Some("Alice"));
        assert_eq!(listed[0].installer_name.as_deref(), Some("Erik"));
    }

    #[tokio::test]
    async fn test_dangling_customer_yields_null_name() {
        let (engine, _) = engine();
        engine
            .create_order(order(&ObjectId::new().to_hex(), vec![]))
            .await
            .unwrap();

        let listed = engine.list_orders(&OrderQuery::default()).await.unwrap();
        assert_eq!(listed[0].customer_name, None);
        assert_eq!(listed[0].installer_name, None);

        let json = serde_json::to_value(&listed[0]).unwrap();
        assert!(json["customer_name"].is_null());
        assert!(json["installer_name"].is_null());
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_customer() {
        let (engine, _) = engine();
        let alice = ObjectId::new().to_hex();
        let bob = ObjectId::new().to_hex();

        for (customer, status) in [(&alice, "new"), (&alice, "done"), (&bob, "new")] {
            let mut payload = order(customer, vec![]);
            payload.status = status.to_string();
            engine.create_order(payload).await.unwrap();
        }

        let alice_new = engine
            .list_orders(&OrderQuery {
                status: Some("new".to_string()),
                customer_id: Some(alice.clone()),
            })
            .await
            .unwrap();
        assert_eq!(alice_new.len(), 1);
        assert_eq!(alice_new[0].order["customer_id"], alice);

        let all_new = engine
            .list_orders(&OrderQuery {
                status: Some("new".to_string()),
                customer_id: None,
            })
            .await
            .unwrap();
        assert_eq!(all_new.len(), 2);
    }

    #[test]
    fn test_reference_skips_empty_strings() {
        assert_eq!(reference(&doc! { "customer_id": "" }, "customer_id"), None);
        assert_eq!(
            reference(&doc! { "installer_id": bson::Bson::Null }, "installer_id"),
            None
        );
        assert_eq!(
            reference(&doc! { "customer_id": "abc" }, "customer_id").as_deref(),
            Some("abc")
        );
    }
}
