//! Order records and their embedded line items

use crate::core::collection::Collection;
use crate::core::entity::{ListQuery, Record, non_empty};
use crate::core::query::Filter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One order line, embedded in its order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrderItem {
    /// Reference to a material's identifier
    pub material_id: String,
    #[validate(range(exclusive_min = 0.0, message = "must be greater than zero"))]
    pub quantity: f64,
    /// Price per unit at order time; resolved from the catalogue when absent
    #[serde(default)]
    #[validate(range(min = 0.0, message = "must be zero or greater"))]
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Order {
    /// Reference to the ordering customer
    pub customer_id: String,
    /// Reference to the assigned installer
    #[serde(default)]
    pub installer_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<OrderItem>,
    /// Free text; conventionally new, planned, in-progress, done, invoiced
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    /// Computed at creation; a client-supplied value is overwritten
    #[serde(default)]
    #[validate(range(min = 0.0, message = "must be zero or greater"))]
    pub total: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> String {
    "new".to_string()
}

/// `GET /orders?status=...&customer_id=...`: exact matches, combined with AND
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub customer_id: Option<String>,
}

impl ListQuery for OrderQuery {
    fn filter(&self) -> Filter {
        let mut filters = Vec::new();
        if let Some(status) = non_empty(&self.status) {
            filters.push(Filter::eq("status", status));
        }
        if let Some(customer_id) = non_empty(&self.customer_id) {
            filters.push(Filter::eq("customer_id", customer_id));
        }
        Filter::all_of(filters)
    }
}

impl Record for Order {
    type Query = OrderQuery;

    fn collection() -> Collection {
        Collection::Order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let order: Order = serde_json::from_value(json!({ "customer_id": "c1" })).unwrap();
        assert_eq!(order.status, "new");
        assert!(order.items.is_empty());
        assert!(order.total.is_none());
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_scheduled_date_parses_and_stores_as_string() {
        let order: Order = serde_json::from_value(
            json!({ "customer_id": "c1", "scheduled_date": "2026-03-14" }),
        )
        .unwrap();
        assert_eq!(
            order.scheduled_date,
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );

        let document = bson::to_document(&order).unwrap();
        assert_eq!(document.get_str("scheduled_date").unwrap(), "2026-03-14");
    }

    #[test]
    fn test_item_constraints() {
        let order: Order = serde_json::from_value(json!({
            "customer_id": "c1",
            "items": [
                { "material_id": "m1", "quantity": 0 },
                { "material_id": "m2", "quantity": 2, "unit_price": -1 }
            ]
        }))
        .unwrap();
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_negative_total_rejected() {
        let order: Order =
            serde_json::from_value(json!({ "customer_id": "c1", "total": -5 })).unwrap();
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_query_filter_combines_with_and() {
        assert_eq!(OrderQuery::default().filter(), Filter::All);

        let filter = OrderQuery {
            status: Some("planned".to_string()),
            customer_id: Some("c1".to_string()),
        }
        .filter();
        assert!(filter.matches(&doc! { "status": "planned", "customer_id": "c1" }));
        assert!(!filter.matches(&doc! { "status": "planned", "customer_id": "c2" }));
        assert!(!filter.matches(&doc! { "status": "new", "customer_id": "c1" }));
    }
}
