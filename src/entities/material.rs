//! Material catalogue records

use crate::core::collection::Collection;
use crate::core::entity::{ListQuery, Record, non_empty};
use crate::core::query::Filter;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Material {
    /// Article number
    pub sku: String,
    pub name: String,
    /// Unit of measure (st, m, kg, ...)
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Price per unit
    #[serde(default)]
    #[validate(range(min = 0.0, message = "must be zero or greater"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "must be zero or greater"))]
    pub stock: i64,
    #[serde(default)]
    pub supplier: Option<String>,
}

fn default_unit() -> String {
    "st".to_string()
}

/// `GET /materials?search=...`: substring search over name and sku
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialQuery {
    pub search: Option<String>,
}

impl ListQuery for MaterialQuery {
    fn filter(&self) -> Filter {
        match non_empty(&self.search) {
            Some(search) => Filter::search(&["name", "sku"], search),
            None => Filter::All,
        }
    }
}

impl Record for Material {
    type Query = MaterialQuery;

    fn collection() -> Collection {
        Collection::Material
    }
}
