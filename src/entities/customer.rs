//! Customer records

use crate::core::collection::Collection;
use crate::core::entity::{ListQuery, Record, non_empty};
use crate::core::query::Filter;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Customer {
    /// Full name
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Company, for business customers
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `GET /customers?q=...`: substring search over name and company
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerQuery {
    pub q: Option<String>,
}

impl ListQuery for CustomerQuery {
    fn filter(&self) -> Filter {
        match non_empty(&self.q) {
            Some(q) => Filter::search(&["name", "company"], q),
            None => Filter::All,
        }
    }
}

impl Record for Customer {
    type Query = CustomerQuery;

    fn collection() -> Collection {
        Collection::Customer
    }
}
