//! The four named collections backing the API

use serde::Serialize;
use std::fmt;

/// A named grouping of documents of one entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Customer,
    Installer,
    Material,
    Order,
}

impl Collection {
    /// Every collection, in the order reported by `GET /schema`
    pub const ALL: [Collection; 4] = [
        Collection::Customer,
        Collection::Installer,
        Collection::Material,
        Collection::Order,
    ];

    /// Collection name in the store (singular, e.g. "customer")
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Customer => "customer",
            Collection::Installer => "installer",
            Collection::Material => "material",
            Collection::Order => "order",
        }
    }

    /// Plural resource name used in URLs (e.g. "customers")
    pub fn resource_name(&self) -> &'static str {
        match self {
            Collection::Customer => "customers",
            Collection::Installer => "installers",
            Collection::Material => "materials",
            Collection::Order => "orders",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
