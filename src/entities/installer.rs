//! Installer records

use crate::core::collection::Collection;
use crate::core::entity::{ListQuery, Record};
use crate::core::query::Filter;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Installer {
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// `GET /installers?active=...`: exact match on the active flag
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallerQuery {
    pub active: Option<bool>,
}

impl ListQuery for InstallerQuery {
    fn filter(&self) -> Filter {
        match self.active {
            Some(active) => Filter::eq("active", active),
            None => Filter::All,
        }
    }
}

impl Record for Installer {
    type Query = InstallerQuery;

    fn collection() -> Collection {
        Collection::Installer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let installer: Installer = serde_json::from_value(json!({ "name": "Erik" })).unwrap();
        assert!(installer.active);
        assert!(installer.skills.is_empty());
    }

    #[test]
    fn test_stored_document_shape() {
        let installer: Installer =
            serde_json::from_value(json!({ "name": "Erik", "skills": ["el"], "active": false }))
                .unwrap();
        let document = bson::to_document(&installer).unwrap();

        assert_eq!(document.get_str("name").unwrap(), "Erik");
        assert_eq!(document.get_bool("active").unwrap(), false);
        assert_eq!(document.get_array("skills").unwrap().len(), 1);
    }

    #[test]
    fn test_query_filter() {
        assert_eq!(InstallerQuery::default().filter(), Filter::All);

        let only_active = InstallerQuery { active: Some(true) }.filter();
        assert!(only_active.matches(&doc! { "active": true }));
        assert!(!only_active.matches(&doc! { "active": false }));
    }
}
