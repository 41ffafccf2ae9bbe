//! Pass-through persistence for records without domain logic

use crate::core::entity::{ListQuery, Record};
use crate::core::error::ApiResult;
use crate::core::serialize;
use crate::core::store::DocumentStore;
use bson::oid::ObjectId;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Create/list service for one record type
///
/// Each `RecordService<T>` works on the collection named by
/// `T::collection()`.
pub struct RecordService<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<T>,
}

impl<T> Clone for RecordService<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> RecordService<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Persist a validated record and return its generated identifier
    pub async fn create(&self, record: &T) -> ApiResult<ObjectId> {
        let document = bson::to_document(record)?;
        let id = self.store.insert(T::collection(), document).await?;

        tracing::info!(collection = %T::collection(), %id, "record created");
        Ok(id)
    }

    /// List serialized records matching the query parameters
    pub async fn list(&self, query: &T::Query) -> ApiResult<Vec<Value>> {
        let filter = query.filter();
        tracing::debug!(collection = %T::collection(), ?filter, "listing records");

        let documents = self.store.find(T::collection(), &filter).await?;
        Ok(documents.into_iter().map(serialize::to_json).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::customer::{Customer, CustomerQuery};
    use crate::entities::installer::{Installer, InstallerQuery};
    use crate::storage::InMemoryDocumentStore;

    fn customer(name: &str, company: Option<&str>) -> Customer {
        Customer {
            name: name.to_string(),
            email: None,
            phone: None,
            address: None,
            company: company.map(String::from),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let service = RecordService::<Customer>::new(Arc::new(InMemoryDocumentStore::new()));

        let id = service.create(&customer("Alice", None)).await.unwrap();
        let listed = service.list(&CustomerQuery::default()).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], id.to_hex());
        assert_eq!(listed[0]["name"], "Alice");
        assert!(listed[0].get("_id").is_none());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_name_and_company() {
        let service = RecordService::<Customer>::new(Arc::new(InMemoryDocumentStore::new()));
        service.create(&customer("John Smith", None)).await.unwrap();
        service
            .create(&customer("Karin", Some("SMITH & Co")))
            .await
            .unwrap();
        service.create(&customer("Olle", Some("Bygg AB"))).await.unwrap();

        let found = service
            .list(&CustomerQuery {
                q: Some("smith".to_string()),
            })
            .await
            .unwrap();

        let mut names: Vec<&str> = found.iter().map(|c| c["name"].as_str().unwrap()).collect();
        names.sort();
        assert_eq!(names, vec!["John Smith", "Karin"]);
    }

    #[tokio::test]
    async fn test_installer_active_filter() {
        let service = RecordService::<Installer>::new(Arc::new(InMemoryDocumentStore::new()));
        for (name, active) in [("A", true), ("B", false), ("C", true)] {
            service
                .create(&Installer {
                    name: name.to_string(),
                    email: None,
                    phone: None,
                    skills: vec![],
                    active,
                })
                .await
                .unwrap();
        }

        let inactive = service
            .list(&InstallerQuery {
                active: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0]["name"], "B");

        let all = service.list(&InstallerQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
