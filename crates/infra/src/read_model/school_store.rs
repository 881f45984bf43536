use std::sync::{Arc, RwLock};

use thiserror::Error;

use uniformops_core::{DomainError, Entity, SchoolId};
use uniformops_inventory::School;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored document failed validation on the way in.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Read access to school snapshots (the remote store's call contract).
///
/// Implementations hand out owned copies, so callers always work on an
/// immutable snapshot.
#[async_trait::async_trait]
pub trait SchoolRepository: Send + Sync {
    /// All schools, in dataset order.
    async fn list_schools(&self) -> Result<Vec<School>, StoreError>;

    async fn get_school(&self, id: SchoolId) -> Result<Option<School>, StoreError>;

    /// Insert or replace by id. Replacements keep their position.
    async fn upsert_school(&self, school: School) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> SchoolRepository for Arc<S>
where
    S: SchoolRepository + ?Sized,
{
    async fn list_schools(&self) -> Result<Vec<School>, StoreError> {
        (**self).list_schools().await
    }

    async fn get_school(&self, id: SchoolId) -> Result<Option<School>, StoreError> {
        (**self).get_school(id).await
    }

    async fn upsert_school(&self, school: School) -> Result<(), StoreError> {
        (**self).upsert_school(school).await
    }
}

/// In-memory school store for tests/dev and the mock dataset.
#[derive(Debug, Default)]
pub struct InMemorySchoolStore {
    inner: RwLock<Vec<School>>,
}

impl InMemorySchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schools(schools: Vec<School>) -> Self {
        Self {
            inner: RwLock::new(schools),
        }
    }
}

#[async_trait::async_trait]
impl SchoolRepository for InMemorySchoolStore {
    async fn list_schools(&self) -> Result<Vec<School>, StoreError> {
        let schools = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(schools.clone())
    }

    async fn get_school(&self, id: SchoolId) -> Result<Option<School>, StoreError> {
        let schools = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(schools.iter().find(|s| *s.id() == id).cloned())
    }

    async fn upsert_school(&self, school: School) -> Result<(), StoreError> {
        let mut schools = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match schools.iter_mut().find(|s| s.id() == school.id()) {
            Some(existing) => {
                tracing::debug!(school_id = %school.id, "replacing school snapshot");
                *existing = school;
            }
            None => {
                tracing::debug!(school_id = %school.id, "inserting school snapshot");
                schools.push(school);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniformops_inventory::{InventoryByType, StockRecord, Variant};

    fn school(name: &str, qty: u64) -> School {
        School::new(
            SchoolId::new(),
            name,
            InventoryByType::new().with_variant("Shirts", Variant::new("White", vec![StockRecord::new("S", qty, 5)])),
        )
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = InMemorySchoolStore::new();
        store.upsert_school(school("Hillcrest", 1)).await.unwrap();
        store.upsert_school(school("Northgate", 2)).await.unwrap();

        let names: Vec<_> = store.list_schools().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Hillcrest", "Northgate"]);
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let a = school("Hillcrest", 1);
        let b = school("Northgate", 2);
        let store = InMemorySchoolStore::with_schools(vec![a.clone(), b]);

        let mut updated = a.clone();
        updated.name = "Hillcrest Primary".to_string();
        store.upsert_school(updated).await.unwrap();

        let all = store.list_schools().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Hillcrest Primary");
        assert_eq!(store.get_school(a.id).await.unwrap().unwrap().name, "Hillcrest Primary");
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store: Arc<dyn SchoolRepository> = Arc::new(InMemorySchoolStore::new());
        assert!(store.get_school(SchoolId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn callers_get_snapshots() {
        let a = school("Hillcrest", 1);
        let store = InMemorySchoolStore::with_schools(vec![a.clone()]);

        let mut snapshot = store.list_schools().await.unwrap();
        snapshot[0].inventory = InventoryByType::new();

        let again = store.get_school(a.id).await.unwrap().unwrap();
        assert_eq!(again, a);
    }
}
