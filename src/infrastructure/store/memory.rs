use super::{DeleteResult, DocumentStore, Filter, InsertResult, StoreError, UpdateResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

const ID_FIELD: &str = "_id";

/// In-process document store. Documents keep insertion order per collection.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(document: &Map<String, Value>, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

/// Unwraps the object and assigns `_id` when the caller did not.
fn prepare(collection: &str, document: Value) -> Result<(String, Map<String, Value>), StoreError> {
    let Value::Object(mut document) = document else {
        return Err(StoreError::NotAnObject {
            collection: collection.to_string(),
        });
    };
    let inserted_id = match document.get(ID_FIELD).and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => {
            let id = Uuid::new_v4().to_string();
            document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            id
        }
    };
    Ok((inserted_id, document))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_unique(
        &self,
        collection: &str,
        filter: &Filter,
        document: Value,
    ) -> Result<Option<InsertResult>, StoreError> {
        let (inserted_id, document) = prepare(collection, document)?;
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        if documents.iter().any(|doc| matches(doc, filter)) {
            return Ok(None);
        }
        documents.push(document);
        Ok(Some(InsertResult { inserted_id }))
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, filter)))
            .map(|doc| Value::Object(doc.clone())))
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, filter))
                    .map(|doc| Value::Object(doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Map<String, Value>,
    ) -> Result<UpdateResult, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| matches(doc, filter)))
        else {
            return Ok(UpdateResult {
                matched: 0,
                modified: 0,
            });
        };

        let mut changed = false;
        for (field, value) in set {
            if field == ID_FIELD {
                continue;
            }
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                changed = true;
            }
        }
        Ok(UpdateResult {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted = match collections.get_mut(collection) {
            Some(docs) => match docs.iter().position(|doc| matches(doc, filter)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };
        Ok(DeleteResult { deleted })
    }

    async fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| matches(doc, filter)).count() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::filter_eq;
    use serde_json::json;

    /// Insert without a uniqueness constraint: no document carries a fresh `_id`.
    async fn seed(store: &MemoryStore, collection: &str, document: Value) -> InsertResult {
        let fresh = filter_eq(ID_FIELD, Uuid::new_v4().to_string());
        store
            .insert_unique(collection, &fresh, document)
            .await
            .expect("insert")
            .expect("fresh id never matches")
    }

    #[tokio::test]
    async fn insert_assigns_id_and_find_filters_by_field() {
        let store = MemoryStore::new();
        let first = seed(&store, "Employee", json!({"employeeId": "E-1", "firstName": "Ada"})).await;
        seed(&store, "Employee", json!({"employeeId": "E-2", "firstName": "Grace"})).await;

        assert!(!first.inserted_id.is_empty());
        let found = store
            .find_one("Employee", &filter_eq("employeeId", "E-2"))
            .await
            .expect("find")
            .expect("document exists");
        assert_eq!(found["firstName"], "Grace");
        assert_eq!(
            store
                .count_documents("Employee", &Filter::new())
                .await
                .expect("count"),
            2
        );
    }

    #[tokio::test]
    async fn update_reports_matched_and_modified() {
        let store = MemoryStore::new();
        seed(&store, "Employee", json!({"employeeId": "E-1", "email": "a@x.io"})).await;
        let filter = filter_eq("employeeId", "E-1");

        let mut set = Map::new();
        set.insert("email".into(), json!("b@x.io"));
        let changed = store.update_one("Employee", &filter, set.clone()).await.expect("update");
        assert_eq!(changed, UpdateResult { matched: 1, modified: 1 });

        let unchanged = store.update_one("Employee", &filter, set).await.expect("update");
        assert_eq!(unchanged, UpdateResult { matched: 1, modified: 0 });

        let missing = store
            .update_one("Employee", &filter_eq("employeeId", "nope"), Map::new())
            .await
            .expect("update");
        assert_eq!(missing.matched, 0);
    }

    #[tokio::test]
    async fn delete_removes_first_match_only() {
        let store = MemoryStore::new();
        for _ in 0..2 {
            seed(&store, "Job", json!({"jobId": "J-1"})).await;
        }
        let filter = filter_eq("jobId", "J-1");
        assert_eq!(store.delete_one("Job", &filter).await.expect("delete").deleted, 1);
        assert_eq!(store.count_documents("Job", &filter).await.expect("count"), 1);
        assert_eq!(
            store
                .delete_one("Missing", &filter)
                .await
                .expect("delete")
                .deleted,
            0
        );
    }

    #[tokio::test]
    async fn insert_unique_keeps_first_document() {
        let store = MemoryStore::new();
        let filter = filter_eq("employeeId", "E-1");
        let first = store
            .insert_unique("Employee", &filter, json!({"employeeId": "E-1", "firstName": "Ada"}))
            .await
            .expect("insert");
        assert!(first.is_some());

        let second = store
            .insert_unique("Employee", &filter, json!({"employeeId": "E-1", "firstName": "Eve"}))
            .await
            .expect("insert");
        assert!(second.is_none());
        assert_eq!(store.count_documents("Employee", &filter).await.expect("count"), 1);
        let stored = store
            .find_one("Employee", &filter)
            .await
            .expect("find")
            .expect("document exists");
        assert_eq!(stored["firstName"], "Ada");
    }

    #[tokio::test]
    async fn rejects_non_object_documents() {
        let store = MemoryStore::new();
        let err = store
            .insert_unique("Employee", &Filter::new(), json!([1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject { .. }));
    }
}
