//! Persistence facade
//!
//! Named collections of JSON documents with field-equality filters. The
//! HTTP employee API is the only caller; orchestration tools do not read
//! or write records.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Field-equality filter; an empty filter matches every document.
pub type Filter = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    pub inserted_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `document` unless a document matching `filter` exists.
    /// The check and the insert happen atomically; `None` means a match
    /// was already stored.
    async fn insert_unique(
        &self,
        collection: &str,
        filter: &Filter,
        document: Value,
    ) -> Result<Option<InsertResult>, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError>;

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Apply `set` to the first matching document.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Map<String, Value>,
    ) -> Result<UpdateResult, StoreError>;

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError>;

    async fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;
}

/// Builds a single-field filter.
pub fn filter_eq(field: &str, value: impl Into<Value>) -> Filter {
    let mut filter = Filter::new();
    filter.insert(field.to_string(), value.into());
    filter
}
