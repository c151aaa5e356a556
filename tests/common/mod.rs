#![allow(dead_code)]

use parking_lot::Mutex;
use restate_data::store::StoreResult;
use restate_data::{
    Attributes, CollectionIds, Document, DocumentId, DocumentList, DocumentStore, MemoryStore,
    Query, StoreError,
};
use serde_json::json;
use std::collections::HashMap;

pub const DB: &str = "restate";

pub fn collection_ids() -> CollectionIds {
    CollectionIds {
        database_id: DB.to_string(),
        agents: "agents".to_string(),
        reviews: "reviews".to_string(),
        galleries: "galleries".to_string(),
        properties: "properties".to_string(),
    }
}

/// Store call as seen by the wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { collection: String },
    Delete { collection: String },
    /// `existing` is the collection size right before the insert.
    Create { collection: String, existing: usize },
}

/// Wraps a `MemoryStore`, records every call, optionally pages list results
/// and fails chosen operations.
pub struct RecordingStore {
    pub inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
    creates: Mutex<HashMap<String, usize>>,
    page_size: Option<usize>,
    fail_create: Option<(String, usize)>,
    fail_list: Option<String>,
    fail_delete: Option<String>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            creates: Mutex::new(HashMap::new()),
            page_size: None,
            fail_create: None,
            fail_list: None,
            fail_delete: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Fail the `nth` (1-based) create in `collection`.
    pub fn failing_create(mut self, collection: &str, nth: usize) -> Self {
        self.fail_create = Some((collection.to_string(), nth));
        self
    }

    pub fn failing_list(mut self, collection: &str) -> Self {
        self.fail_list = Some(collection.to_string());
        self
    }

    pub fn failing_delete(mut self, collection: &str) -> Self {
        self.fail_delete = Some(collection.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn creates_in(&self, collection: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Create { collection: c, .. } if c == collection))
            .count()
    }
}

#[async_trait::async_trait]
impl DocumentStore for RecordingStore {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentList> {
        self.calls.lock().push(Call::List {
            collection: collection_id.to_string(),
        });
        if self.fail_list.as_deref() == Some(collection_id) {
            return Err(StoreError::Unavailable("simulated list failure".into()));
        }

        let mut list = self.inner.list_documents(database_id, collection_id, queries).await?;
        if let Some(page_size) = self.page_size {
            list.documents.truncate(page_size);
        }
        Ok(list)
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Document> {
        self.inner.get_document(database_id, collection_id, document_id).await
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: DocumentId,
        data: Attributes,
    ) -> StoreResult<Document> {
        let attempt = {
            let mut creates = self.creates.lock();
            let count = creates.entry(collection_id.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        if let Some((collection, nth)) = &self.fail_create {
            if collection == collection_id && *nth == attempt {
                return Err(StoreError::Unavailable("simulated network error".into()));
            }
        }

        self.calls.lock().push(Call::Create {
            collection: collection_id.to_string(),
            existing: self.inner.count(database_id, collection_id),
        });
        self.inner
            .create_document(database_id, collection_id, document_id, data)
            .await
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<()> {
        self.calls.lock().push(Call::Delete {
            collection: collection_id.to_string(),
        });
        if self.fail_delete.as_deref() == Some(collection_id) {
            return Err(StoreError::Unavailable("simulated delete failure".into()));
        }
        self.inner
            .delete_document(database_id, collection_id, document_id)
            .await
    }
}

/// Fill every listing collection with `per_collection` unrelated documents.
pub async fn populate_stale(store: &MemoryStore, per_collection: usize) {
    let ids = collection_ids();
    for collection in ids.in_clear_order() {
        for i in 0..per_collection {
            let mut data = Attributes::new();
            data.insert("name".to_string(), json!(format!("stale {}", i)));
            store
                .create_document(DB, collection, DocumentId::Unique, data)
                .await
                .unwrap();
        }
    }
}
