use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{generate_id, Attributes, Document, DocumentId, DocumentList, Query};
use crate::store::traits::{DocumentStore, StoreResult};

type CollectionKey = (String, String);

/// In-process document store. Clones share the same underlying collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<CollectionKey, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub fn count(&self, database_id: &str, collection_id: &str) -> usize {
        self.collections
            .read()
            .get(&key(database_id, collection_id))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Snapshot of a collection in insertion order.
    pub fn documents(&self, database_id: &str, collection_id: &str) -> Vec<Document> {
        self.collections
            .read()
            .get(&key(database_id, collection_id))
            .cloned()
            .unwrap_or_default()
    }
}

fn key(database_id: &str, collection_id: &str) -> CollectionKey {
    (database_id.to_string(), collection_id.to_string())
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentList> {
        let collections = self.collections.read();
        let documents = collections
            .get(&key(database_id, collection_id))
            .map(|docs| apply_queries(docs, queries))
            .unwrap_or_default();

        Ok(DocumentList {
            total: documents.len() as u64,
            documents,
        })
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Document> {
        self.collections
            .read()
            .get(&key(database_id, collection_id))
            .and_then(|docs| docs.iter().find(|doc| doc.id == document_id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection_id: collection_id.to_string(),
                document_id: document_id.to_string(),
            })
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: DocumentId,
        data: Attributes,
    ) -> StoreResult<Document> {
        let mut collections = self.collections.write();
        let docs = collections.entry(key(database_id, collection_id)).or_default();

        let id = match document_id {
            DocumentId::Unique => generate_id(),
            DocumentId::Custom(id) => {
                if docs.iter().any(|doc| doc.id == id) {
                    return Err(StoreError::Status {
                        status: 409,
                        message: format!("Document with the requested ID '{}' already exists", id),
                    });
                }
                id
            }
        };

        let now = Utc::now();
        let document = Document {
            id,
            collection_id: collection_id.to_string(),
            database_id: database_id.to_string(),
            created_at: now,
            updated_at: now,
            data,
        };
        docs.push(document.clone());
        Ok(document)
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write();
        let docs = collections.get_mut(&key(database_id, collection_id));
        let position = docs
            .as_ref()
            .and_then(|docs| docs.iter().position(|doc| doc.id == document_id));

        match (docs, position) {
            (Some(docs), Some(position)) => {
                docs.remove(position);
                Ok(())
            }
            _ => Err(StoreError::NotFound {
                collection_id: collection_id.to_string(),
                document_id: document_id.to_string(),
            }),
        }
    }
}

fn apply_queries(documents: &[Document], queries: &[Query]) -> Vec<Document> {
    let mut matched: Vec<Document> = documents
        .iter()
        .filter(|doc| queries.iter().all(|query| matches(doc, query)))
        .cloned()
        .collect();

    let orderings: Vec<(&str, bool)> = queries
        .iter()
        .filter_map(|query| match query {
            Query::OrderAsc(attribute) => Some((attribute.as_str(), false)),
            Query::OrderDesc(attribute) => Some((attribute.as_str(), true)),
            _ => None,
        })
        .collect();

    if !orderings.is_empty() {
        // Stable sort keeps insertion order for equal keys.
        matched.sort_by(|a, b| {
            orderings.iter().fold(Ordering::Equal, |acc, (attribute, descending)| {
                acc.then_with(|| {
                    let ordering = compare_field(a, b, attribute);
                    if *descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
            })
        });
    }

    if let Some(limit) = queries.iter().find_map(|query| match query {
        Query::Limit(limit) => Some(*limit),
        _ => None,
    }) {
        matched.truncate(limit);
    }

    matched
}

fn matches(document: &Document, query: &Query) -> bool {
    match query {
        Query::Equal { attribute, values } => match document.field(attribute) {
            Some(Value::Array(items)) => items.iter().any(|item| values.contains(item)),
            Some(value) => values.contains(&value),
            None => false,
        },
        Query::Search { attribute, value } => match document.field(attribute) {
            Some(Value::String(text)) => text.to_lowercase().contains(&value.to_lowercase()),
            _ => false,
        },
        Query::Or(queries) => queries.iter().any(|query| matches(document, query)),
        Query::OrderAsc(_) | Query::OrderDesc(_) | Query::Limit(_) => true,
    }
}

fn compare_field(a: &Document, b: &Document, attribute: &str) -> Ordering {
    match attribute {
        "$createdAt" => a.created_at.cmp(&b.created_at),
        "$updatedAt" => a.updated_at.cmp(&b.updated_at),
        _ => compare_values(a.field(attribute).as_ref(), b.field(attribute).as_ref()),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (name, kind, price) in [
            ("Sunny Villa", "Villa", 4000),
            ("City Studio", "Studio", 1500),
            ("Lake House", "House", 9000),
        ] {
            store
                .create_document(
                    "db",
                    "properties",
                    DocumentId::Unique,
                    attrs(json!({ "name": name, "type": kind, "price": price, "address": "Main St" })),
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn equal_and_search_filters() {
        let store = seeded().await;

        let villas = store
            .list_documents("db", "properties", &[Query::equal("type", "Villa")])
            .await
            .unwrap();
        assert_eq!(villas.total, 1);

        let searched = store
            .list_documents(
                "db",
                "properties",
                &[Query::Or(vec![Query::search("name", "stud"), Query::search("type", "house")])],
            )
            .await
            .unwrap();
        assert_eq!(searched.documents.len(), 2);
    }

    #[tokio::test]
    async fn ordering_and_limit() {
        let store = seeded().await;

        let cheapest = store
            .list_documents("db", "properties", &[Query::order_asc("price"), Query::limit(2)])
            .await
            .unwrap();
        let names: Vec<_> = cheapest
            .documents
            .iter()
            .map(|doc| doc.attribute("name").cloned().unwrap())
            .collect();
        assert_eq!(names, vec![json!("City Studio"), json!("Sunny Villa")]);

        let newest_first = store
            .list_documents("db", "properties", &[Query::order_desc("$createdAt")])
            .await
            .unwrap();
        assert_eq!(newest_first.documents.len(), 3);
    }

    #[tokio::test]
    async fn delete_and_get_missing_document() {
        let store = seeded().await;
        let first = store.documents("db", "properties").remove(0);

        store.delete_document("db", "properties", &first.id).await.unwrap();
        assert_eq!(store.count("db", "properties"), 2);

        let err = store.get_document("db", "properties", &first.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        let err = store.delete_document("db", "properties", &first.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn custom_ids_must_be_unique() {
        let store = MemoryStore::new();
        let id = DocumentId::Custom("fixed".into());
        store
            .create_document("db", "agents", id.clone(), Attributes::new())
            .await
            .unwrap();
        let err = store
            .create_document("db", "agents", id, Attributes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 409, .. }));
    }
}
