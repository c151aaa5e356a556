use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{Attributes, Document, DocumentId, DocumentList, Query};

pub type StoreResult<T> = Result<T, StoreError>;

/// Document CRUD surface of the hosted store.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents of a collection matching `queries`. Remote stores page
    /// their results, so an unbounded query may return a partial list.
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentList>;

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Document>;

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: DocumentId,
        data: Attributes,
    ) -> StoreResult<Document>;

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<()>;
}

#[async_trait::async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentList> {
        (**self).list_documents(database_id, collection_id, queries).await
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Document> {
        (**self).get_document(database_id, collection_id, document_id).await
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: DocumentId,
        data: Attributes,
    ) -> StoreResult<Document> {
        (**self)
            .create_document(database_id, collection_id, document_id, data)
            .await
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<()> {
        (**self).delete_document(database_id, collection_id, document_id).await
    }
}
