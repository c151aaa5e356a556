use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::model::{Attributes, Document, DocumentId, DocumentList, Query};
use crate::store::traits::{DocumentStore, StoreResult};

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

/// Body of a document creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    #[serde(rename = "documentId")]
    pub document_id: DocumentId,
    pub data: Attributes,
}

/// Error body returned by the store on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: u16,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Client for the hosted document store's REST API.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    endpoint: Url,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        if let Some(project_id) = &config.project_id {
            headers.insert(HeaderName::from_static(PROJECT_HEADER), header_value(project_id)?);
        }
        if let Some(api_key) = &config.api_key {
            let mut value = header_value(api_key)?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(KEY_HEADER), value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let endpoint = Url::parse(config.endpoint.trim_end_matches('/'))
            .map_err(|e| StoreError::Config(format!("invalid endpoint {}: {}", config.endpoint, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "endpoint cannot be a base URL: {}",
                config.endpoint
            )));
        }

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Endpoint with `segments` appended; each segment is percent-encoded.
    fn url(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Config(format!("endpoint cannot be a base URL: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn documents_url(&self, database_id: &str, collection_id: &str) -> StoreResult<Url> {
        self.url(&["databases", database_id, "collections", collection_id, "documents"])
    }

    fn document_url(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Url> {
        self.url(&[
            "databases",
            database_id,
            "collections",
            collection_id,
            "documents",
            document_id,
        ])
    }
}

fn header_value(value: &str) -> Result<HeaderValue, StoreError> {
    HeaderValue::from_str(value)
        .map_err(|e| StoreError::Config(format!("invalid header value: {}", e)))
}

/// Turn a non-2xx response into a `StoreError::Status`, preferring the
/// message from the JSON error body.
async fn check(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => error.message,
        Err(_) if body.is_empty() => status.canonical_reason().unwrap_or("request failed").to_string(),
        Err(_) => body,
    };

    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

fn not_found(collection_id: &str, document_id: &str) -> StoreError {
    StoreError::NotFound {
        collection_id: collection_id.to_string(),
        document_id: document_id.to_string(),
    }
}

#[async_trait::async_trait]
impl DocumentStore for RestStore {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentList> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.to_json().to_string()))
            .collect();

        let response = self
            .client
            .get(self.documents_url(database_id, collection_id)?)
            .query(&params)
            .send()
            .await?;

        Ok(check(response).await?.json::<DocumentList>().await?)
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<Document> {
        let response = self
            .client
            .get(self.document_url(database_id, collection_id, document_id)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found(collection_id, document_id));
        }
        Ok(check(response).await?.json::<Document>().await?)
    }

    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: DocumentId,
        data: Attributes,
    ) -> StoreResult<Document> {
        let request = CreateDocumentRequest { document_id, data };

        let response = self
            .client
            .post(self.documents_url(database_id, collection_id)?)
            .json(&request)
            .send()
            .await?;

        Ok(check(response).await?.json::<Document>().await?)
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> StoreResult<()> {
        let response = self
            .client
            .delete(self.document_url(database_id, collection_id, document_id)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found(collection_id, document_id));
        }
        check(response).await?;
        Ok(())
    }
}
