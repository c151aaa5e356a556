use thiserror::Error;

/// Failures raised by a [`DocumentStore`](crate::store::DocumentStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("document {document_id} not found in collection {collection_id}")]
    NotFound {
        collection_id: String,
        document_id: String,
    },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid attributes: {0}")]
    InvalidAttributes(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid store configuration: {0}")]
    Config(String),
}

/// Failures that abort a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Raised before any remote call is issued.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{operation} failed for collection {collection_id}: {source}")]
    Remote {
        operation: &'static str,
        collection_id: String,
        #[source]
        source: StoreError,
    },
}

impl SeedError {
    pub fn remote(operation: &'static str, collection_id: &str, source: StoreError) -> Self {
        Self::Remote {
            operation,
            collection_id: collection_id.to_string(),
            source,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
