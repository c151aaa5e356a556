use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::model::{Attributes, Id};

/// A record held by the document store. System fields use the store's
/// `$`-prefixed names on the wire; everything else is flattened into `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: Id,
    #[serde(rename = "$collectionId")]
    pub collection_id: String,
    #[serde(rename = "$databaseId")]
    pub database_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: Attributes,
}

impl Document {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Attribute lookup that also resolves the system fields used in queries.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "$id" => Some(Value::String(self.id.clone())),
            "$createdAt" => Some(Value::String(self.created_at.to_rfc3339())),
            "$updatedAt" => Some(Value::String(self.updated_at.to_rfc3339())),
            _ => self.data.get(name).cloned(),
        }
    }

    /// Decode the attribute map into a typed entity.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.data.clone()))?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Document>,
}

impl DocumentList {
    pub fn ids(&self) -> Vec<Id> {
        self.documents.iter().map(|doc| doc.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
