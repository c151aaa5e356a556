use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;

pub type Id = String;

/// Attribute map carried by a document.
pub type Attributes = Map<String, Value>;

/// Literal the store recognises as "generate a fresh id server-side".
pub const UNIQUE_ID_TOKEN: &str = "unique()";

pub fn generate_id() -> Id {
    Uuid::new_v4().simple().to_string()
}

/// Id requested for a newly created document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentId {
    /// Let the store assign the id.
    #[default]
    Unique,
    Custom(Id),
}

impl DocumentId {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentId::Unique => UNIQUE_ID_TOKEN,
            DocumentId::Custom(id) => id,
        }
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        if value == UNIQUE_ID_TOKEN {
            DocumentId::Unique
        } else {
            DocumentId::Custom(value)
        }
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(DocumentId::from)
    }
}

/// Convert a typed entity into the attribute map the store expects.
pub fn to_attributes<T: Serialize>(value: &T) -> Result<Attributes, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidAttributes(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unique_token_serializes_as_literal() {
        assert_eq!(serde_json::to_value(DocumentId::Unique).unwrap(), json!("unique()"));
        assert_eq!(
            serde_json::to_value(DocumentId::Custom("abc".into())).unwrap(),
            json!("abc")
        );
        let parsed: DocumentId = serde_json::from_value(json!("unique()")).unwrap();
        assert_eq!(parsed, DocumentId::Unique);
    }

    #[test]
    fn non_object_attributes_are_rejected() {
        let err = to_attributes(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidAttributes(_)));
    }
}
