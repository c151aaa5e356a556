use serde_json::{json, Value};

/// Server-side query clause understood by the document store.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, values: Vec<Value> },
    /// Full-text match on a single attribute.
    Search { attribute: String, value: String },
    Or(Vec<Query>),
    OrderAsc(String),
    OrderDesc(String),
    Limit(usize),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    pub fn search(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Search {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn order_asc(attribute: impl Into<String>) -> Self {
        Query::OrderAsc(attribute.into())
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Query::OrderDesc(attribute.into())
    }

    pub fn limit(limit: usize) -> Self {
        Query::Limit(limit)
    }

    /// JSON form accepted in the `queries[]` request parameter.
    pub fn to_json(&self) -> Value {
        match self {
            Query::Equal { attribute, values } => {
                json!({ "method": "equal", "attribute": attribute, "values": values })
            }
            Query::Search { attribute, value } => {
                json!({ "method": "search", "attribute": attribute, "values": [value] })
            }
            Query::Or(queries) => {
                let nested: Vec<Value> = queries.iter().map(Query::to_json).collect();
                json!({ "method": "or", "values": nested })
            }
            Query::OrderAsc(attribute) => json!({ "method": "orderAsc", "attribute": attribute }),
            Query::OrderDesc(attribute) => json!({ "method": "orderDesc", "attribute": attribute }),
            Query::Limit(limit) => json!({ "method": "limit", "values": [limit] }),
        }
    }
}
