use serde::{Deserialize, Serialize};

use crate::config::CollectionIds;
use crate::error::StoreError;
use crate::model::{Document, Query};
use crate::store::DocumentStore;

/// Category value that disables type filtering.
pub const ALL_CATEGORIES: &str = "All";

const LATEST_LIMIT: usize = 5;

/// Parameters of a property listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyQuery {
    /// Property type to restrict to; `"All"` or empty means no restriction.
    pub filter: Option<String>,
    /// Free text matched against name, address and type.
    pub query: Option<String>,
    pub limit: Option<usize>,
}

impl PropertyQuery {
    pub fn new(filter: impl Into<String>, query: impl Into<String>, limit: usize) -> Self {
        Self {
            filter: Some(filter.into()),
            query: Some(query.into()),
            limit: Some(limit),
        }
    }

    /// Store queries for this request, newest first.
    pub fn to_queries(&self) -> Vec<Query> {
        let mut queries = vec![Query::order_desc("$createdAt")];

        if let Some(filter) = non_empty(self.filter.as_deref()) {
            if filter != ALL_CATEGORIES {
                queries.push(Query::equal("type", filter));
            }
        }

        if let Some(text) = non_empty(self.query.as_deref()) {
            queries.push(Query::Or(vec![
                Query::search("name", text),
                Query::search("address", text),
                Query::search("type", text),
            ]));
        }

        if let Some(limit) = self.limit {
            queries.push(Query::limit(limit));
        }

        queries
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub async fn get_properties<S: DocumentStore + ?Sized>(
    store: &S,
    collections: &CollectionIds,
    params: &PropertyQuery,
) -> Result<Vec<Document>, StoreError> {
    let list = store
        .list_documents(
            &collections.database_id,
            &collections.properties,
            &params.to_queries(),
        )
        .await?;
    log::debug!("fetched {} properties for {:?}", list.documents.len(), params);
    Ok(list.documents)
}

/// The oldest listings, used for the featured strip.
pub async fn get_latest_properties<S: DocumentStore + ?Sized>(
    store: &S,
    collections: &CollectionIds,
) -> Result<Vec<Document>, StoreError> {
    let list = store
        .list_documents(
            &collections.database_id,
            &collections.properties,
            &[Query::order_asc("$createdAt"), Query::limit(LATEST_LIMIT)],
        )
        .await?;
    Ok(list.documents)
}

pub async fn get_property_by_id<S: DocumentStore + ?Sized>(
    store: &S,
    collections: &CollectionIds,
    id: &str,
) -> Result<Document, StoreError> {
    store
        .get_document(&collections.database_id, &collections.properties, id)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_category_adds_no_type_filter() {
        let queries = PropertyQuery::new("All", "", 6).to_queries();
        assert_eq!(queries, vec![Query::order_desc("$createdAt"), Query::limit(6)]);
    }

    #[test]
    fn filter_and_text_search() {
        let queries = PropertyQuery::new("Villa", "sea", 20).to_queries();
        assert_eq!(queries.len(), 4);
        assert_eq!(queries[1], Query::equal("type", "Villa"));
        match &queries[2] {
            Query::Or(inner) => assert_eq!(inner.len(), 3),
            other => panic!("expected or-clause, got {:?}", other),
        }
    }

    #[test]
    fn defaults_only_order() {
        assert_eq!(
            PropertyQuery::default().to_queries(),
            vec![Query::order_desc("$createdAt")]
        );
    }
}
