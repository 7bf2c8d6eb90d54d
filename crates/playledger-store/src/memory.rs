//! In-memory storage implementation for tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::{merge_documents, Collection, Document, RecordStore};

/// In-memory document store.
///
/// Same merge semantics as [`crate::RocksStore`], no persistence. Intended
/// for unit and integration tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<(Collection, String), Document>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let documents = self
            .documents
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(documents.get(&(collection, id.to_owned())).cloned())
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let key = (collection, id.to_owned());

        let document = if merge {
            match documents.remove(&key) {
                Some(existing) => merge_documents(existing, fields),
                None => fields,
            }
        } else {
            fields
        };

        documents.insert(key, document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().expect("object literal").clone()
    }

    #[tokio::test]
    async fn merge_overlays_top_level_fields() {
        let store = MemoryStore::new();

        store
            .set(Collection::Users, "u1", doc(json!({"registered": true})), true)
            .await
            .unwrap();
        store
            .set(
                Collection::Users,
                "u1",
                doc(json!({"gameData": "x", "registered": true})),
                true,
            )
            .await
            .unwrap();

        let record = store.get(Collection::Users, "u1").await.unwrap().unwrap();
        assert_eq!(record["registered"], true);
        assert_eq!(record["gameData"], "x");
    }

    #[tokio::test]
    async fn overwrite_discards_previous_fields() {
        let store = MemoryStore::new();

        store
            .set(Collection::Subscriptions, "u1", doc(json!({"a": 1, "b": 2})), false)
            .await
            .unwrap();
        store
            .set(Collection::Subscriptions, "u1", doc(json!({"a": 9})), false)
            .await
            .unwrap();

        let record = store
            .get(Collection::Subscriptions, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record["a"], 9);
        assert!(record.get("b").is_none());
    }
}
