//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the
//! [`RecordStore`] trait, with one column family per collection and CBOR
//! document encoding.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};

use crate::error::{Result, StoreError};
use crate::schema::all_column_families;
use crate::{merge_documents, Collection, Document, RecordStore};

/// RocksDB-backed document store.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, &path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "Opened RocksDB document store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, collection: Collection) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db.cf_handle(collection.name()).ok_or_else(|| {
            StoreError::Database(format!("column family not found: {}", collection.name()))
        })
    }

    /// Serialize a document using CBOR.
    fn serialize(document: &Document) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(document, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a document from CBOR.
    fn deserialize(data: &[u8]) -> Result<Document> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for RocksStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let cf = self.cf(collection)?;

        self.db
            .get_cf(&cf, id.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> Result<()> {
        let document = if merge {
            match self.get(collection, id).await? {
                Some(existing) => merge_documents(existing, fields),
                None => fields,
            }
        } else {
            fields
        };

        let cf = self.cf(collection)?;
        let value = Self::serialize(&document)?;
        self.db
            .put_cf(&cf, id.as_bytes(), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().expect("object literal").clone()
    }

    fn open_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let store = RocksStore::open(dir.path()).expect("open store");
        (store, dir)
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (store, _dir) = open_store();
        let result = store.get(Collection::Users, "nobody").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn merge_preserves_existing_fields() {
        let (store, _dir) = open_store();

        store
            .set(Collection::Users, "u1", doc(json!({"registered": true})), true)
            .await
            .unwrap();
        store
            .set(Collection::Users, "u1", doc(json!({"gameData": "blob"})), true)
            .await
            .unwrap();

        let record = store.get(Collection::Users, "u1").await.unwrap().unwrap();
        assert_eq!(record["registered"], true);
        assert_eq!(record["gameData"], "blob");
    }

    #[tokio::test]
    async fn non_merge_replaces_document() {
        let (store, _dir) = open_store();

        store
            .set(
                Collection::Subscriptions,
                "u1",
                doc(json!({"purchaseToken": "old", "productId": "p"})),
                false,
            )
            .await
            .unwrap();
        store
            .set(
                Collection::Subscriptions,
                "u1",
                doc(json!({"purchaseToken": "new"})),
                false,
            )
            .await
            .unwrap();

        let record = store
            .get(Collection::Subscriptions, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record["purchaseToken"], "new");
        assert!(record.get("productId").is_none());
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let (store, _dir) = open_store();

        store
            .set(Collection::Users, "id", doc(json!({"registered": true})), false)
            .await
            .unwrap();

        assert!(store.get(Collection::Purchases, "id").await.unwrap().is_none());
        assert!(store.get(Collection::Users, "id").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = TempDir::new().expect("temp dir");
        {
            let store = RocksStore::open(dir.path()).unwrap();
            store
                .set(Collection::Purchases, "tok-1", doc(json!({"userId": "u1"})), false)
                .await
                .unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        let record = store.get(Collection::Purchases, "tok-1").await.unwrap();
        assert_eq!(record.unwrap()["userId"], "u1");
    }
}
