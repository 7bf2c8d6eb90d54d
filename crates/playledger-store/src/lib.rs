//! Document storage layer for the playledger purchase bridge.
//!
//! This crate provides the [`RecordStore`] abstraction the ledger writes
//! through: a document store keyed by string IDs and organized into named
//! collections, offering per-document `get`/`set` with optional merge
//! semantics. Single-document atomicity is all it guarantees; there are no
//! transactions and no conditional writes.
//!
//! Two implementations are provided:
//!
//! - [`RocksStore`]: persistent storage using `RocksDB` with one column
//!   family per collection
//! - [`MemoryStore`]: in-memory storage for tests
//!
//! # Example
//!
//! ```no_run
//! use playledger_store::{Collection, Document, RecordStore, RocksStore};
//!
//! # async fn example() -> playledger_store::Result<()> {
//! let store = RocksStore::open("/tmp/playledger-db")?;
//!
//! let mut fields = Document::new();
//! fields.insert("registered".into(), serde_json::Value::Bool(true));
//! store.set(Collection::Users, "player-1", fields, true).await?;
//!
//! let record = store.get(Collection::Users, "player-1").await?;
//! assert!(record.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use rocks::RocksStore;

use async_trait::async_trait;

/// A stored document: a JSON object map, preserving any fields the caller
/// put in it.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// The collections the ledger persists into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Player records, keyed by user ID.
    Users,
    /// Committed purchase receipts, keyed by purchase token.
    Purchases,
    /// Denormalized active-subscription receipt per player, keyed by user ID.
    Subscriptions,
}

impl Collection {
    /// The storage name of this collection.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => schema::cf::USERS,
            Self::Purchases => schema::cf::PURCHASES,
            Self::Subscriptions => schema::cf::SUBSCRIPTIONS,
        }
    }
}

/// The document store contract the ledger depends on.
///
/// Implementations must provide per-document atomicity for `set`; nothing
/// more is assumed. A merged `set` is itself a read-modify-write at the
/// application level.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read a document by ID. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or deserialization fails.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>>;

    /// Write a document by ID.
    ///
    /// With `merge = true`, top-level fields are overlaid onto the existing
    /// document (absent fields are preserved); with `merge = false`, the
    /// document is replaced wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or serialization fails.
    async fn set(&self, collection: Collection, id: &str, fields: Document, merge: bool)
        -> Result<()>;
}

/// Overlay `fields` onto `existing`, field by field at the top level.
pub(crate) fn merge_documents(mut existing: Document, fields: Document) -> Document {
    for (key, value) in fields {
        existing.insert(key, value);
    }
    existing
}
