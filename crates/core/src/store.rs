//! Durable document storage port.
//!
//! Each ledger owns one named collection and always reads or overwrites it
//! whole. Adapters decide where the document lives (memory, JSON file).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{DomainError, DomainResult};

/// Whole-collection document store keyed by collection name.
pub trait DocumentStore: Send + Sync {
    /// Read the whole collection. `None` means it was never written (or is empty).
    fn load(&self, collection: &str) -> DomainResult<Option<JsonValue>>;

    /// Atomically overwrite the whole collection.
    fn save(&self, collection: &str, document: &JsonValue) -> DomainResult<()>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn load(&self, collection: &str) -> DomainResult<Option<JsonValue>> {
        (**self).load(collection)
    }

    fn save(&self, collection: &str, document: &JsonValue) -> DomainResult<()> {
        (**self).save(collection, document)
    }
}

/// Load a collection as a list of records (missing collection = empty list).
pub fn load_records<T, S>(store: &S, collection: &str) -> DomainResult<Vec<T>>
where
    T: DeserializeOwned,
    S: DocumentStore + ?Sized,
{
    match store.load(collection)? {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(doc) => serde_json::from_value(doc).map_err(|e| {
            DomainError::persistence(format!("collection {collection} is unreadable: {e}"))
        }),
    }
}

/// Overwrite a collection with the given records.
pub fn save_records<T, S>(store: &S, collection: &str, records: &[T]) -> DomainResult<()>
where
    T: Serialize,
    S: DocumentStore + ?Sized,
{
    let doc = serde_json::to_value(records)?;
    store.save(collection, &doc)
}

/// In-memory document store for tests/dev.
///
/// `fail_writes(true)` makes every subsequent `save` fail, which lets tests
/// exercise the all-or-nothing paths of multi-step operations.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    docs: RwLock<HashMap<String, JsonValue>>,
    fail_writes: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection without going through a ledger.
    pub fn with_collection(self, collection: &str, document: JsonValue) -> Self {
        if let Ok(mut docs) = self.docs.write() {
            docs.insert(collection.to_string(), document);
        }
        self
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of a stored collection (test inspection).
    pub fn document(&self, collection: &str) -> Option<JsonValue> {
        self.docs.read().ok()?.get(collection).cloned()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self, collection: &str) -> DomainResult<Option<JsonValue>> {
        let docs = self
            .docs
            .read()
            .map_err(|_| DomainError::persistence("document store lock poisoned"))?;
        Ok(docs.get(collection).cloned())
    }

    fn save(&self, collection: &str, document: &JsonValue) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::persistence(format!(
                "write to {collection} rejected"
            )));
        }
        let mut docs = self
            .docs
            .write()
            .map_err(|_| DomainError::persistence("document store lock poisoned"))?;
        docs.insert(collection.to_string(), document.clone());
        Ok(())
    }
}
