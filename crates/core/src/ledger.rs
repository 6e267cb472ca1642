//! Persisted, lock-guarded record collection.
//!
//! A `Ledger` owns one collection of entities plus the store it is persisted
//! to. All mutations go through a single `RwLock` write guard and are
//! written back whole; if the write fails the in-memory records are restored
//! so readers never observe state that is not durable.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::records::Records;
use crate::store::{DocumentStore, load_records, save_records};

#[derive(Debug)]
pub struct Ledger<T: Entity, S> {
    collection: &'static str,
    store: S,
    records: RwLock<Records<T>>,
}

impl<T, S> Ledger<T, S>
where
    T: Entity + Clone + Serialize + DeserializeOwned,
    S: DocumentStore,
{
    /// Load `collection` from `store` (missing collection = empty ledger).
    pub fn open(collection: &'static str, store: S) -> DomainResult<Self> {
        let rows: Vec<T> = load_records(&store, collection)?;
        Ok(Self {
            collection,
            store,
            records: RwLock::new(Records::from_vec(rows)),
        })
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn read(&self) -> DomainResult<RwLockReadGuard<'_, Records<T>>> {
        self.records
            .read()
            .map_err(|_| DomainError::persistence(format!("{} lock poisoned", self.collection)))
    }

    pub fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Records<T>>> {
        self.records
            .write()
            .map_err(|_| DomainError::persistence(format!("{} lock poisoned", self.collection)))
    }

    /// Write the given records to the backing store.
    pub fn persist(&self, records: &Records<T>) -> DomainResult<()> {
        save_records(&self.store, self.collection, records.as_slice())
    }

    /// Apply `f` under the write lock and persist the result.
    ///
    /// If `f` fails nothing is written; if persisting fails the records are
    /// restored to their state before `f` ran.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Records<T>) -> DomainResult<R>) -> DomainResult<R> {
        let mut guard = self.write()?;
        self.mutate_locked(&mut guard, f)
    }

    /// Same as [`Ledger::mutate`] for a caller that already holds the write guard.
    pub fn mutate_locked<R>(
        &self,
        records: &mut Records<T>,
        f: impl FnOnce(&mut Records<T>) -> DomainResult<R>,
    ) -> DomainResult<R> {
        let backup = records.clone();
        let out = f(records)?;
        if let Err(e) = self.persist(records) {
            *records = backup;
            return Err(e);
        }
        Ok(out)
    }

    /// All records in storage order; an empty ledger is an error.
    pub fn get_all(&self, what: &str) -> DomainResult<Vec<T>> {
        let records = self.read()?;
        if records.is_empty() {
            return Err(DomainError::empty_collection(what));
        }
        Ok(records.iter().cloned().collect())
    }

    pub fn get_by_id(&self, id: &T::Id) -> DomainResult<T> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id.to_string()))
    }

    pub fn exists(&self, id: &T::Id) -> DomainResult<bool> {
        Ok(self.read()?.contains(id))
    }
}
