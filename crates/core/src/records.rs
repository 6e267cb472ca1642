//! Ordered, id-indexed record collection owned by a ledger.
//!
//! Records keep insertion (storage) order, which is what listings, reports
//! and the persisted document all observe. The index maps each id to its
//! slot and is rebuilt whenever slots shift.

use std::collections::HashMap;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct Records<T: Entity> {
    items: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Entity> Default for Records<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Entity> Records<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records loaded from storage, preserving their order.
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut records = Self { items, index: HashMap::new() };
        records.reindex();
        records
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (slot, item) in self.items.iter().enumerate() {
            // First occurrence wins if storage ever held a duplicate id.
            self.index.entry(item.id().clone()).or_insert(slot);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.index.get(id).map(|&slot| &self.items[slot])
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&slot) => Some(&mut self.items[slot]),
            None => None,
        }
    }

    fn name_taken(&self, name: &str, except: Option<&T::Id>) -> bool {
        self.items
            .iter()
            .any(|other| other.name() == Some(name) && Some(other.id()) != except)
    }

    /// Append a new record, enforcing id and name uniqueness.
    pub fn insert(&mut self, item: T) -> DomainResult<()> {
        if self.contains(item.id()) {
            return Err(DomainError::duplicate_id(item.id().to_string()));
        }
        if let Some(name) = item.name() {
            if self.name_taken(name, None) {
                return Err(DomainError::duplicate_name(name));
            }
        }

        self.index.insert(item.id().clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Replace the record stored under `id`, keeping its slot.
    ///
    /// Fails with `DuplicateName` if a different record already holds the
    /// new name.
    pub fn replace(&mut self, id: &T::Id, item: T) -> DomainResult<()> {
        if let Some(name) = item.name() {
            if self.name_taken(name, Some(id)) {
                return Err(DomainError::duplicate_name(name));
            }
        }

        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))?;

        let id_changed = item.id() != id;
        self.items[slot] = item;
        if id_changed {
            self.reindex();
        }
        Ok(())
    }

    /// Remove and return the record stored under `id`.
    pub fn remove(&mut self, id: &T::Id) -> DomainResult<T> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))?;

        let removed = self.items.remove(slot);
        self.reindex();
        Ok(removed)
    }
}
