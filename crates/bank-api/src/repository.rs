//! # In-Memory Repository
//!
//! Stand-in for the persistence collaborator. Each entity type gets its own
//! ordered map keyed by identifier plus a sequence that hands out ids
//! starting at 1. There is no durability: data is lost on restart.
//!
//! Reads clone records out of the map; no lock is ever held across an
//! `.await`.

use std::collections::BTreeMap;

use bank_core::{Entity, Identifier};
use parking_lot::RwLock;

struct Inner<E: Entity> {
    records: BTreeMap<E::Id, E>,
    next_id: i64,
}

/// Thread-safe store of one entity type.
pub struct InMemoryRepository<E: Entity> {
    inner: RwLock<Inner<E>>,
}

impl<E: Entity> std::fmt::Debug for InMemoryRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("entity", &E::NAME)
            .field("len", &self.len())
            .finish()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Insert or replace a record, assigning an identifier when it has none.
    /// Returns the stored record.
    pub fn save(&self, mut entity: E) -> E {
        let mut inner = self.inner.write();
        let id = match entity.identifier() {
            Some(id) => {
                inner.next_id = inner.next_id.max(id.raw().saturating_add(1));
                id
            }
            None => {
                let id = E::Id::from_raw(inner.next_id);
                inner.next_id = inner.next_id.saturating_add(1);
                entity.set_identifier(id);
                id
            }
        };
        inner.records.insert(id, entity.clone());
        entity
    }

    /// All records in ascending identifier order.
    pub fn find_all(&self) -> Vec<E> {
        self.inner.read().records.values().cloned().collect()
    }

    pub fn find_one(&self, id: E::Id) -> Option<E> {
        self.inner.read().records.get(&id).cloned()
    }

    pub fn exists_by_id(&self, id: E::Id) -> bool {
        self.inner.read().records.contains_key(&id)
    }

    /// Records matching `predicate`, in ascending identifier order.
    pub fn find_by(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        self.inner
            .read()
            .records
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// Modify a stored record in place under the write lock.
    /// Returns the updated record, or `None` if it does not exist.
    pub fn update(&self, id: E::Id, f: impl FnOnce(&mut E)) -> Option<E> {
        let mut inner = self.inner.write();
        let record = inner.records.get_mut(&id)?;
        f(record);
        // The stored id wins over anything `f` wrote.
        record.set_identifier(id);
        Some(record.clone())
    }

    pub fn delete_by_id(&self, id: E::Id) -> Option<E> {
        self.inner.write().records.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
