//! In-memory inventory store.
//!
//! An ordered list behind a read-write lock. Lookups are linear scans by
//! exact id; no index and no uniqueness check. Every method takes and
//! releases the lock internally, so no guard escapes to async code.

use crate::item::InventoryItem;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to the item list; clones see the same items
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    items: Arc<RwLock<Vec<InventoryItem>>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item at the end
    pub fn append(&self, item: InventoryItem) {
        self.items.write().push(item);
    }

    /// First item whose id equals `id`
    pub fn find_by_id(&self, id: &str) -> Option<InventoryItem> {
        self.items.read().iter().find(|item| item.id == id).cloned()
    }

    /// Remove the first item with this id, shifting later items down.
    /// Lookup and removal happen under one write lock.
    pub fn remove_by_id(&self, id: &str) -> Option<InventoryItem> {
        let mut items = self.items.write();
        let index = find_index_by_id(&items, id)?;
        Some(remove_at(&mut items, index))
    }

    /// Run `f` on the first item with this id. Returns false if there is none.
    pub fn update<F>(&self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut InventoryItem),
    {
        let mut items = self.items.write();
        match find_index_by_id(&items, id) {
            Some(index) => {
                f(&mut items[index]);
                true
            }
            None => false,
        }
    }

    /// Snapshot of every item in insertion order
    pub fn list(&self) -> Vec<InventoryItem> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

/// Position of the first item whose id equals `id`
fn find_index_by_id(items: &[InventoryItem], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// O(n): later items shift down by one
fn remove_at(items: &mut Vec<InventoryItem>, index: usize) -> InventoryItem {
    items.remove(index)
}
