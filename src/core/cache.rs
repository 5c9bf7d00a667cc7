/*
 * Item snapshot cache, keyed by item id. Navigation uses it to show
 * stale-but-immediate folder contents before network data arrives; nothing
 * in the library depends on the cache holding anything. The persistence
 * mechanism is the host's concern; `MemoryItemCache` is the default
 * in-process implementation.
 */
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::models::Item;

pub trait ItemCache: Send + Sync {
    fn get(&self, item_id: &str) -> Option<Item>;
    fn put(&self, item: &Item);
}

#[derive(Default)]
pub struct MemoryItemCache {
    items: Mutex<HashMap<String, Item>>,
}

impl MemoryItemCache {
    pub fn new() -> Self {
        MemoryItemCache::default()
    }
}

impl ItemCache for MemoryItemCache {
    fn get(&self, item_id: &str) -> Option<Item> {
        self.items.lock().unwrap().get(item_id).cloned()
    }

    fn put(&self, item: &Item) {
        self.items
            .lock()
            .unwrap()
            .insert(item.id().to_string(), item.clone());
    }
}
