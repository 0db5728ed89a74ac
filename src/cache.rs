use std::collections::HashMap;

use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use utoipa::ToSchema;

/// Cache key for the server-side cart contents.
pub const CART_ITEMS_KEY: &str = "cartItemsData";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CacheEntry {
    pub generation: u64,
    pub stale: bool,
}

/// Named query keys that readers reload once they are marked stale.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock()
    }

    pub fn invalidate(&self, key: &str) {
        let mut entries = self.lock();
        let entry = entries.entry(key.to_string()).or_default();
        entry.generation += 1;
        entry.stale = true;
        tracing::debug!(key, generation = entry.generation, "query invalidated");
    }

    pub fn mark_fresh(&self, key: &str) {
        self.lock().entry(key.to_string()).or_default().stale = false;
    }

    pub fn is_stale(&self, key: &str) -> bool {
        self.lock().get(key).is_some_and(|entry| entry.stale)
    }

    pub fn generation(&self, key: &str) -> u64 {
        self.lock().get(key).map_or(0, |entry| entry.generation)
    }

    pub fn entry(&self, key: &str) -> CacheEntry {
        self.lock().get(key).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_then_refresh() {
        let cache = QueryCache::new();
        assert!(!cache.is_stale(CART_ITEMS_KEY));
        cache.invalidate(CART_ITEMS_KEY);
        cache.invalidate(CART_ITEMS_KEY);
        assert!(cache.is_stale(CART_ITEMS_KEY));
        assert_eq!(cache.generation(CART_ITEMS_KEY), 2);
        cache.mark_fresh(CART_ITEMS_KEY);
        assert!(!cache.is_stale(CART_ITEMS_KEY));
        assert_eq!(cache.generation(CART_ITEMS_KEY), 2);
    }
}
