//! LRU cache of rasterized pages

use std::num::NonZeroUsize;

use lru::LruCache;

pub const DEFAULT_CAPACITY: usize = 16;

/// A page rendered at a specific pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub page: usize,
    pub width: u32,
    pub height: u32,
}

/// Single-threaded LRU keyed by page and pixel size. Values are cheap
/// clones (texture handles, shared errors).
pub struct PageCache<V> {
    cache: LruCache<PageKey, V>,
}

impl<V: Clone> PageCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Get a cached page, promoting it in the LRU order
    pub fn get(&mut self, key: &PageKey) -> Option<V> {
        self.cache.get(key).cloned()
    }

    pub fn insert(&mut self, key: PageKey, value: V) {
        if let Some((evicted, _)) = self.cache.push(key, value) {
            if evicted != key {
                tracing::trace!(page = evicted.page, cached = self.len(), "evicted cached page");
            }
        }
    }

    /// Return the cached value or compute, cache and return it.
    pub fn get_or_insert_with(&mut self, key: PageKey, f: impl FnOnce() -> V) -> V {
        if let Some(v) = self.get(&key) {
            return v;
        }
        let value = f();
        self.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}
