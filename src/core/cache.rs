use lru::LruCache;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

/// Bounded, strictly least-recently-used memo of finished results.
///
/// A lookup promotes the entry; an insert past capacity evicts the entry
/// touched least recently. Both happen under one lock acquisition. Failed
/// results are stored like successful ones and only leave by eviction.
pub struct MemoCache<V> {
    entries: Mutex<LruCache<String, V>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> MemoCache<V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the memoized value for `key`, or run `compute` and memoize it.
    ///
    /// `compute` runs outside the lock, so two concurrent misses on the same
    /// key both compute and the later insert wins.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(hit) = self.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("cache hit: {}", key);
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("cache miss: {}", key);
        let value = compute().await;
        self.insert(key.to_string(), value.clone()).await;
        value
    }

    /// Lookup that counts as an access (promotes the entry).
    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn insert(&self, key: String, value: V) {
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(key.clone(), value) {
            if evicted != key {
                debug!("cache evicted: {}", evicted);
            }
        }
    }

    /// Presence check that does not touch recency.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len().await,
            capacity: self.capacity(),
        }
    }
}

impl<V> std::fmt::Debug for MemoCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("capacity", &self.capacity)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}
