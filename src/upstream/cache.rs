//! TTL-bounded LRU cache for upstream response bodies.
//!
//! Upstream data is static per game version, so bodies are cached by request path
//! for a long TTL. The lock is only held for the map operation itself, never across
//! a network call.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct CacheEntry {
    body: Arc<str>,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        !ttl.is_zero() && self.created_at.elapsed() > ttl
    }
}

#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// A zero `ttl` keeps entries until they are evicted for capacity.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Returns the cached body, dropping it if it has outlived the TTL.
    pub async fn get(&self, key: &str) -> Option<Arc<str>> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => return Some(Arc::clone(&entry.body)),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub async fn put(&self, key: String, body: Arc<str>) {
        let entry = CacheEntry {
            body,
            created_at: Instant::now(),
        };
        self.entries.lock().await.put(key, entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_bodies() {
        let cache = ResponseCache::new(4, Duration::from_secs(60));
        cache.put("/pokemon/1".to_string(), Arc::from("{}")).await;
        assert_eq!(cache.get("/pokemon/1").await.as_deref(), Some("{}"));
        assert_eq!(cache.get("/pokemon/2").await, None);
    }

    #[tokio::test]
    async fn evicts_least_recently_used() {
        let cache = ResponseCache::new(2, Duration::ZERO);
        cache.put("a".to_string(), Arc::from("1")).await;
        cache.put("b".to_string(), Arc::from("2")).await;
        cache.get("a").await;
        cache.put("c".to_string(), Arc::from("3")).await;

        assert!(cache.get("a").await.is_some());
        assert!(cache.get("b").await.is_none());
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn expired_entries_are_dropped() {
        let cache = ResponseCache::new(4, Duration::from_millis(10));
        cache.put("a".to_string(), Arc::from("1")).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get("a").await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn zero_capacity_still_caches_one_entry() {
        let cache = ResponseCache::new(0, Duration::ZERO);
        cache.put("a".to_string(), Arc::from("1")).await;
        assert!(cache.get("a").await.is_some());
        cache.put("b".to_string(), Arc::from("2")).await;
        assert!(cache.get("a").await.is_none());
        assert_eq!(cache.len().await, 1);
    }
}
