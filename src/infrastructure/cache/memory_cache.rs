//! In-process cache with per-key expiry and LRU eviction.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

const DEFAULT_CAPACITY: usize = 1024;

struct Slot {
    value: String,
    expires_at: Instant,
}

/// Cache kept in a bounded, process-local LRU map.
///
/// Once full, the least recently used page is evicted. Expired slots are
/// dropped on read.
pub struct MemoryCache {
    slots: Mutex<LruCache<String, Slot>>,
    default_ttl: Duration,
}

impl MemoryCache {
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self::with_capacity(default_ttl_seconds, DEFAULT_CAPACITY)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(default_ttl_seconds: u64, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        debug!(
            "Using MemoryCache (TTL: {}s, capacity: {})",
            default_ttl_seconds, capacity
        );
        Self {
            slots: Mutex::new(LruCache::new(capacity)),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Number of slots currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Slot>> {
        // A poisoned map only holds cache data; keep serving it.
        self.slots.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut slots = self.lock();
        match slots.get(key) {
            Some(slot) if slot.expires_at > Instant::now() => Ok(Some(slot.value.clone())),
            Some(_) => {
                slots.pop(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let ttl = ttl_seconds.map_or(self.default_ttl, Duration::from_secs);
        self.lock().put(
            key.to_string(),
            Slot {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.lock().pop(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
