//! In-Memory TTL Cache Implementation

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::application::ports::{CachePort, CacheStats};

struct CacheEntry<V> {
    data: V,
    inserted_at: Instant,
}

/// 内存 TTL 缓存
///
/// - 容量有上限，写入时先清理过期条目，仍满则淘汰最早写入的条目
/// - 并发写入时容量为近似上限
pub struct InMemoryTtlCache<V> {
    /// cache_key -> entry
    entries: DashMap<String, CacheEntry<V>>,
    capacity: usize,
    ttl: Duration,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl<V> InMemoryTtlCache<V> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
            ttl,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>) -> bool {
        entry.inserted_at.elapsed() >= self.ttl
    }

    /// 清理过期条目，返回清理数量
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    fn evict_if_needed(&self) {
        if self.entries.len() < self.capacity {
            return;
        }

        let purged = self.purge_expired();
        if purged > 0 {
            tracing::debug!(purged = purged, "Expired cache entries purged");
        }

        while self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().inserted_at)
                .map(|entry| entry.key().clone());

            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                    tracing::debug!(cache_key = %key, "Cache entry evicted");
                }
                None => break,
            }
        }
    }
}

impl<V> CachePort<V> for InMemoryTtlCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        let hit = match self.entries.get(key) {
            Some(entry) if !self.is_expired(&entry) => Some(entry.data.clone()),
            Some(_) => None,
            None => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        match hit {
            Some(value) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                // 过期条目视为不存在
                self.entries
                    .remove_if(key, |_, entry| entry.inserted_at.elapsed() >= self.ttl);
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn put(&self, key: String, value: V) {
        if !self.entries.contains_key(&key) {
            self.evict_if_needed();
        }
        self.entries.insert(
            key,
            CacheEntry {
                data: value,
                inserted_at: Instant::now(),
            },
        );
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }
}
