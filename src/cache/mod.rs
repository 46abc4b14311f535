//! Expiring key-value cache.
//!
//! Entries carry their own expiry. When the cache is full, the entry that
//! expires soonest is evicted, not the least recently used one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache sizing and lifetime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether the fallback client memoizes completions
    pub enabled: bool,
    /// Default lifetime of an entry
    pub ttl_seconds: u64,
    /// Maximum number of entries held at once
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 60,
            max_size: 1000,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    /// `None` when the lifetime is too large to represent
    expires: Option<Instant>,
}

impl<V> Entry<V> {
    fn expired(&self, now: Instant) -> bool {
        self.expires.is_some_and(|at| now > at)
    }
}

/// TTL and capacity bounded map.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, Entry<V>>,
    default_ttl: Duration,
    max_size: usize,
}

impl<V: Clone> TtlCache<V> {
    /// A `max_size` of 0 is treated as 1.
    pub fn new(default_ttl: Duration, max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            max_size: max_size.max(1),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_seconds), config.max_size)
    }

    /// Insert or overwrite `key`, using `ttl` instead of the default when given.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.set_at(key.into(), value, ttl, Instant::now());
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stored entries, including expired ones not yet purged.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    fn set_at(&mut self, key: String, value: V, ttl: Option<Duration>, now: Instant) {
        self.purge_expired(now);

        if self.entries.len() >= self.max_size && !self.entries.contains_key(&key) {
            if let Some(soonest) = self.soonest_expiring() {
                self.entries.remove(&soonest);
            }
        }

        let expires = now.checked_add(ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key, Entry { value, expires });
    }

    fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let expired = self.entries.get(key)?.expired(now);
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| e.value.clone())
    }

    fn purge_expired(&mut self, now: Instant) {
        self.entries.retain(|_, e| !e.expired(now));
    }

    fn soonest_expiring(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|(_, e)| (e.expires.is_none(), e.expires))
            .map(|(k, _)| k.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_set_and_get() {
        let mut cache = TtlCache::new(SECOND, 10);
        cache.set("test", "value".to_string(), None);
        assert_eq!(cache.get("test"), Some("value".to_string()));
        assert!(cache.has("test"));
    }

    #[test]
    fn test_expired_entry_is_absent_and_removed() {
        let mut cache = TtlCache::new(SECOND, 10);
        let now = Instant::now();
        cache.set_at("test".into(), 1, Some(Duration::from_millis(50)), now);

        assert_eq!(cache.get_at("test", now + Duration::from_millis(50)), Some(1));
        assert_eq!(cache.get_at("test", now + Duration::from_millis(51)), None);
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_evicts_soonest_expiring_not_oldest() {
        let mut cache = TtlCache::new(SECOND, 2);
        let now = Instant::now();
        cache.set_at("b".into(), "B", Some(Duration::from_millis(1000)), now);
        cache.set_at(
            "a".into(),
            "A",
            Some(Duration::from_millis(10)),
            now + Duration::from_millis(1),
        );
        cache.set_at("c".into(), "C", None, now + Duration::from_millis(2));

        assert_eq!(cache.size(), 2);
        let later = now + Duration::from_millis(3);
        assert_eq!(cache.get_at("a", later), None);
        assert_eq!(cache.get_at("b", later), Some("B"));
        assert_eq!(cache.get_at("c", later), Some("C"));
    }

    #[test]
    fn test_purge_before_eviction() {
        let mut cache = TtlCache::new(SECOND, 2);
        let now = Instant::now();
        cache.set_at("short".into(), 1, Some(Duration::from_millis(5)), now);
        cache.set_at("long".into(), 2, Some(Duration::from_secs(60)), now);

        // "short" has expired, so no live entry has to be evicted
        cache.set_at("new".into(), 3, None, now + Duration::from_millis(10));
        assert_eq!(cache.size(), 2);
        assert_eq!(cache.get_at("long", now + Duration::from_millis(11)), Some(2));
    }

    #[test]
    fn test_overwrite_at_capacity_keeps_other_entries() {
        let mut cache = TtlCache::new(SECOND, 2);
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.set("a", 3, None);

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.get("a"), Some(3));
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_unrepresentable_ttl_never_expires() {
        let mut cache = TtlCache::new(Duration::from_secs(u64::MAX), 2);
        let now = Instant::now();
        cache.set_at("forever".into(), 1, None, now);
        cache.set_at("short".into(), 2, Some(Duration::from_millis(5)), now);

        let later = now + Duration::from_secs(3600);
        assert_eq!(cache.get_at("forever", later), Some(1));
        assert_eq!(cache.get_at("short", later), None);

        // at capacity the bounded entry goes first
        cache.set_at("short".into(), 2, Some(Duration::from_millis(5)), later);
        cache.set_at("new".into(), 3, Some(Duration::from_secs(1)), later);
        assert_eq!(cache.get_at("forever", later), Some(1));
        assert_eq!(cache.get_at("short", later), None);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut cache = TtlCache::new(SECOND, 10);
        cache.set("key1", 1, None);
        cache.set("key2", 2, None);

        cache.delete("key1");
        assert!(!cache.has("key1"));

        cache.clear();
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.get("key2"), None);
    }

    proptest! {
        #[test]
        fn prop_size_never_exceeds_capacity(
            max_size in 1usize..16,
            keys in proptest::collection::vec("[a-z]{1,3}", 0..64),
        ) {
            let mut cache = TtlCache::new(SECOND, max_size);
            for key in keys {
                cache.set(key, 0u8, None);
                prop_assert!(cache.size() <= max_size);
            }
        }
    }
}
