use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Decides how long a freshly computed value stays reusable.
pub trait CachePolicy: Send + Sync {
    /// Time to live for new entries; None disables caching.
    fn ttl(&self) -> Option<Duration>;
}

/// Keep entries for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct TtlPolicy {
    ttl: Duration,
}

impl TtlPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}

impl CachePolicy for TtlPolicy {
    fn ttl(&self) -> Option<Duration> {
        Some(self.ttl)
    }
}

/// Never cache; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl CachePolicy for NoCache {
    fn ttl(&self) -> Option<Duration> {
        None
    }
}

/// A thread-safe per-symbol cache with a pluggable expiry policy.
pub struct Cache<V> {
    data: DashMap<String, CacheEntry<V>>,
    policy: Box<dyn CachePolicy>,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> Cache<V> {
    pub fn new(policy: impl CachePolicy + 'static) -> Self {
        Self {
            data: DashMap::new(),
            policy: Box::new(policy),
        }
    }

    /// Get a fresh value. Stale entries are evicted.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    /// Store a value under the policy TTL. No-op when the policy disables caching.
    pub fn set(&self, key: String, value: V) {
        if let Some(ttl) = self.policy.ttl() {
            self.data.insert(
                key,
                CacheEntry {
                    value,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.data.remove(key).map(|(_, entry)| entry.value)
    }

    pub fn clear(&self) {
        self.data.clear();
    }

    /// Remove all expired entries.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
