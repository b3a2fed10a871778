// Small in-memory TTL cache for sheet snapshots and draft lookups.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

struct Entry<V> {
    inserted: Instant,
    value: V,
}

/// Entries expire `ttl` after insertion. A zero TTL disables caching.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A live entry for `key`. Expired entries are dropped on the way.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let fresh = entries.get(key)?.inserted.elapsed() < self.ttl;
        if fresh {
            entries.get(key).map(|e| e.value.clone())
        } else {
            entries.remove(key);
            None
        }
    }

    pub async fn insert(&self, key: K, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.lock().await.insert(
            key,
            Entry {
                inserted: Instant::now(),
                value,
            },
        );
    }

    pub async fn invalidate(&self, key: &K) {
        self.entries.lock().await.remove(key);
    }

    /// Return the cached value, or run `f` and cache its `Ok` result.
    ///
    /// The lock is not held while `f` runs, so two concurrent misses for the
    /// same key may both call `f`; the later insert wins.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(v) = self.get(&key).await {
            return Ok(v);
        }
        let value = f().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }
}
