//! Navigation-scoped caching.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

/// A single-slot cache keyed by an opaque scope string.
///
/// Holds at most one value: the one fetched under the current key.
/// Fetching under a different key replaces the slot, so a value never
/// outlives the navigation scope it was resolved for. Concurrent misses
/// may each run their fetch; the slot keeps whichever finished last.
pub struct ScopedCache<V> {
    slot: RwLock<Option<(String, Arc<V>)>>,
}

impl<V> ScopedCache<V> {
    /// An empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::const_new(None),
        }
    }

    /// The cached value, if one is held under `key`.
    pub async fn get(&self, key: &str) -> Option<Arc<V>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|(held, _)| held == key)
            .map(|(_, value)| Arc::clone(value))
    }

    /// Store `value` under `key`, replacing whatever the slot held.
    pub async fn put(&self, key: impl Into<String>, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let mut slot = self.slot.write().await;
        *slot = Some((key.into(), Arc::clone(&value)));
        value
    }

    /// The value under `key`, running `fetch` on a miss.
    ///
    /// The fetch runs outside the lock.
    ///
    /// # Errors
    ///
    /// A failed fetch returns its error unchanged and leaves the slot
    /// untouched.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!(key, "cache hit");
            return Ok(value);
        }
        debug!(key, "cache miss");
        let value = fetch().await?;
        Ok(self.put(key, value).await)
    }

    /// Drop the held value.
    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}

impl<V> Default for ScopedCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for ScopedCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedCache").finish_non_exhaustive()
    }
}
