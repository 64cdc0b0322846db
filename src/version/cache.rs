//! In-memory memoization of latest-version lookups
//!
//! One cache lives inside each resolver for the lifetime of a scan run.
//! Entries are never evicted; a cached `None` means "looked up, nothing found"
//! and is distinct from a key that was never looked up.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use tracing::debug;

type Slot = Arc<OnceCell<Option<String>>>;

#[derive(Default)]
pub struct LatestVersionCache {
    name: &'static str,
    entries: Mutex<HashMap<String, Slot>>,
}

impl LatestVersionCache {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the memoized lookup result for `key`.
    ///
    /// `None` if the key was never looked up, `Some(None)` for a memoized miss.
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of keys with a completed lookup
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached value for `key`, running `fetch` on the first lookup.
    ///
    /// Concurrent callers for the same key wait for a single in-flight fetch.
    /// A failed fetch leaves the key unset so a later call can try again.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Option<String>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<String>, E>>,
    {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.entry(key.to_string()).or_default().clone()
        };

        if let Some(value) = slot.get() {
            debug!("{} cache hit: {}", self.name, key);
            return Ok(value.clone());
        }

        let value = slot
            .get_or_try_init(|| async move {
                debug!("{} cache miss: {}", self.name, key);
                fetch().await
            })
            .await?;

        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn get_or_fetch_runs_fetch_once_per_key() {
        let cache = LatestVersionCache::new("test");
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        for _ in 0..3 {
            let value = cache
                .get_or_fetch("lodash", || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(Some("4.17.21".to_string()))
                })
                .await
                .unwrap();
            assert_eq!(value, Some("4.17.21".to_string()));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_distinguishes_memoized_miss_from_unknown_key() {
        let cache = LatestVersionCache::new("test");

        cache
            .get_or_fetch("missing", || async { Ok::<_, ()>(None) })
            .await
            .unwrap();

        assert_eq!(cache.get("missing"), Some(None));
        assert_eq!(cache.get("never-looked-up"), None);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn get_or_fetch_does_not_memoize_errors() {
        let cache = LatestVersionCache::new("test");

        let result = cache
            .get_or_fetch("flaky", || async { Err::<Option<String>, _>("boom") })
            .await;
        assert_eq!(result, Err("boom"));
        assert!(cache.is_empty());

        let value = cache
            .get_or_fetch("flaky", || async { Ok::<_, &str>(Some("1.0.0".to_string())) })
            .await
            .unwrap();
        assert_eq!(value, Some("1.0.0".to_string()));
    }

    #[tokio::test]
    async fn concurrent_lookups_share_one_fetch() {
        let cache = LatestVersionCache::new("test");
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let fetch = || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok::<_, ()>(Some("2.0.0".to_string()))
        };

        let (a, b) = tokio::join!(cache.get_or_fetch("oak", fetch), cache.get_or_fetch("oak", fetch));

        assert_eq!(a.unwrap(), Some("2.0.0".to_string()));
        assert_eq!(b.unwrap(), Some("2.0.0".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
