//! TTL cache entries layered over a [`KvStore`].

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::store::KvStore;

/// Namespace prefix for cache entries in the shared store.
pub const CACHE_PREFIX: &str = "cache_";

/// Entry lifetime used when the caller does not pick one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// A stored value with its write time and lifetime.
///
/// Valid iff `now - timestamp <= ttl`; expired entries are evicted lazily on
/// the next read.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
  data: T,
  /// Epoch milliseconds at write time.
  timestamp: i64,
  /// Lifetime in milliseconds.
  ttl: u64,
}

/// TTL cache over the durable store.
///
/// All operations degrade to a miss or a no-op on failure. `set` never
/// reports an error to the caller; `get` never panics and treats anything it
/// cannot read as a miss.
#[derive(Clone)]
pub struct CacheStore {
  store: Arc<dyn KvStore>,
  default_ttl: Duration,
}

impl CacheStore {
  pub fn new(store: Arc<dyn KvStore>) -> Self {
    Self {
      store,
      default_ttl: DEFAULT_TTL,
    }
  }

  /// Set the entry lifetime used by [`CacheStore::set_default`].
  pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
    self.default_ttl = ttl;
    self
  }

  pub fn default_ttl(&self) -> Duration {
    self.default_ttl
  }

  fn storage_key(key: &str) -> String {
    format!("{}{}", CACHE_PREFIX, key)
  }

  /// Store a value under `key` for `ttl`.
  ///
  /// Serialization and storage faults are logged and swallowed; the caller
  /// keeps its data either way.
  pub fn set<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) {
    let entry = CacheEntry {
      data,
      timestamp: Utc::now().timestamp_millis(),
      ttl: ttl.as_millis() as u64,
    };

    match serde_json::to_string(&entry) {
      Ok(json) => {
        if let Err(e) = self.store.put(&Self::storage_key(key), &json) {
          warn!("cache write failed for {}: {}", key, e);
        }
      }
      Err(e) => warn!("cache serialization failed for {}: {}", key, e),
    }
  }

  /// Store a value with the configured default lifetime.
  pub fn set_default<T: Serialize>(&self, key: &str, data: &T) {
    self.set(key, data, self.default_ttl)
  }

  /// Read a value.
  ///
  /// Absent, malformed, and expired entries all read as `None`; expired and
  /// malformed entries are deleted on the way out.
  pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let storage_key = Self::storage_key(key);

    let raw = match self.store.get(&storage_key) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        warn!("cache read failed for {}: {}", key, e);
        return None;
      }
    };

    let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
      Ok(entry) => entry,
      Err(e) => {
        debug!("evicting malformed cache entry {}: {}", key, e);
        let _ = self.store.remove(&storage_key);
        return None;
      }
    };

    let age_ms = Utc::now().timestamp_millis() - entry.timestamp;
    if age_ms > entry.ttl as i64 {
      debug!("cache entry {} expired", key);
      let _ = self.store.remove(&storage_key);
      return None;
    }

    Some(entry.data)
  }

  /// Delete one entry.
  pub fn remove(&self, key: &str) {
    if let Err(e) = self.store.remove(&Self::storage_key(key)) {
      warn!("cache remove failed for {}: {}", key, e);
    }
  }

  /// Delete every cache entry, leaving keys outside the cache prefix (demo
  /// flags and anything else sharing the store) untouched.
  pub fn clear(&self) {
    let keys = match self.store.keys_with_prefix(CACHE_PREFIX) {
      Ok(keys) => keys,
      Err(e) => {
        warn!("cache clear failed: {}", e);
        return;
      }
    };

    for key in keys {
      if let Err(e) = self.store.remove(&key) {
        warn!("cache clear failed for {}: {}", key, e);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;

  fn cache() -> (Arc<MemoryStore>, CacheStore) {
    let store = Arc::new(MemoryStore::new());
    let cache = CacheStore::new(store.clone());
    (store, cache)
  }

  #[test]
  fn test_set_then_get_within_ttl() {
    let (_, cache) = cache();

    cache.set("patients", &vec![1, 2, 3], Duration::from_secs(60));
    assert_eq!(cache.get::<Vec<i32>>("patients"), Some(vec![1, 2, 3]));
  }

  #[test]
  fn test_set_default_uses_configured_ttl() {
    let (store, _) = cache();
    let cache = CacheStore::new(store).with_default_ttl(Duration::from_secs(7));

    cache.set_default("k", &"v".to_string());
    assert_eq!(cache.get::<String>("k"), Some("v".to_string()));
    assert_eq!(cache.default_ttl(), Duration::from_secs(7));
  }

  #[test]
  fn test_get_absent_is_miss() {
    let (_, cache) = cache();
    assert_eq!(cache.get::<Vec<i32>>("nothing"), None);
  }

  #[test]
  fn test_expired_entry_is_miss_and_deleted() {
    let (store, cache) = cache();

    // Entry written at the epoch with a 1s lifetime: long expired.
    store
      .put("cache_old", r#"{"data":[1],"timestamp":0,"ttl":1000}"#)
      .unwrap();

    assert_eq!(cache.get::<Vec<i32>>("old"), None);
    assert_eq!(store.get("cache_old").unwrap(), None);
  }

  #[test]
  fn test_malformed_entry_is_miss_and_deleted() {
    let (store, cache) = cache();

    store.put("cache_bad", "not json at all").unwrap();

    assert_eq!(cache.get::<Vec<i32>>("bad"), None);
    assert_eq!(store.get("cache_bad").unwrap(), None);
  }

  #[test]
  fn test_remove() {
    let (_, cache) = cache();

    cache.set("k", &42, Duration::from_secs(60));
    cache.remove("k");
    assert_eq!(cache.get::<i32>("k"), None);
  }

  #[test]
  fn test_clear_spares_unrelated_keys() {
    let (store, cache) = cache();

    cache.set("a", &1, Duration::from_secs(60));
    cache.set("b", &2, Duration::from_secs(60));
    store.put("demoMode", "true").unwrap();

    cache.clear();

    assert_eq!(cache.get::<i32>("a"), None);
    assert_eq!(cache.get::<i32>("b"), None);
    assert_eq!(store.get("demoMode").unwrap(), Some("true".to_string()));
  }
}
