//! Read-through coordination between the cache and a live fetch.

use color_eyre::Result;
use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use super::store::CacheStore;

/// Serve `key` from the cache, falling back to `fetch` on a miss.
///
/// A hit returns immediately without invoking `fetch`. On a miss the fetched
/// value is cached for `ttl` and returned; a fetch failure propagates
/// unmodified and caches nothing, so the next call retries.
///
/// Caching is purely additive: disabling it changes latency and call volume,
/// never success/failure outcomes. Callers decide per query whether to route
/// through here at all; interactive search and demo mode fetch directly.
///
/// Concurrent calls for the same key are not coalesced; each runs its own
/// fetch and the last cache write wins.
pub async fn get_cached_or_fetch<T, F, Fut>(
  cache: &CacheStore,
  key: &str,
  ttl: Duration,
  fetch: F,
) -> Result<T>
where
  T: Serialize + DeserializeOwned,
  F: FnOnce() -> Fut,
  Fut: Future<Output = Result<T>>,
{
  if let Some(hit) = cache.get::<T>(key) {
    return Ok(hit);
  }

  let data = fetch().await?;
  cache.set(key, &data, ttl);

  Ok(data)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;
  use color_eyre::eyre::eyre;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  fn cache() -> CacheStore {
    CacheStore::new(Arc::new(MemoryStore::new()))
  }

  #[tokio::test]
  async fn test_second_call_served_from_cache() {
    let cache = cache();
    let calls = AtomicUsize::new(0);

    for _ in 0..2 {
      let value: Vec<i32> = get_cached_or_fetch(&cache, "k", Duration::from_secs(60), || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![1, 2])
      })
      .await
      .unwrap();

      assert_eq!(value, vec![1, 2]);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_fetch_failure_propagates_and_is_not_cached() {
    let cache = cache();
    let calls = AtomicUsize::new(0);

    let result: Result<Vec<i32>> =
      get_cached_or_fetch(&cache, "k", Duration::from_secs(60), || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(eyre!("network down"))
      })
      .await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("network down"));

    // No negative caching: the next call retries the fetch.
    let value: Vec<i32> = get_cached_or_fetch(&cache, "k", Duration::from_secs(60), || async {
      calls.fetch_add(1, Ordering::SeqCst);
      Ok(vec![3])
    })
    .await
    .unwrap();

    assert_eq!(value, vec![3]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_hit_skips_fetch_entirely() {
    let cache = cache();
    cache.set("k", &"cached".to_string(), Duration::from_secs(60));

    let value: String = get_cached_or_fetch(&cache, "k", Duration::from_secs(60), || async {
      panic!("fetch must not run on a hit");
    })
    .await
    .unwrap();

    assert_eq!(value, "cached");
  }
}
