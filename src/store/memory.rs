//! In-memory implementation of [`KvStore`].
//!
//! Nothing survives the process. Used by tests and by hosts that want a
//! throwaway session without touching the filesystem.

use color_eyre::{eyre::eyre, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use super::KvStore;

/// HashMap-backed store.
#[derive(Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KvStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    Ok(entries.get(key).cloned())
  }

  fn put(&self, key: &str, value: &str) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    entries.remove(key);
    Ok(())
  }

  fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    Ok(
      entries
        .keys()
        .filter(|k| k.starts_with(prefix))
        .cloned()
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_roundtrip_and_remove() {
    let store = MemoryStore::new();

    store.put("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap(), Some("v".to_string()));

    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
  }

  #[test]
  fn test_keys_with_prefix() {
    let store = MemoryStore::new();

    store.put("cache_x", "1").unwrap();
    store.put("other", "2").unwrap();

    assert_eq!(
      store.keys_with_prefix("cache_").unwrap(),
      vec!["cache_x".to_string()]
    );
  }
}
