//! Durable key/value storage shared by the cache and the demo-mode flags.
//!
//! This is the persistence analog of a browser's localStorage: a flat,
//! synchronous string map. The TTL cache namespaces its entries under a
//! prefix; the demo-mode lifecycle keeps its flags beside them under
//! well-known keys. Values are JSON-encoded by the layers above.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use color_eyre::Result;

/// Flat durable string-to-string map.
pub trait KvStore: Send + Sync {
  /// Read a value. An absent key is `Ok(None)`.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Write a value, replacing any existing one.
  fn put(&self, key: &str, value: &str) -> Result<()>;

  /// Delete a key. Deleting an absent key is not an error.
  fn remove(&self, key: &str) -> Result<()>;

  /// List every stored key starting with `prefix`.
  fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}
