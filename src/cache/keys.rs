//! Stable cache keys for queries.

use sha2::{Digest, Sha256};

/// A query that can be cached under a stable, fixed-length key.
pub trait QueryKey {
  /// Normalized description of the query; the hashing input.
  fn description(&self) -> String;

  /// SHA-256 of the description, hex-encoded.
  ///
  /// Fixed-length and safe as a storage key regardless of what the
  /// description contains.
  fn cache_hash(&self) -> String {
    let mut hasher = Sha256::new();
    hasher.update(self.description().as_bytes());
    hex::encode(hasher.finalize())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Probe(&'static str);

  impl QueryKey for Probe {
    fn description(&self) -> String {
      self.0.to_string()
    }
  }

  #[test]
  fn test_hash_is_stable() {
    assert_eq!(Probe("patients").cache_hash(), Probe("patients").cache_hash());
  }

  #[test]
  fn test_different_queries_hash_differently() {
    assert_ne!(
      Probe("patients").cache_hash(),
      Probe("appointments").cache_hash()
    );
  }

  #[test]
  fn test_hash_is_hex_sha256() {
    let hash = Probe("patients").cache_hash();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
  }
}
