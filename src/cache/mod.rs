//! Client-side caching for read queries.
//!
//! This module provides:
//! - TTL-stamped entries persisted in the shared durable store
//! - read-through coordination between the cache and a live fetch
//! - stable, hash-based cache keys for queries
//!
//! Caching here is a latency optimization, never a correctness requirement:
//! every consumer must tolerate a miss at any time (cold start, expiry,
//! corruption) by falling back to the live fetch.

mod coordinator;
mod keys;
mod store;

pub use coordinator::get_cached_or_fetch;
pub use keys::QueryKey;
pub use store::{CacheStore, CACHE_PREFIX, DEFAULT_TTL};
