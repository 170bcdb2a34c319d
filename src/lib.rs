//! chairside: client-side data core for a solo dental practice manager.
//!
//! The crate sits between the UI layer and the hosted backend. Reads go
//! through a TTL cache persisted in durable local storage, and a swappable
//! client seam lets the whole backend be replaced with deterministic fixture
//! data ("demo mode") without the UI noticing.
//!
//! Wiring order for a host application:
//!
//! ```ignore
//! let config = Config::load(None)?;
//! let store: Arc<dyn KvStore> = Arc::new(SqliteStore::open()?);
//! let cache = CacheStore::new(Arc::clone(&store)).with_default_ttl(config.cache.ttl());
//! let handle = ClientHandle::new(Arc::new(RestClient::new(&config)?));
//! let demo = DemoMode::new(Arc::clone(&store));
//! demo.resume(&handle); // re-apply a persisted demo flag
//! let client = CachedClient::new(handle, cache, demo)
//!   .with_cache_enabled(config.cache.enabled);
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod demo;
pub mod logging;
pub mod store;

pub use backend::{
  CachedClient, ClientHandle, ClinicQueryKey, DataClient, Envelope, RestClient,
};
pub use cache::{get_cached_or_fetch, CacheStore, QueryKey};
pub use config::Config;
pub use demo::{DemoClient, DemoEntry, DemoExit, DemoMode};
pub use store::{KvStore, MemoryStore, SqliteStore};
