//! Demo-mode lifecycle: persisted flags and client swapping.
//!
//! The flags live in the same durable store as the cache, under their own
//! well-known keys, so an interrupted session resumes in the mode it was
//! left in. Toggling is expected only at UI transition points (login screen,
//! explicit "exit demo"), never while a query is in flight.

use color_eyre::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::ClientHandle;
use crate::cache::CacheStore;
use crate::store::KvStore;

use super::client::DemoClient;
use super::fixtures::DEMO_USER_ID;

/// Storage keys for the persisted lifecycle flags.
pub const DEMO_MODE_KEY: &str = "demoMode";
pub const DEMO_USER_KEY: &str = "demoUserId";
pub const DEMO_INITIALIZED_KEY: &str = "demoInitialized";

/// Outcome of entering demo mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoEntry {
  /// True on first entry only; the host shows its welcome notice when set.
  pub first_run: bool,
}

/// Outcome of leaving demo mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoExit {
  /// Demo mode was active. The host must treat this as a full reset
  /// (cached queries, in-memory auth state, and navigation history are
  /// invalid together) and return to the unauthenticated entry point.
  Exited,
  /// Demo mode was not active; nothing changed.
  NotActive,
}

/// Persisted demo-mode state and the lifecycle operations around it.
#[derive(Clone)]
pub struct DemoMode {
  store: Arc<dyn KvStore>,
}

impl DemoMode {
  pub fn new(store: Arc<dyn KvStore>) -> Self {
    Self { store }
  }

  /// Whether demo mode is active. Storage faults and corrupt flags read as
  /// inactive.
  pub fn is_active(&self) -> bool {
    match self.store.get(DEMO_MODE_KEY) {
      Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or(false),
      Ok(None) => false,
      Err(e) => {
        warn!("demo flag read failed: {}", e);
        false
      }
    }
  }

  /// Turn demo mode on and route `handle` to the fixture client.
  ///
  /// Re-entering while already initialized reports `first_run: false`, so
  /// one-time side effects never repeat.
  pub fn enter(&self, handle: &ClientHandle) -> Result<DemoEntry> {
    self.store.put(DEMO_MODE_KEY, "true")?;
    self
      .store
      .put(DEMO_USER_KEY, &serde_json::to_string(DEMO_USER_ID)?)?;

    let first_run = self.store.get(DEMO_INITIALIZED_KEY)?.is_none();
    if first_run {
      self.store.put(DEMO_INITIALIZED_KEY, "true")?;
    }

    handle.install_demo(Arc::new(DemoClient::new()));

    info!(first_run, "demo mode entered");
    Ok(DemoEntry { first_run })
  }

  /// Turn demo mode off: clear the flags, restore the live client, and drop
  /// every cached query.
  ///
  /// The cache and the client seam cannot invalidate each other, so nothing
  /// short of a full reset is safe. Safe no-op when demo mode is not active.
  pub fn exit(&self, handle: &ClientHandle, cache: &CacheStore) -> Result<DemoExit> {
    if !self.is_active() && !handle.is_demo_installed() {
      return Ok(DemoExit::NotActive);
    }

    self.store.remove(DEMO_MODE_KEY)?;
    self.store.remove(DEMO_USER_KEY)?;
    self.store.remove(DEMO_INITIALIZED_KEY)?;

    handle.restore();
    cache.clear();

    info!("demo mode exited");
    Ok(DemoExit::Exited)
  }

  /// Re-apply a persisted demo flag after a restart.
  ///
  /// The handle always starts out live; if the flag survived the last
  /// session, the fixture client has to be installed again before the first
  /// query runs.
  pub fn resume(&self, handle: &ClientHandle) {
    if self.is_active() && !handle.is_demo_installed() {
      handle.install_demo(Arc::new(DemoClient::new()));
      info!("demo mode resumed from persisted flag");
    }
  }
}
