//! The data-client seam: one trait, two implementations, one swappable cell.
//!
//! The application consumes a single [`ClientHandle`]. Live traffic goes to
//! [`RestClient`]; while demo mode is active the handle serves
//! [`DemoClient`](crate::demo::DemoClient) instead. Switching is a reference
//! swap on the handle, so restoring the live client is exact by construction
//! and repeated installs can never lose it.

mod cache_keys;
mod cached;
mod envelope;
mod rest;
pub mod types;

pub use cache_keys::ClinicQueryKey;
pub use cached::CachedClient;
pub use envelope::{ApiError, Envelope, SessionPayload, UserPayload};
pub use rest::RestClient;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Tables the application reads.
pub const TABLE_PATIENTS: &str = "patients";
pub const TABLE_DENTAL_RECORDS: &str = "dental_records";

/// Read surface the application needs from the backend.
///
/// Rows cross the seam as raw JSON values; the typed facade decodes them.
/// Failures travel in the envelope's `error` field; implementations never
/// panic and never return a transport error directly.
#[async_trait]
pub trait DataClient: Send + Sync {
  /// Every row of `table`.
  async fn fetch_all(&self, table: &str) -> Envelope<Vec<Value>>;

  /// The row of `table` with the given id, if any.
  async fn fetch_one(&self, table: &str, id: &str) -> Envelope<Option<Value>>;

  /// Rows of `table` where `column` equals `value`.
  async fn fetch_where(&self, table: &str, column: &str, value: &str) -> Envelope<Vec<Value>>;

  /// The authenticated account, as `{data: {user}}`.
  async fn current_user(&self) -> Envelope<UserPayload>;

  /// The bearer session, as `{data: {session}}`.
  async fn current_session(&self) -> Envelope<SessionPayload>;
}

struct HandleState {
  active: Arc<dyn DataClient>,
  /// The live client, retained while a demo client is installed.
  live: Arc<dyn DataClient>,
  demo_installed: bool,
}

/// The single mutable cell holding the active client.
///
/// Cheap to clone; clones share the cell. Swapping is expected to happen only
/// at well-defined transition points (login, explicit demo exit), never
/// racing an in-flight query.
#[derive(Clone)]
pub struct ClientHandle {
  inner: Arc<RwLock<HandleState>>,
}

impl ClientHandle {
  /// Wrap the live client; the handle starts out serving it.
  pub fn new(live: Arc<dyn DataClient>) -> Self {
    Self {
      inner: Arc::new(RwLock::new(HandleState {
        active: Arc::clone(&live),
        live,
        demo_installed: false,
      })),
    }
  }

  fn state(&self) -> RwLockReadGuard<'_, HandleState> {
    self.inner.read().unwrap_or_else(|e| e.into_inner())
  }

  fn state_mut(&self) -> RwLockWriteGuard<'_, HandleState> {
    self.inner.write().unwrap_or_else(|e| e.into_inner())
  }

  /// The client to use for the next call.
  pub fn client(&self) -> Arc<dyn DataClient> {
    Arc::clone(&self.state().active)
  }

  /// Route subsequent calls to `demo`.
  ///
  /// Idempotent: installing while already installed replaces the demo client
  /// but keeps the retained live client, so a second install can never
  /// capture the demo client as "the live one".
  pub fn install_demo(&self, demo: Arc<dyn DataClient>) {
    let mut state = self.state_mut();
    state.active = demo;
    state.demo_installed = true;
  }

  /// Put the live client back. Safe no-op when no demo client is installed.
  pub fn restore(&self) {
    let mut state = self.state_mut();
    if !state.demo_installed {
      return;
    }

    state.active = Arc::clone(&state.live);
    state.demo_installed = false;
  }

  pub fn is_demo_installed(&self) -> bool {
    self.state().demo_installed
  }
}
