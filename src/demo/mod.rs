//! Demo mode: deterministic fixtures and the lifecycle that serves them.
//!
//! While active, the client seam routes every read to [`DemoClient`] and the
//! auth accessors yield a stable synthetic identity, so the whole UI runs
//! against local sample data without a network or an account.

mod client;
pub mod fixtures;
mod mode;

pub use client::DemoClient;
pub use mode::{
  DemoEntry, DemoExit, DemoMode, DEMO_INITIALIZED_KEY, DEMO_MODE_KEY, DEMO_USER_KEY,
};
