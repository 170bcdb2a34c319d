//! The backend's `{data, error}` result envelopes.
//!
//! The hosted service reports query failures in-band through the `error`
//! field rather than failing the transport; both client implementations keep
//! that convention, so the data seam never panics and never surfaces a raw
//! transport error. The typed facade converts a populated `error` into a
//! real error for its callers.

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};

use super::types::{AuthSession, AuthUser};

/// In-band query error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
}

/// `{data, error}` pairing; exactly one side is populated on the paths the
/// application exercises, except that an empty successful result carries
/// `data` with an empty payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
  pub data: Option<T>,
  pub error: Option<ApiError>,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self {
      data: Some(data),
      error: None,
    }
  }

  pub fn err(message: impl Into<String>) -> Self {
    Self {
      data: None,
      error: Some(ApiError {
        message: message.into(),
        code: None,
      }),
    }
  }

  pub fn is_ok(&self) -> bool {
    self.error.is_none()
  }

  /// Surface the in-band error as a real error for typed callers.
  pub fn into_result(self) -> Result<Option<T>> {
    match self.error {
      Some(e) => Err(eyre!("backend error: {}", e.message)),
      None => Ok(self.data),
    }
  }
}

impl<T> Envelope<Vec<T>> {
  /// Successful empty result; what queries against unknown tables resolve to.
  pub fn empty() -> Self {
    Self::ok(Vec::new())
  }
}

/// `{data: {user}}` nesting returned by the "current user" accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
  pub user: Option<AuthUser>,
}

/// `{data: {session}}` nesting returned by the "current session" accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
  pub session: Option<AuthSession>,
}
