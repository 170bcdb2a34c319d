//! Live REST implementation of [`DataClient`].
//!
//! Speaks the hosted service's PostgREST-style read dialect:
//! `GET /rest/v1/{table}?select=*&{column}=eq.{value}` for queries and
//! `GET /auth/v1/user` for the identity accessor. Every failure (transport,
//! status, or decode) is folded into the envelope's `error` field, matching
//! the service's own errors-in-band convention.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;

use super::envelope::{Envelope, SessionPayload, UserPayload};
use super::types::{AuthSession, AuthUser};
use super::DataClient;

/// REST client for the hosted backend.
#[derive(Clone)]
pub struct RestClient {
  http: reqwest::Client,
  base: Url,
  api_key: String,
}

impl RestClient {
  pub fn new(config: &Config) -> Result<Self> {
    let api_key = Config::get_api_key()?;

    let base = Url::parse(&config.backend.url)
      .map_err(|e| eyre!("Invalid backend url {}: {}", config.backend.url, e))?;

    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
      .map_err(|e| eyre!("Invalid API key: {}", e))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    let mut apikey =
      HeaderValue::from_str(&api_key).map_err(|e| eyre!("Invalid API key: {}", e))?;
    apikey.set_sensitive(true);
    headers.insert("apikey", apikey);

    let http = reqwest::Client::builder()
      .default_headers(headers)
      .build()
      .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

    Ok(Self {
      http,
      base,
      api_key,
    })
  }

  fn table_url(&self, table: &str) -> Result<Url> {
    let mut url = self
      .base
      .join(&format!("rest/v1/{}", table))
      .map_err(|e| eyre!("Invalid table path {}: {}", table, e))?;

    url.query_pairs_mut().append_pair("select", "*");

    Ok(url)
  }

  async fn get_rows(&self, url: Url) -> Result<Vec<Value>> {
    debug!("GET {}", url.path());

    let response = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Request failed: {}", e))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(eyre!("Backend returned {}: {}", status, body));
    }

    response
      .json::<Vec<Value>>()
      .await
      .map_err(|e| eyre!("Failed to decode rows: {}", e))
  }

  async fn rows_where(&self, table: &str, column: &str, value: &str) -> Result<Vec<Value>> {
    let mut url = self.table_url(table)?;
    url
      .query_pairs_mut()
      .append_pair(column, &format!("eq.{}", value));

    self.get_rows(url).await
  }
}

#[async_trait]
impl DataClient for RestClient {
  async fn fetch_all(&self, table: &str) -> Envelope<Vec<Value>> {
    let url = match self.table_url(table) {
      Ok(url) => url,
      Err(e) => return Envelope::err(e.to_string()),
    };

    match self.get_rows(url).await {
      Ok(rows) => Envelope::ok(rows),
      Err(e) => Envelope::err(e.to_string()),
    }
  }

  async fn fetch_one(&self, table: &str, id: &str) -> Envelope<Option<Value>> {
    match self.rows_where(table, "id", id).await {
      Ok(rows) => Envelope::ok(rows.into_iter().next()),
      Err(e) => Envelope::err(e.to_string()),
    }
  }

  async fn fetch_where(&self, table: &str, column: &str, value: &str) -> Envelope<Vec<Value>> {
    match self.rows_where(table, column, value).await {
      Ok(rows) => Envelope::ok(rows),
      Err(e) => Envelope::err(e.to_string()),
    }
  }

  async fn current_user(&self) -> Envelope<UserPayload> {
    let url = match self.base.join("auth/v1/user") {
      Ok(url) => url,
      Err(e) => return Envelope::err(format!("Invalid auth path: {}", e)),
    };

    let response = match self.http.get(url).send().await {
      Ok(response) => response,
      Err(e) => return Envelope::err(format!("Request failed: {}", e)),
    };

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Envelope::err(format!("Backend returned {}: {}", status, body));
    }

    match response.json::<AuthUser>().await {
      Ok(user) => Envelope::ok(UserPayload { user: Some(user) }),
      Err(e) => Envelope::err(format!("Failed to decode user: {}", e)),
    }
  }

  async fn current_session(&self) -> Envelope<SessionPayload> {
    // The session pairs the configured bearer token with whoever it
    // authenticates as.
    let user_envelope = self.current_user().await;

    if let Some(e) = user_envelope.error {
      return Envelope {
        data: None,
        error: Some(e),
      };
    }

    let session = user_envelope
      .data
      .and_then(|payload| payload.user)
      .map(|user| AuthSession {
        access_token: self.api_key.clone(),
        token_type: "bearer".to_string(),
        user,
      });

    Envelope::ok(SessionPayload { session })
  }
}
