//! In-memory [`DataClient`] serving the demo fixtures.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::backend::{
  DataClient, Envelope, SessionPayload, UserPayload, TABLE_DENTAL_RECORDS, TABLE_PATIENTS,
};

use super::fixtures;

/// Serves every query from the fixture set without touching the network.
///
/// Filtering is intentionally coarse: the fixture tables are small and
/// pre-curated, so a filter on a column the rows don't carry falls back to
/// the full table instead of failing the query. Unknown tables resolve to an
/// empty successful envelope; errors stay in-band here exactly as they do
/// on the live client.
#[derive(Debug, Default, Clone)]
pub struct DemoClient;

impl DemoClient {
  pub fn new() -> Self {
    Self
  }

  fn rows(table: &str) -> Vec<Value> {
    match table {
      TABLE_PATIENTS => to_rows(&fixtures::demo_patients()),
      TABLE_DENTAL_RECORDS => to_rows(&fixtures::demo_records()),
      other => {
        debug!("demo query for unknown table {:?}", other);
        Vec::new()
      }
    }
  }
}

fn to_rows<T: Serialize>(items: &[T]) -> Vec<Value> {
  items
    .iter()
    .filter_map(|item| serde_json::to_value(item).ok())
    .collect()
}

#[async_trait]
impl DataClient for DemoClient {
  async fn fetch_all(&self, table: &str) -> Envelope<Vec<Value>> {
    Envelope::ok(Self::rows(table))
  }

  async fn fetch_one(&self, table: &str, id: &str) -> Envelope<Option<Value>> {
    let row = Self::rows(table)
      .into_iter()
      .find(|row| row.get("id").and_then(Value::as_str) == Some(id));

    Envelope::ok(row)
  }

  async fn fetch_where(&self, table: &str, column: &str, value: &str) -> Envelope<Vec<Value>> {
    let rows = Self::rows(table);

    // A column the rows don't carry means the filter can't apply; serve the
    // whole fixture table.
    if !rows.iter().any(|row| row.get(column).is_some()) {
      return Envelope::ok(rows);
    }

    let filtered = rows
      .into_iter()
      .filter(|row| row.get(column).and_then(Value::as_str) == Some(value))
      .collect();

    Envelope::ok(filtered)
  }

  async fn current_user(&self) -> Envelope<UserPayload> {
    Envelope::ok(UserPayload {
      user: Some(fixtures::demo_user()),
    })
  }

  async fn current_session(&self) -> Envelope<SessionPayload> {
    Envelope::ok(SessionPayload {
      session: Some(fixtures::demo_session()),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_patients_table_resolves_full_fixture_set() {
    let envelope = DemoClient::new().fetch_all(TABLE_PATIENTS).await;

    assert!(envelope.is_ok());
    assert_eq!(envelope.data.unwrap().len(), 6);
  }

  #[tokio::test]
  async fn test_unknown_table_resolves_empty_success() {
    let envelope = DemoClient::new().fetch_all("invoices").await;

    assert!(envelope.is_ok());
    assert_eq!(envelope.data, Some(Vec::new()));
  }

  #[tokio::test]
  async fn test_fetch_one_by_id() {
    let client = DemoClient::new();
    let first_id = fixtures::demo_patients()[0].id.clone();

    let envelope = client.fetch_one(TABLE_PATIENTS, &first_id).await;
    let row = envelope.data.unwrap().unwrap();
    assert_eq!(row["id"], first_id.as_str());

    let missing = client.fetch_one(TABLE_PATIENTS, "no-such-id").await;
    assert!(missing.is_ok());
    assert_eq!(missing.data, Some(None));
  }

  #[tokio::test]
  async fn test_fetch_where_filters_on_patient_id() {
    let client = DemoClient::new();
    let patient_id = fixtures::demo_patients()[0].id.clone();

    let envelope = client
      .fetch_where(TABLE_DENTAL_RECORDS, "patient_id", &patient_id)
      .await;

    let rows = envelope.data.unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r["patient_id"] == patient_id.as_str()));
  }

  #[tokio::test]
  async fn test_fetch_where_unknown_column_serves_full_table() {
    let envelope = DemoClient::new()
      .fetch_where(TABLE_PATIENTS, "insurance_no", "x")
      .await;

    assert_eq!(envelope.data.unwrap().len(), 6);
  }

  #[tokio::test]
  async fn test_auth_accessors_return_synthetic_identity() {
    let client = DemoClient::new();

    let user = client.current_user().await;
    assert_eq!(
      user.data.unwrap().user.unwrap().id,
      fixtures::DEMO_USER_ID
    );

    let session = client.current_session().await;
    let session = session.data.unwrap().session.unwrap();
    assert_eq!(session.token_type, "bearer");
    assert_eq!(session.user.email, fixtures::DEMO_USER_EMAIL);
  }
}
