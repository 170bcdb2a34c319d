//! Typed facade over the client seam with transparent read caching.

use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::cache::{get_cached_or_fetch, CacheStore, QueryKey};
use crate::demo::DemoMode;

use super::cache_keys::ClinicQueryKey;
use super::types::{AuthSession, AuthUser, DentalRecord, Patient};
use super::{ClientHandle, TABLE_DENTAL_RECORDS, TABLE_PATIENTS};

/// The client the UI talks to.
///
/// Reads route through the TTL cache unless demo mode is active or the call
/// is an interactive search; both want fresh, deterministic data on every
/// keystroke. The cache being on or off never changes outcomes, only latency
/// and call volume.
#[derive(Clone)]
pub struct CachedClient {
  handle: ClientHandle,
  cache: CacheStore,
  demo: DemoMode,
  ttl: Duration,
  cache_enabled: bool,
}

impl CachedClient {
  pub fn new(handle: ClientHandle, cache: CacheStore, demo: DemoMode) -> Self {
    let ttl = cache.default_ttl();
    Self {
      handle,
      cache,
      demo,
      ttl,
      cache_enabled: true,
    }
  }

  /// Override the entry lifetime used for cached reads.
  pub fn with_ttl(mut self, ttl: Duration) -> Self {
    self.ttl = ttl;
    self
  }

  /// Route every read straight to the client.
  pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
    self.cache_enabled = enabled;
    self
  }

  fn use_cache(&self) -> bool {
    self.cache_enabled && !self.demo.is_active()
  }

  /// Full patient roster.
  pub async fn list_patients(&self) -> Result<Vec<Patient>> {
    if !self.use_cache() {
      return self.fetch_patients().await;
    }

    let key = ClinicQueryKey::Patients.cache_hash();
    get_cached_or_fetch(&self.cache, &key, self.ttl, || self.fetch_patients()).await
  }

  /// One patient chart by id.
  pub async fn get_patient(&self, id: &str) -> Result<Option<Patient>> {
    if !self.use_cache() {
      return self.fetch_patient(id).await;
    }

    let key = ClinicQueryKey::PatientDetail { id: id.to_string() }.cache_hash();
    get_cached_or_fetch(&self.cache, &key, self.ttl, || self.fetch_patient(id)).await
  }

  /// Visit history and scheduled work for one patient.
  pub async fn records_for_patient(&self, patient_id: &str) -> Result<Vec<DentalRecord>> {
    if !self.use_cache() {
      return self.fetch_records(patient_id).await;
    }

    let key = ClinicQueryKey::RecordsForPatient {
      patient_id: patient_id.to_string(),
    }
    .cache_hash();
    get_cached_or_fetch(&self.cache, &key, self.ttl, || self.fetch_records(patient_id)).await
  }

  /// Upcoming scheduled entries across all patients, soonest first.
  pub async fn appointments(&self) -> Result<Vec<DentalRecord>> {
    if !self.use_cache() {
      return self.fetch_appointments().await;
    }

    let key = ClinicQueryKey::Appointments.cache_hash();
    get_cached_or_fetch(&self.cache, &key, self.ttl, || self.fetch_appointments()).await
  }

  /// Patients whose name matches `term`.
  ///
  /// Never cached: search runs on every keystroke and must always see the
  /// current roster.
  pub async fn search_patients(&self, term: &str) -> Result<Vec<Patient>> {
    let patients = self.fetch_patients().await?;

    Ok(
      patients
        .into_iter()
        .filter(|p| p.matches(term))
        .collect(),
    )
  }

  /// The authenticated account. Never cached.
  pub async fn current_user(&self) -> Result<Option<AuthUser>> {
    let envelope = self.handle.client().current_user().await;
    Ok(envelope.into_result()?.and_then(|payload| payload.user))
  }

  /// The bearer session. Never cached.
  pub async fn current_session(&self) -> Result<Option<AuthSession>> {
    let envelope = self.handle.client().current_session().await;
    Ok(envelope.into_result()?.and_then(|payload| payload.session))
  }

  /// Drop the cached roster; the host calls this after writing a patient.
  pub fn invalidate_patients(&self) {
    self.cache.remove(&ClinicQueryKey::Patients.cache_hash());
  }

  /// Drop one cached patient chart.
  pub fn invalidate_patient(&self, id: &str) {
    self
      .cache
      .remove(&ClinicQueryKey::PatientDetail { id: id.to_string() }.cache_hash());
  }

  /// Drop cached records (and the appointment list) after writing a record.
  ///
  /// Two removals, not a transaction; a reader between them may see one
  /// list refreshed and the other not.
  pub fn invalidate_records_for(&self, patient_id: &str) {
    self.cache.remove(
      &ClinicQueryKey::RecordsForPatient {
        patient_id: patient_id.to_string(),
      }
      .cache_hash(),
    );
    self.cache.remove(&ClinicQueryKey::Appointments.cache_hash());
  }

  /// Drop every cached query.
  pub fn invalidate_all(&self) {
    self.cache.clear();
  }

  async fn fetch_patients(&self) -> Result<Vec<Patient>> {
    let envelope = self.handle.client().fetch_all(TABLE_PATIENTS).await;
    decode_rows(envelope.into_result()?.unwrap_or_default())
  }

  async fn fetch_patient(&self, id: &str) -> Result<Option<Patient>> {
    let envelope = self.handle.client().fetch_one(TABLE_PATIENTS, id).await;

    match envelope.into_result()?.flatten() {
      Some(row) => Ok(Some(decode_row(row)?)),
      None => Ok(None),
    }
  }

  async fn fetch_records(&self, patient_id: &str) -> Result<Vec<DentalRecord>> {
    let envelope = self
      .handle
      .client()
      .fetch_where(TABLE_DENTAL_RECORDS, "patient_id", patient_id)
      .await;

    decode_rows(envelope.into_result()?.unwrap_or_default())
  }

  async fn fetch_appointments(&self) -> Result<Vec<DentalRecord>> {
    let envelope = self.handle.client().fetch_all(TABLE_DENTAL_RECORDS).await;
    let mut records: Vec<DentalRecord> = decode_rows(envelope.into_result()?.unwrap_or_default())?;

    records.retain(DentalRecord::is_appointment);
    records.sort_by(|a, b| {
      (a.visit_date, a.appointment_time.as_deref())
        .cmp(&(b.visit_date, b.appointment_time.as_deref()))
    });

    Ok(records)
  }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
  rows.into_iter().map(decode_row).collect()
}

fn decode_row<T: DeserializeOwned>(row: Value) -> Result<T> {
  serde_json::from_value(row).map_err(|e| eyre!("Failed to decode row: {}", e))
}
