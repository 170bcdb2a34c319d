//! Domain types: patients, dental records, and the auth identity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Patient gender as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Female,
  Male,
  Other,
}

/// Kind of dental work a record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
  Checkup,
  Cleaning,
  Filling,
  Extraction,
  RootCanal,
  Crown,
  Whitening,
}

/// A patient chart row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
  pub id: String,
  pub first_name: String,
  pub last_name: String,
  pub date_of_birth: NaiveDate,
  pub gender: Gender,
  pub phone: Option<String>,
  pub email: Option<String>,
  /// Free-text conditions and allergies, one entry per line in the chart.
  #[serde(default)]
  pub medical_history: Vec<String>,
  /// Owning practitioner account.
  pub user_id: String,
  pub created_at: DateTime<Utc>,
}

impl Patient {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Case-insensitive match against the full name, so a term may span both
  /// name fields. An empty term matches everything.
  pub fn matches(&self, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
      return true;
    }

    self.full_name().to_lowercase().contains(&term)
  }
}

/// A visit note or a scheduled appointment; one row per encounter.
///
/// Completed visits carry the clinical fields and no time slot. Scheduled
/// entries carry a time slot and null clinical fields until the visit
/// happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DentalRecord {
  pub id: String,
  pub patient_id: String,
  pub visit_date: NaiveDate,
  /// "HH:MM"; set only for scheduled entries.
  pub appointment_time: Option<String>,
  pub diagnosis: Option<String>,
  pub treatment: Option<String>,
  pub notes: Option<String>,
  pub operation_kind: OperationKind,
  pub created_at: DateTime<Utc>,
}

impl DentalRecord {
  /// A record is an appointment iff it carries a time slot.
  pub fn is_appointment(&self) -> bool {
    self.appointment_time.is_some()
  }
}

/// Authenticated account identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
  pub id: String,
  pub email: String,
}

/// Bearer session for the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
  pub access_token: String,
  pub token_type: String,
  pub user: AuthUser,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn patient(first: &str, last: &str) -> Patient {
    Patient {
      id: "p1".to_string(),
      first_name: first.to_string(),
      last_name: last.to_string(),
      date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
      gender: Gender::Other,
      phone: None,
      email: None,
      medical_history: Vec::new(),
      user_id: "u1".to_string(),
      created_at: Utc::now(),
    }
  }

  #[test]
  fn test_patient_matches_is_case_insensitive() {
    let p = patient("Emma", "Johansson");

    assert!(p.matches("emma"));
    assert!(p.matches("JOHAN"));
    assert!(p.matches("  emma  "));
    assert!(p.matches("ma johan"));
    assert!(!p.matches("lucas"));
  }

  #[test]
  fn test_empty_term_matches_everything() {
    assert!(patient("Emma", "Johansson").matches(""));
    assert!(patient("Emma", "Johansson").matches("   "));
  }

  #[test]
  fn test_record_is_appointment_iff_time_present() {
    let mut record = DentalRecord {
      id: "r1".to_string(),
      patient_id: "p1".to_string(),
      visit_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
      appointment_time: Some("09:30".to_string()),
      diagnosis: None,
      treatment: None,
      notes: None,
      operation_kind: OperationKind::Checkup,
      created_at: Utc::now(),
    };

    assert!(record.is_appointment());

    record.appointment_time = None;
    assert!(!record.is_appointment());
  }

  #[test]
  fn test_operation_kind_serializes_snake_case() {
    let json = serde_json::to_string(&OperationKind::RootCanal).unwrap();
    assert_eq!(json, r#""root_canal""#);
  }
}
