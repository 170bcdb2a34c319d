//! Deterministic sample data served while demo mode is active.
//!
//! The set is small and pre-curated: six patients and a visit history that
//! mixes completed work with scheduled appointments. Dates are computed
//! relative to now so the data always looks recent, whichever day the demo
//! is opened. Every record references a patient in the set, and every row is
//! owned by the fixed demo account.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::backend::types::{AuthSession, AuthUser, DentalRecord, Gender, OperationKind, Patient};

/// Account identity every fixture row is owned by.
pub const DEMO_USER_ID: &str = "d3a1c2e4-5b6f-4a78-9c01-5eedda7a0001";
pub const DEMO_USER_EMAIL: &str = "demo@chairside.app";

const DEMO_ACCESS_TOKEN: &str = "demo-access-token";

fn days_ago(days: i64) -> NaiveDate {
  (Utc::now() - Duration::days(days)).date_naive()
}

fn days_ahead(days: i64) -> NaiveDate {
  (Utc::now() + Duration::days(days)).date_naive()
}

fn created_days_ago(days: i64) -> DateTime<Utc> {
  Utc::now() - Duration::days(days)
}

fn birth_date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

#[allow(clippy::too_many_arguments)]
fn patient(
  id: &str,
  first_name: &str,
  last_name: &str,
  date_of_birth: NaiveDate,
  gender: Gender,
  phone: &str,
  email: &str,
  medical_history: &[&str],
  registered_days_ago: i64,
) -> Patient {
  Patient {
    id: id.to_string(),
    first_name: first_name.to_string(),
    last_name: last_name.to_string(),
    date_of_birth,
    gender,
    phone: Some(phone.to_string()),
    email: Some(email.to_string()),
    medical_history: medical_history.iter().map(|s| s.to_string()).collect(),
    user_id: DEMO_USER_ID.to_string(),
    created_at: created_days_ago(registered_days_ago),
  }
}

/// A completed visit: clinical fields filled in, no time slot.
fn visit(
  id: &str,
  patient_id: &str,
  days_past: i64,
  kind: OperationKind,
  diagnosis: &str,
  treatment: &str,
  notes: &str,
) -> DentalRecord {
  DentalRecord {
    id: id.to_string(),
    patient_id: patient_id.to_string(),
    visit_date: days_ago(days_past),
    appointment_time: None,
    diagnosis: Some(diagnosis.to_string()),
    treatment: Some(treatment.to_string()),
    notes: Some(notes.to_string()),
    operation_kind: kind,
    created_at: created_days_ago(days_past),
  }
}

/// A scheduled appointment: time slot set, clinical fields still empty.
fn appointment(
  id: &str,
  patient_id: &str,
  days_future: i64,
  time: &str,
  kind: OperationKind,
) -> DentalRecord {
  DentalRecord {
    id: id.to_string(),
    patient_id: patient_id.to_string(),
    visit_date: days_ahead(days_future),
    appointment_time: Some(time.to_string()),
    diagnosis: None,
    treatment: None,
    notes: None,
    operation_kind: kind,
    created_at: created_days_ago(1),
  }
}

const P1: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d401";
const P2: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d402";
const P3: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d403";
const P4: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d404";
const P5: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d405";
const P6: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d406";

/// The six demo patients.
pub fn demo_patients() -> Vec<Patient> {
  vec![
    patient(
      P1,
      "Emma",
      "Johansson",
      birth_date(1988, 3, 14),
      Gender::Female,
      "+46 70 123 45 01",
      "emma.johansson@example.com",
      &["Penicillin allergy"],
      90,
    ),
    patient(
      P2,
      "Lucas",
      "Meyer",
      birth_date(1975, 11, 2),
      Gender::Male,
      "+46 70 123 45 02",
      "lucas.meyer@example.com",
      &["Type 2 diabetes", "Hypertension"],
      75,
    ),
    patient(
      P3,
      "Sofia",
      "Lindqvist",
      birth_date(1992, 7, 21),
      Gender::Female,
      "+46 70 123 45 03",
      "sofia.lindqvist@example.com",
      &[],
      60,
    ),
    patient(
      P4,
      "Daniel",
      "Novak",
      birth_date(1969, 1, 30),
      Gender::Male,
      "+46 70 123 45 04",
      "daniel.novak@example.com",
      &["Anticoagulant therapy (warfarin)"],
      45,
    ),
    patient(
      P5,
      "Amira",
      "Haddad",
      birth_date(2001, 9, 5),
      Gender::Female,
      "+46 70 123 45 05",
      "amira.haddad@example.com",
      &["Latex allergy"],
      30,
    ),
    patient(
      P6,
      "Henrik",
      "Olsen",
      birth_date(1958, 5, 17),
      Gender::Male,
      "+46 70 123 45 06",
      "henrik.olsen@example.com",
      &["Pacemaker", "Smoker"],
      14,
    ),
  ]
}

/// Visit history plus upcoming appointments for the demo patients.
pub fn demo_records() -> Vec<DentalRecord> {
  vec![
    visit(
      "7b1e8d00-0000-4000-8000-000000000001",
      P1,
      62,
      OperationKind::Checkup,
      "Healthy dentition, mild plaque buildup",
      "Routine examination, oral hygiene instruction",
      "Recommended a softer brush; recall in six months",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000002",
      P1,
      20,
      OperationKind::Cleaning,
      "Supragingival calculus, lower anteriors",
      "Scaling and polishing",
      "Gingiva slightly inflamed around 31-41, advised flossing",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000003",
      P2,
      48,
      OperationKind::Filling,
      "Occlusal caries, tooth 36",
      "Composite restoration",
      "Checked glycemic status before anesthesia; uneventful",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000004",
      P2,
      12,
      OperationKind::Checkup,
      "Restoration 36 intact, no new lesions",
      "Examination and bitewing radiographs",
      "Blood pressure noted at 142/90, advised follow-up with GP",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000005",
      P3,
      33,
      OperationKind::Whitening,
      "Extrinsic staining, upper anteriors",
      "In-office whitening, one session",
      "Shade improved two steps, mild transient sensitivity",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000006",
      P4,
      55,
      OperationKind::Extraction,
      "Vertical root fracture, tooth 25",
      "Simple extraction under local anesthesia",
      "INR checked day before (2.3), hemostasis with sutures",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000007",
      P4,
      27,
      OperationKind::Checkup,
      "Socket 25 healing well",
      "Post-extraction review, sutures removed",
      "Discussed implant options for the gap",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000008",
      P5,
      18,
      OperationKind::RootCanal,
      "Irreversible pulpitis, tooth 46",
      "Root canal treatment, two canals obturated",
      "Nitrile gloves and latex-free dam used; asymptomatic at dismissal",
    ),
    visit(
      "7b1e8d00-0000-4000-8000-000000000009",
      P6,
      40,
      OperationKind::Cleaning,
      "Generalized calculus, staining from smoking",
      "Full-mouth scaling, air polishing",
      "Smoking cessation advice given; no ultrasonic scaler (pacemaker)",
    ),
    appointment(
      "7b1e8d00-0000-4000-8000-00000000000a",
      P1,
      9,
      "09:30",
      OperationKind::Checkup,
    ),
    appointment(
      "7b1e8d00-0000-4000-8000-00000000000b",
      P3,
      4,
      "11:00",
      OperationKind::Checkup,
    ),
    appointment(
      "7b1e8d00-0000-4000-8000-00000000000c",
      P4,
      15,
      "14:15",
      OperationKind::Crown,
    ),
    appointment(
      "7b1e8d00-0000-4000-8000-00000000000d",
      P5,
      6,
      "10:45",
      OperationKind::Filling,
    ),
    appointment(
      "7b1e8d00-0000-4000-8000-00000000000e",
      P6,
      21,
      "08:30",
      OperationKind::Extraction,
    ),
  ]
}

/// Records belonging to one patient.
pub fn records_for_patient(patient_id: &str) -> Vec<DentalRecord> {
  demo_records()
    .into_iter()
    .filter(|record| record.patient_id == patient_id)
    .collect()
}

/// The synthetic identity served while demo mode is active.
pub fn demo_user() -> AuthUser {
  AuthUser {
    id: DEMO_USER_ID.to_string(),
    email: DEMO_USER_EMAIL.to_string(),
  }
}

/// The synthetic session served while demo mode is active.
pub fn demo_session() -> AuthSession {
  AuthSession {
    access_token: DEMO_ACCESS_TOKEN.to_string(),
    token_type: "bearer".to_string(),
    user: demo_user(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_six_patients_with_unique_ids() {
    let patients = demo_patients();
    assert_eq!(patients.len(), 6);

    let ids: HashSet<&str> = patients.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), patients.len());
  }

  #[test]
  fn test_every_record_references_a_patient() {
    let ids: HashSet<String> = demo_patients().into_iter().map(|p| p.id).collect();

    for record in demo_records() {
      assert!(
        ids.contains(&record.patient_id),
        "record {} references missing patient {}",
        record.id,
        record.patient_id
      );
    }
  }

  #[test]
  fn test_record_ids_are_unique() {
    let records = demo_records();
    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), records.len());
  }

  #[test]
  fn test_appointments_have_time_and_no_clinical_fields() {
    let today = Utc::now().date_naive();

    for record in demo_records() {
      if record.is_appointment() {
        assert!(record.visit_date > today, "appointment {} not in the future", record.id);
        assert!(record.diagnosis.is_none());
        assert!(record.treatment.is_none());
        assert!(record.notes.is_none());
      } else {
        assert!(record.visit_date < today, "visit {} not in the past", record.id);
        assert!(record.diagnosis.is_some());
        assert!(record.treatment.is_some());
      }
    }
  }

  #[test]
  fn test_every_patient_has_records() {
    for patient in demo_patients() {
      assert!(
        !records_for_patient(&patient.id).is_empty(),
        "patient {} has no records",
        patient.id
      );
    }
  }

  #[test]
  fn test_fixtures_owned_by_demo_user() {
    assert!(demo_patients().iter().all(|p| p.user_id == DEMO_USER_ID));
    assert_eq!(demo_user().id, DEMO_USER_ID);
    assert_eq!(demo_session().user.id, DEMO_USER_ID);
  }

  #[test]
  fn test_patients_look_recently_registered() {
    let cutoff = Utc::now() - Duration::days(120);
    assert!(demo_patients().iter().all(|p| p.created_at > cutoff));
  }
}
