//! Clinic Core Library
//!
//! In-memory patient and consultation store for a single-clinic desk.
//!
//! # Architecture
//!
//! ```text
//! UI components ──reads──▶ ┌─────────────────┐
//!                          │  PatientStore   │──▶ summary collaborator
//! UI components ──writes─▶ │  (validation,   │      (string → string)
//!                          │   sole mutation │
//!                          │   path)         │
//!                          └────────┬────────┘
//!                                   │
//!                          ┌────────▼────────┐
//!                          │    Database     │
//!                          │ in-memory SQLite│
//!                          └─────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **The store exclusively owns the collections.** Read operations hand out
//! owned copies; every change goes through a write operation that validates
//! at the boundary and commits atomically. A failed write leaves nothing
//! behind.
//!
//! # Modules
//!
//! - [`db`]: in-memory SQLite layer holding the collections
//! - [`models`]: domain types (Patient, Consultation, Remedy, stats)

pub mod db;
pub mod models;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    ClinicStats, Consultation, ConsultationFields, Gender, Patient, PatientFields, Remedy,
    UsageCount,
};

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::debug;

/// Oldest accepted patient age, in years.
pub const MAX_PATIENT_AGE: u32 = 120;

/// Summary stored when no external summary collaborator is wired in.
const DEFAULT_SUMMARY: &str = "AI-generated summary based on symptoms analysis.";

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl From<db::DbError> for StoreError {
    fn from(e: db::DbError) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        StoreError::Database(format!("Lock poisoned: {}", e))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Summary-generation collaborator: a synchronous symptoms → summary
/// function. Stand-in or real inference service, the store does not care.
pub type Summarizer = dyn Fn(&str) -> String + Send + Sync;

// =========================================================================
// Main API Object
// =========================================================================

/// The sole owner of the patient and consultation collections.
///
/// Construct one per process and hand clones to every consumer; all clones
/// share the same underlying state. There are no ambient globals.
#[derive(Clone)]
pub struct PatientStore {
    db: Arc<Mutex<Database>>,
    summarizer: Arc<Summarizer>,
}

impl PatientStore {
    /// Create an empty store backed by a fresh in-memory database.
    pub fn new() -> StoreResult<Self> {
        Self::with_summarizer(Arc::new(|_: &str| DEFAULT_SUMMARY.to_string()))
    }

    /// Create a store with a custom summary collaborator.
    pub fn with_summarizer(summarizer: Arc<Summarizer>) -> StoreResult<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            summarizer,
        })
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// List all patients, insertion order. The result is an owned copy;
    /// mutating it does not touch the store.
    pub fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let db = self.db.lock()?;
        Ok(db.list_patients()?)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> StoreResult<Patient> {
        let db = self.db.lock()?;
        db.get_patient(id)?
            .ok_or_else(|| StoreError::NotFound(format!("patient {}", id)))
    }

    /// List primary accounts (patients that are not dependents).
    pub fn list_primary_patients(&self) -> StoreResult<Vec<Patient>> {
        let db = self.db.lock()?;
        Ok(db.list_primary_patients()?)
    }

    /// Search patients by name or id, case-insensitive substring match.
    pub fn search_patients(&self, query: &str) -> StoreResult<Vec<Patient>> {
        let db = self.db.lock()?;
        Ok(db.search_patients(query)?)
    }

    /// Add a patient. With `primary_patient_id` set, the new chart becomes a
    /// dependent of that patient and is appended to its `dependents` list in
    /// the same transaction.
    ///
    /// The reference must resolve to an existing patient that is itself a
    /// primary account; anything else fails with [`StoreError::Validation`]
    /// and leaves the store untouched.
    pub fn add_patient(
        &self,
        fields: PatientFields,
        primary_patient_id: Option<&str>,
    ) -> StoreResult<Patient> {
        validate_patient_fields(&fields)?;

        let mut db = self.db.lock()?;

        if let Some(primary_id) = primary_patient_id {
            let primary = db.get_patient(primary_id)?.ok_or_else(|| {
                StoreError::Validation(format!("primary patient {} does not exist", primary_id))
            })?;
            if primary.is_dependent() {
                return Err(StoreError::Validation(format!(
                    "patient {} is itself a dependent and cannot hold dependents",
                    primary_id
                )));
            }
        }

        let now = Utc::now().to_rfc3339();
        let patient = db.create_patient(&fields, primary_patient_id, &now)?;
        debug!(id = %patient.id, dependent = patient.is_dependent(), "patient added");
        Ok(patient)
    }

    /// Replace the mutable attributes of an existing patient (name, age,
    /// gender, contact, alternative contacts, email, address). `id`,
    /// `created_at`, `last_visit` and relational links are preserved.
    pub fn update_patient(&self, id: &str, fields: PatientFields) -> StoreResult<Patient> {
        validate_patient_fields(&fields)?;

        let db = self.db.lock()?;
        if !db.update_patient_fields(id, &fields)? {
            return Err(StoreError::NotFound(format!("patient {}", id)));
        }

        let patient = db
            .get_patient(id)?
            .ok_or_else(|| StoreError::NotFound(format!("patient {}", id)))?;
        debug!(id = %patient.id, "patient updated");
        Ok(patient)
    }

    // =========================================================================
    // Consultation Operations
    // =========================================================================

    /// List all consultations, insertion order.
    pub fn list_consultations(&self) -> StoreResult<Vec<Consultation>> {
        let db = self.db.lock()?;
        Ok(db.list_consultations()?)
    }

    /// List one patient's consultations, insertion order. An unknown
    /// patient id yields an empty list.
    pub fn consultations_for_patient(&self, patient_id: &str) -> StoreResult<Vec<Consultation>> {
        let db = self.db.lock()?;
        Ok(db.list_consultations_for_patient(patient_id)?)
    }

    /// Get a consultation by id.
    pub fn get_consultation(&self, id: &str) -> StoreResult<Consultation> {
        let db = self.db.lock()?;
        db.get_consultation(id)?
            .ok_or_else(|| StoreError::NotFound(format!("consultation {}", id)))
    }

    /// Record a consultation. The id and the stored summary are assigned by
    /// the store; the referenced patient's `last_visit` moves to the
    /// consultation date in the same transaction.
    pub fn add_consultation(&self, fields: ConsultationFields) -> StoreResult<Consultation> {
        validate_consultation_fields(&fields)?;

        let mut db = self.db.lock()?;

        if db.get_patient(&fields.patient_id)?.is_none() {
            return Err(StoreError::Validation(format!(
                "patient {} does not exist",
                fields.patient_id
            )));
        }

        let summary = (self.summarizer)(&fields.symptoms);
        let consultation = db.create_consultation(&fields, Some(summary))?;
        debug!(
            id = %consultation.id,
            patient = %consultation.patient_id,
            remedies = consultation.remedies.len(),
            "consultation recorded"
        );
        Ok(consultation)
    }

    // =========================================================================
    // Reference Data & Statistics
    // =========================================================================

    /// Historical remedy usage tallies (seeded reference list).
    pub fn common_remedies(&self) -> StoreResult<Vec<UsageCount>> {
        let db = self.db.lock()?;
        Ok(db.common_remedies()?)
    }

    /// Historical symptom tallies (seeded reference list).
    pub fn common_symptoms(&self) -> StoreResult<Vec<UsageCount>> {
        let db = self.db.lock()?;
        Ok(db.common_symptoms()?)
    }

    /// Dashboard counters as of the current time.
    pub fn patient_stats(&self) -> StoreResult<ClinicStats> {
        self.patient_stats_at(Utc::now())
    }

    /// Dashboard counters as of an explicit clock. The 30-day window for
    /// `new_patients` / `recent_consultations` is inclusive at both bounds.
    pub fn patient_stats_at(&self, now: DateTime<Utc>) -> StoreResult<ClinicStats> {
        let db = self.db.lock()?;
        Ok(db.clinic_stats(now)?)
    }
}

// =========================================================================
// Write-Boundary Validation
// =========================================================================

fn validate_patient_fields(fields: &PatientFields) -> StoreResult<()> {
    if fields.name.trim().is_empty() {
        return Err(StoreError::Validation("patient name is required".into()));
    }
    if fields.age > MAX_PATIENT_AGE {
        return Err(StoreError::Validation(format!(
            "age {} is out of range (0..={})",
            fields.age, MAX_PATIENT_AGE
        )));
    }
    Ok(())
}

fn validate_consultation_fields(fields: &ConsultationFields) -> StoreResult<()> {
    if DateTime::parse_from_rfc3339(&fields.date).is_err() {
        return Err(StoreError::Validation(format!(
            "date {:?} is not an RFC 3339 timestamp",
            fields.date
        )));
    }
    if fields.symptoms.trim().is_empty() {
        return Err(StoreError::Validation("symptoms are required".into()));
    }
    if fields.remedies.is_empty() {
        return Err(StoreError::Validation(
            "at least one remedy is required".into(),
        ));
    }
    if let Some(remedy) = fields.remedies.iter().find(|r| !r.is_complete()) {
        return Err(StoreError::Validation(format!(
            "remedy {:?} is missing name, potency or dosage",
            remedy.name
        )));
    }
    Ok(())
}
