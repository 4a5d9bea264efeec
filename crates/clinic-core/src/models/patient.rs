//! Patient models.

use serde::{Deserialize, Serialize};

/// Gender recorded on the patient chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Lowercase wire form, as it appears in exported records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// A patient chart: either a primary account or a dependent linked to one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Sequential id, `P` + zero-padded counter (e.g. `P001`)
    pub id: String,
    /// Patient name
    pub name: String,
    /// Age in years (0..=120)
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Primary contact number
    pub contact: String,
    /// Email address
    pub email: String,
    /// Postal address
    pub address: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Date of the most recent consultation (RFC 3339)
    pub last_visit: String,
    /// Primary account holder, set iff this chart is a dependent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_patient_id: Option<String>,
    /// Ids of dependent charts, in the order they were added
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependents: Vec<String>,
    /// Secondary contact numbers, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_contacts: Option<Vec<String>>,
}

impl Patient {
    /// Check if this chart defers to a primary account holder.
    pub fn is_dependent(&self) -> bool {
        self.primary_patient_id.is_some()
    }

    /// Check if any dependent charts link back to this one.
    pub fn has_dependents(&self) -> bool {
        !self.dependents.is_empty()
    }
}

/// Caller-supplied attributes for creating or updating a patient.
///
/// Identity fields (`id`, `created_at`) and relational links are never part
/// of this set; the store assigns and preserves them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientFields {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub email: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_contacts: Option<Vec<String>>,
}

impl PatientFields {
    /// Fields with the required attributes set and the rest blank.
    pub fn new(name: impl Into<String>, age: u32, gender: Gender) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            contact: String::new(),
            email: String::new(),
            address: String::new(),
            alternative_contacts: None,
        }
    }
}
