//! Consultation and remedy models.

use serde::{Deserialize, Serialize};

/// A prescribed treatment item attached to a consultation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Remedy {
    pub name: String,
    pub potency: String,
    pub dosage: String,
    pub instructions: String,
}

impl Remedy {
    pub fn new(
        name: impl Into<String>,
        potency: impl Into<String>,
        dosage: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            potency: potency.into(),
            dosage: dosage.into(),
            instructions: instructions.into(),
        }
    }

    /// A remedy can be saved once name, potency and dosage are filled in.
    /// Instructions may stay empty.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.potency.trim().is_empty()
            && !self.dosage.trim().is_empty()
    }
}

/// One clinical visit record linked to exactly one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Consultation {
    /// Sequential id, `C` + zero-padded counter (e.g. `C001`)
    pub id: String,
    /// Id of the patient seen (primary or dependent)
    pub patient_id: String,
    /// Visit date (RFC 3339)
    pub date: String,
    /// Symptom description as recorded
    pub symptoms: String,
    /// Generated symptom summary, assigned by the store on save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    /// Prescribed remedies, in prescription order
    pub remedies: Vec<Remedy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Caller-supplied attributes for recording a consultation.
///
/// `id` and `ai_summary` are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsultationFields {
    pub patient_id: String,
    pub date: String,
    pub symptoms: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    pub remedies: Vec<Remedy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
