//! Derived statistics and reference-list types.

use serde::{Deserialize, Serialize};

/// Dashboard counters derived from the collections.
///
/// `new_patients` and `recent_consultations` count records falling in the
/// trailing 30-day window, inclusive at both bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClinicStats {
    pub total_patients: usize,
    pub new_patients: usize,
    pub total_consultations: usize,
    pub recent_consultations: usize,
}

/// One row of the seeded common-remedy / common-symptom reference lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageCount {
    pub name: String,
    pub count: u32,
}
