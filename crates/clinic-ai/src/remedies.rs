//! Remedy suggestion.
//!
//! Fixed keyword-to-remedy mapping: headache and digestive complaints get
//! two suggestions, anxiety one, and anything unrecognized a single pick
//! from a small general-purpose pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A suggested treatment item, ready to be copied into a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemedySuggestion {
    pub name: String,
    pub potency: String,
    pub dosage: String,
    pub instructions: String,
}

impl RemedySuggestion {
    fn new(name: &str, potency: &str, dosage: &str, instructions: &str) -> Self {
        Self {
            name: name.into(),
            potency: potency.into(),
            dosage: dosage.into(),
            instructions: instructions.into(),
        }
    }
}

/// General-purpose pool used when no keyword matches.
fn default_pool() -> [RemedySuggestion; 3] {
    [
        RemedySuggestion::new(
            "Belladonna",
            "30C",
            "3 pellets",
            "Take 3 times daily for 5 days. Dissolve under tongue.",
        ),
        RemedySuggestion::new(
            "Nux Vomica",
            "6C",
            "5 drops",
            "Take once in the evening for 7 days. Mix in small amount of water.",
        ),
        RemedySuggestion::new(
            "Arnica Montana",
            "200C",
            "1 dose",
            "Take single dose now and repeat in one week if needed.",
        ),
    ]
}

/// Suggests remedies for free-text symptom descriptions.
pub struct RemedyEngine {
    rng: StdRng,
}

impl RemedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed engine, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Suggest remedies for the symptom text.
    pub fn suggest(&mut self, symptoms: &str) -> Vec<RemedySuggestion> {
        let lower = symptoms.to_lowercase();

        if lower.contains("headache") {
            return vec![
                RemedySuggestion::new(
                    "Belladonna",
                    "30C",
                    "3 pellets",
                    "Take 3 times daily for 3 days. Dissolve under tongue.",
                ),
                RemedySuggestion::new(
                    "Bryonia",
                    "6C",
                    "3 pellets",
                    "Take as needed for pain, up to 3 times daily.",
                ),
            ];
        }

        if lower.contains("anxiety") {
            return vec![RemedySuggestion::new(
                "Arsenicum Album",
                "30C",
                "3 pellets",
                "Take twice daily for 7 days.",
            )];
        }

        // "digest" also covers "digestive", "digestion"
        if lower.contains("digest") {
            return vec![
                RemedySuggestion::new(
                    "Nux Vomica",
                    "30C",
                    "3 pellets",
                    "Take before bedtime for 5 days.",
                ),
                RemedySuggestion::new("Lycopodium", "200C", "1 dose", "Take single dose weekly."),
            ];
        }

        let pool = default_pool();
        let pick = self.rng.gen_range(0..pool.len());
        vec![pool[pick].clone()]
    }
}

impl Default for RemedyEngine {
    fn default() -> Self {
        Self::new()
    }
}
