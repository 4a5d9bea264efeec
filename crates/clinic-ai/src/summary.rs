//! Symptom summary generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Symptom keywords the stand-in model recognizes, checked in order; the
/// first hit wins.
const KEYWORDS: &[&str] = &[
    "headache",
    "pain",
    "anxiety",
    "digestive",
    "insomnia",
    "fatigue",
];

const LOCATIONS: &[&str] = &["frontal", "temporal", "abdominal", "joint", "chest"];

const MODIFIERS: &[&str] = &["throbbing", "acute", "chronic", "dull", "sharp", "persistent"];

const CONDITIONS: &[&str] = &["worse with", "improved by", "accompanied by"];

/// Summary used when no keyword matches.
const FALLBACK: &str = "Patient reports multiple symptoms requiring evaluation. ";

const CLOSING: &str = "Recommend monitoring and follow-up.";

/// Generates short symptom summaries from free-text descriptions.
pub struct SummaryEngine {
    rng: StdRng,
}

impl SummaryEngine {
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

    /// Produce a short derived description of the symptom text.
    pub fn summarize(&mut self, symptoms: &str) -> String {
        let lower = symptoms.to_lowercase();
        let mut summary = String::new();

        for keyword in KEYWORDS {
            if lower.contains(keyword) {
                let location = self.pick(LOCATIONS);
                let modifier = self.pick(MODIFIERS);
                let condition = self.pick(CONDITIONS);

                summary.push_str(&format!(
                    "{} {} in {} region, {} various factors. ",
                    modifier, keyword, location, condition
                ));
                break;
            }
        }

        if summary.is_empty() {
            summary.push_str(FALLBACK);
        }

        summary.push_str(CLOSING);
        summary
    }

    fn pick<'a>(&mut self, words: &[&'a str]) -> &'a str {
        words[self.rng.gen_range(0..words.len())]
    }
}

impl Default for SummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}
