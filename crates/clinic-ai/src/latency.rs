//! Simulated inference latency.
//!
//! [`AiAssistant`] fronts the engines with async calls that sleep before
//! answering, the way the real service would make the caller wait. Two
//! guarantees the synchronous engines cannot give:
//!
//! - **Cancellation**: dropping the returned future abandons the request,
//!   so a form that goes away while a suggestion is pending never has a
//!   stale result applied to it.
//! - **No overlap**: at most one request per engine is in flight; a second
//!   call while one is pending fails fast with [`AiError::Busy`] instead of
//!   letting two completions race for the same field.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::remedies::{RemedyEngine, RemedySuggestion};
use crate::summary::SummaryEngine;

/// Errors surfaced by the assistant.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("symptoms are required")]
    EmptySymptoms,

    #[error("a request is already in flight")]
    Busy,
}

pub type AiResult<T> = Result<T, AiError>;

/// Default simulated latency for summary generation.
pub const SUMMARY_LATENCY: Duration = Duration::from_millis(1500);

/// Default simulated latency for remedy suggestion.
pub const REMEDY_LATENCY: Duration = Duration::from_millis(2000);

/// Async front end over the stand-in engines.
pub struct AiAssistant {
    summary: Mutex<SummaryEngine>,
    remedies: Mutex<RemedyEngine>,
    summary_latency: Duration,
    remedy_latency: Duration,
}

impl AiAssistant {
    pub fn new() -> Self {
        Self::with_latency(SUMMARY_LATENCY, REMEDY_LATENCY)
    }

    /// Override the simulated delays (tests use short ones).
    pub fn with_latency(summary_latency: Duration, remedy_latency: Duration) -> Self {
        Self {
            summary: Mutex::new(SummaryEngine::new()),
            remedies: Mutex::new(RemedyEngine::new()),
            summary_latency,
            remedy_latency,
        }
    }

    /// Generate a symptom summary after the simulated delay.
    ///
    /// Fails fast with [`AiError::Busy`] while an earlier summary request
    /// is still pending.
    pub async fn summarize(&self, symptoms: &str) -> AiResult<String> {
        if symptoms.trim().is_empty() {
            return Err(AiError::EmptySymptoms);
        }
        let mut engine = self.summary.try_lock().map_err(|_| AiError::Busy)?;
        sleep(self.summary_latency).await;
        Ok(engine.summarize(symptoms))
    }

    /// Suggest remedies after the simulated delay.
    ///
    /// Fails fast with [`AiError::Busy`] while an earlier suggestion
    /// request is still pending.
    pub async fn suggest_remedies(&self, symptoms: &str) -> AiResult<Vec<RemedySuggestion>> {
        if symptoms.trim().is_empty() {
            return Err(AiError::EmptySymptoms);
        }
        let mut engine = self.remedies.try_lock().map_err(|_| AiError::Busy)?;
        sleep(self.remedy_latency).await;
        Ok(engine.suggest(symptoms))
    }
}

impl Default for AiAssistant {
    fn default() -> Self {
        Self::new()
    }
}
