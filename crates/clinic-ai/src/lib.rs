//! AI stand-in collaborators for the clinic desk.
//!
//! This crate simulates the inference service behind the "Summarize" and
//! "AI Suggest" actions: deterministic keyword matching over fixed
//! vocabularies, dressed up with randomly chosen qualifier words. The
//! contract kept stable for an eventual real service is a synchronous
//! symptoms-in, result-out function, with latency simulated at the call
//! site by [`latency::AiAssistant`].

pub mod latency;
pub mod remedies;
pub mod summary;

pub use latency::*;
pub use remedies::*;
pub use summary::*;
