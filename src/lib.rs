//! Notification summarization, urgency classification and snooze storage.
//!
//! Summaries and classifications are best effort: when the remote
//! text-generation backend is disabled, misconfigured or failing, results come
//! from deterministic heuristics and nothing signals which path answered.

pub mod api;
pub mod config;
pub mod error;
pub mod intelligence;
pub mod metrics;
pub mod snoozes;

pub use crate::config::Config;
pub use error::{Result, SnoozeError};
pub use intelligence::{ClassificationResult, IntelligenceConfig, TextIntelligence, UrgencyLabel};
