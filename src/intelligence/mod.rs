//! Notification text intelligence
//!
//! Summarizes notification bodies and scores their urgency:
//! - remote generation through an OpenAI-compatible backend when configured
//! - deterministic offline heuristics otherwise, or whenever the remote call fails

pub mod config;
pub mod engine;
pub mod models;
pub mod offline;
pub mod remote;

pub use self::config::{ConfigResolver, IntelligenceConfig};
pub use engine::TextIntelligence;
pub use models::{ClassificationResult, UrgencyLabel};
pub use remote::{ChatCompletionClient, CompletionBackend, CompletionRequest, RemoteError};
