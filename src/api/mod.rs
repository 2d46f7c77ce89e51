//! HTTP API for summarization, classification and snooze storage

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::{IntelligenceState, USE_REMOTE_HEADER};
pub use models::{ApiError, ClassifyResponse, SummaryResponse, TextRequest};
pub use routes::{build_router, init_router};
