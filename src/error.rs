//! Error types for the snooze service

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum SnoozeError {
    #[error("Unknown snooze id: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SnoozeError>;
