//! Core error types for astroschedule-core.
//!
//! Every failure the library raises is a variant of one of the enums below.
//! Rejected additions are not errors; they are reported through
//! [`AddResult::Rejected`](crate::schedule::AddResult::Rejected).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for astroschedule-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Schedule mutation errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning raw input into a [`Task`](crate::task::Task).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Description is empty or whitespace only
    #[error("Task description must not be empty")]
    EmptyDescription,

    /// Time text is not a 24-hour HH:MM value
    #[error("Invalid time format '{value}': expected 24-hour HH:MM")]
    InvalidTimeFormat { value: String },

    /// Priority text is not one of HIGH, MEDIUM, LOW
    #[error("Invalid priority '{value}': expected High, Medium or Low")]
    InvalidPriority { value: String },

    /// Start time is not strictly before end time
    #[error(
        "Invalid interval: start time ({}) must be before end time ({})",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    InvalidInterval {
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },
}

/// Errors raised by [`ScheduleStore`](crate::schedule::ScheduleStore) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// No task matches the description (case-insensitive)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Config directory could not be created
    #[error("Failed to access config directory: {0}")]
    DataDir(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::EmptyDescription.into();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyDescription)));
    }

    #[test]
    fn task_not_found_message_names_the_task() {
        let err = ScheduleError::TaskNotFound("Standup".to_string());
        assert_eq!(err.to_string(), "Task not found: Standup");
    }

    #[test]
    fn invalid_interval_message_shows_times() {
        let t = chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let err = ValidationError::InvalidInterval { start: t, end: t };
        assert_eq!(
            err.to_string(),
            "Invalid interval: start time (10:00) must be before end time (10:00)"
        );
    }
}
