//! Error types for calmly.

use thiserror::Error;

/// Errors that can occur in calmly operations.
#[derive(Error, Debug)]
pub enum CalmlyError {
    #[error("Calendar access not granted: {0}")]
    AccessDenied(String),

    #[error("Invalid date: {0}. Use YYYY-MM-DD format.")]
    InvalidDate(String),

    #[error("Invalid date/time: {0}. Use YYYY-MM-DD and HH:MM.")]
    InvalidDateTime(String),

    #[error("Invalid time: {0}. Use HH:MM (24-hour).")]
    InvalidTime(String),

    #[error("Calendar '{0}' not found. Run 'calmly list' to see available calendars.")]
    CalendarNotFound(String),

    #[error("Event must end after it starts ({start} → {end})")]
    NonPositiveDuration { start: String, end: String },

    #[error("Failed to create event: {0}")]
    StoreCreateFailed(String),

    #[error("Failed to delete event: {0}")]
    StoreRemoveFailed(String),

    #[error("No event '{title}' found on {date} in {calendar}")]
    NoMatchFound {
        title: String,
        date: String,
        calendar: String,
    },

    #[error("Failed to delete any of {attempted} events titled '{title}'")]
    DeleteFailed { title: String, attempted: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calmly operations.
pub type CalmlyResult<T> = Result<T, CalmlyError>;
