//! Error types for availability computation and boundary validation.

use thiserror::Error;

/// Errors raised when validating store documents or engine parameters.
///
/// The engine itself performs no I/O, so every variant here is a contract
/// violation in the input — there is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    /// Service or appointment duration was zero or negative.
    #[error("duration must be a positive number of minutes (got {0})")]
    InvalidDuration(i64),

    /// A time-of-day string did not parse as 24-hour "HH:MM".
    #[error("invalid time of day {0:?}: expected \"HH:MM\"")]
    InvalidTime(String),

    /// A calendar date string did not parse as "YYYY-MM-DD".
    #[error("invalid calendar date {0:?}: expected \"YYYY-MM-DD\"")]
    InvalidDate(String),

    /// A weekday key in a schedule document was not one of the 7 canonical names.
    #[error("unknown weekday {0:?}")]
    InvalidWeekday(String),

    /// An appointment timestamp did not parse as an ISO-8601 wall-clock datetime.
    #[error("invalid timestamp {0:?}: expected ISO-8601 wall-clock datetime")]
    InvalidTimestamp(String),

    /// A work block whose end is at or before its start.
    #[error("work block {from}..{to} ends at or before it starts")]
    EmptyBlock {
        from: chrono::NaiveTime,
        to: chrono::NaiveTime,
    },
}

/// Convenience alias used throughout agenda-core.
pub type Result<T> = std::result::Result<T, AgendaError>;
