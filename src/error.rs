//! Error types for timetable construction and I/O.
//!
//! Infeasibility is not an error: a search that exhausts every branch
//! reports [`SearchOutcome::NoSolution`](crate::solver::SearchOutcome).
//! The variants here are configuration failures raised before the
//! routine is touched.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while building or loading a timetabling problem.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A time-of-day string could not be parsed.
    #[error("invalid time '{value}': expected HH, HH:MM or HH:MM:SS")]
    InvalidTime { value: String },

    /// A day number outside 0..=6.
    #[error("invalid day {day}: expected 0 (Sunday) through 6 (Saturday)")]
    InvalidDay { day: u8 },

    /// An interval whose start is not strictly before its end.
    #[error("empty interval on day {day}: start {start} is not before end {end}")]
    EmptyInterval {
        day: u8,
        start: String,
        end: String,
    },

    /// A demand references a teacher missing from the teacher list.
    #[error("demand for class '{class}' references unknown teacher '{teacher}'")]
    UnknownTeacher { class: String, teacher: String },

    /// A slot is not part of the routine's slot list.
    #[error("slot {slot} is not part of this routine")]
    UnknownSlot { slot: String },

    /// Structural problems found by [`validate_problem`](crate::validation::validate_problem).
    #[error("invalid problem: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document is not valid JSON for the expected shape.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimetableError {
    /// Returns true if this error comes from the structural validation pass.
    pub fn is_validation(&self) -> bool {
        matches!(self, TimetableError::Validation(_))
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;
