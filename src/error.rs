//! Error types for timetabling.
//!
//! Three families of failure reach the caller:
//!
//! - **Input** (`Validation`): rejected before the core runs.
//! - **Business** (`NoViableSchedule`): the request cannot produce a
//!   timetable. Surface it to the user; retrying gives the same answer.
//! - **Internal** (`UnknownSlot`, `InvariantViolation`): wiring bugs
//!   between components. Never expected with correct construction.

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for timetabling operations.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Request input failed validation. Carries every detected issue.
    #[error("invalid input: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// Conflict resolution eliminated every subject.
    #[error("no viable schedule: every subject overlaps ({})", .dropped.join(", "))]
    NoViableSchedule {
        /// Names of dropped subjects, in drop order.
        dropped: Vec<String>,
    },

    /// Slot index outside the catalogue.
    #[error("unknown slot index: {0}")]
    UnknownSlot(usize),

    /// Internal consistency check failed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// GA configuration rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("configuration I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid TOML.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for timetabling operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_no_viable_schedule_lists_dropped() {
        let err = TimetableError::NoViableSchedule {
            dropped: vec!["Math".into(), "Physics".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Math, Physics"));
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = TimetableError::Validation(vec![
            ValidationError::new(ValidationErrorKind::InvalidDate, "Math", "bad date"),
            ValidationError::new(ValidationErrorKind::PriorityOutOfRange, "Lab", "bad priority"),
        ]);
        assert_eq!(err.to_string(), "invalid input: bad date; bad priority");
    }
}
