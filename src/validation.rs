//! Input validation for timetabling requests.
//!
//! Converts raw request subjects into [`Subject`]s. Detects:
//! - Empty subject list
//! - Empty or duplicate names
//! - Dates not in `YYYY-MM-DD` form
//! - Start date after end date
//! - Priority outside 1..=10
//!
//! Every problem is reported, each naming the offending subject. Nothing
//! that fails here reaches conflict resolution or the GA.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY, Subject};

/// Date format accepted in requests.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation result.
pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

/// A subject as submitted by the request layer, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectInput {
    /// Subject name, kept verbatim as its identity.
    pub name: String,
    /// Wall-clock start (free-form).
    #[serde(default)]
    pub start_time: String,
    /// Wall-clock end (free-form).
    #[serde(default)]
    pub end_time: String,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: String,
    /// Credit count.
    #[serde(default)]
    pub credits: i32,
    /// Course category.
    #[serde(default)]
    pub subject_type: String,
    /// Instructor name.
    #[serde(default)]
    pub instructor: String,
    /// Defaults to [`DEFAULT_PRIORITY`] when absent.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Defaults to `false` when absent.
    #[serde(default)]
    pub is_retake: Option<bool>,
}

impl SubjectInput {
    /// Creates an input with the given name and date strings.
    pub fn new(
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Default::default()
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the retake flag.
    pub fn with_retake(mut self, is_retake: bool) -> Self {
        self.is_retake = Some(is_retake);
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }
}

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending subject name (empty for request-wide errors).
    pub subject: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The request has no subjects.
    EmptyInput,
    /// A subject has an empty name.
    EmptyName,
    /// Two subjects share a name.
    DuplicateName,
    /// A date is not in `YYYY-MM-DD` form.
    InvalidDate,
    /// `start_date` is after `end_date`.
    InvertedDateRange,
    /// Priority outside 1..=10.
    PriorityOutOfRange,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Validates raw subjects and converts them to domain subjects.
///
/// # Returns
/// Subjects in input order, or every detected issue.
pub fn validate_subjects(inputs: &[SubjectInput]) -> ValidationResult<Vec<Subject>> {
    let mut errors = Vec::new();

    if inputs.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "",
            "No subjects to schedule",
        )]);
    }

    let mut names = HashSet::new();
    let mut subjects = Vec::with_capacity(inputs.len());

    for input in inputs {
        // Names are matched against constraint keys as given.
        let name = input.name.as_str();
        if name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "",
                "Subject with empty name",
            ));
        } else if !names.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                name,
                format!("Duplicate subject name: {name}"),
            ));
        }

        let priority = input.priority.unwrap_or(DEFAULT_PRIORITY);
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PriorityOutOfRange,
                name,
                format!(
                    "Subject '{name}' has priority {priority}, expected {MIN_PRIORITY}..={MAX_PRIORITY}"
                ),
            ));
        }

        let start = parse_date(name, "start_date", &input.start_date, &mut errors);
        let end = parse_date(name, "end_date", &input.end_date, &mut errors);

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedDateRange,
                    name,
                    format!("Subject '{name}' starts {start} after it ends {end}"),
                ));
                continue;
            }
            subjects.push(Subject {
                name: name.to_string(),
                start_time: input.start_time.clone(),
                end_time: input.end_time.clone(),
                start_date: start,
                end_date: end,
                credits: input.credits,
                subject_type: input.subject_type.clone(),
                instructor: input.instructor.clone(),
                priority,
                is_retake: input.is_retake.unwrap_or(false),
            });
        }
    }

    if errors.is_empty() {
        Ok(subjects)
    } else {
        Err(errors)
    }
}

fn parse_date(
    subject: &str,
    field: &str,
    raw: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDate,
                subject,
                format!("Subject '{subject}' has invalid {field} '{raw}', expected YYYY-MM-DD"),
            ));
            None
        }
    }
}
