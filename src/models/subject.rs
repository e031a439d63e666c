//! Subject (course) model.
//!
//! A subject is one entry of a student's personal calendar: a course that
//! runs over an inclusive date range and must be placed in exactly one
//! weekly time slot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest accepted priority.
pub const MIN_PRIORITY: i32 = 1;
/// Highest accepted (and effective) priority.
pub const MAX_PRIORITY: i32 = 10;
/// Priority used when the request omits one.
pub const DEFAULT_PRIORITY: i32 = 5;
/// Bonus added to a retake's priority before capping.
pub const RETAKE_BONUS: i32 = 2;

/// A subject to be scheduled.
///
/// Dates are validated before a `Subject` exists, so
/// `start_date <= end_date` always holds for values built through
/// [`crate::validation::validate_subjects`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique name within a request.
    pub name: String,
    /// Wall-clock start (free-form, not interpreted).
    pub start_time: String,
    /// Wall-clock end (free-form, not interpreted).
    pub end_time: String,
    /// First day the subject runs (inclusive).
    pub start_date: NaiveDate,
    /// Last day the subject runs (inclusive).
    pub end_date: NaiveDate,
    /// Credit count.
    pub credits: i32,
    /// Subject type label (lecture, lab, ...).
    pub subject_type: String,
    /// Instructor name.
    pub instructor: String,
    /// Stated priority, 1..=10 (higher = more important).
    pub priority: i32,
    /// Whether the student is retaking this subject.
    pub is_retake: bool,
}

impl Subject {
    /// Creates a subject running over `[start_date, end_date]`.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_time: String::new(),
            end_time: String::new(),
            start_date,
            end_date,
            credits: 0,
            subject_type: String::new(),
            instructor: String::new(),
            priority: DEFAULT_PRIORITY,
            is_retake: false,
        }
    }

    /// Sets the wall-clock times.
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    /// Sets the credit count.
    pub fn with_credits(mut self, credits: i32) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the subject type label.
    pub fn with_subject_type(mut self, subject_type: impl Into<String>) -> Self {
        self.subject_type = subject_type.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the stated priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the subject as a retake.
    pub fn with_retake(mut self, is_retake: bool) -> Self {
        self.is_retake = is_retake;
        self
    }

    /// Priority after the retake bonus, capped at [`MAX_PRIORITY`].
    pub fn effective_priority(&self) -> i32 {
        let base = if self.is_retake {
            self.priority + RETAKE_BONUS
        } else {
            self.priority
        };
        base.min(MAX_PRIORITY)
    }

    /// Whether the two closed date ranges share at least one day.
    ///
    /// Symmetric: either start falls inside the other's range.
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_in_b = other.start_date <= self.start_date && self.start_date <= other.end_date;
        let b_in_a = self.start_date <= other.start_date && other.start_date <= self.end_date;
        a_in_b || b_in_a
    }

    /// Formats the date range as `start..end`.
    pub fn date_range(&self) -> String {
        format!("{}..{}", self.start_date, self.end_date)
    }
}
