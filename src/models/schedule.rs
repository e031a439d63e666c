//! Timetable (solution) records.
//!
//! A timetable is one slot assignment per surviving subject, plus the
//! report of subjects dropped during conflict resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Subject;

/// Sessions per subject. The model places each subject in one slot.
pub const SESSIONS_PER_SUBJECT: u32 = 1;

/// A subject placed in a time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    /// Subject name.
    pub subject: String,
    /// Assigned slot name.
    #[serde(rename = "time")]
    pub slot: String,
    /// Instructor name.
    pub instructor: String,
    /// Number of weekly sessions (always [`SESSIONS_PER_SUBJECT`]).
    pub sessions: u32,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
    /// Wall-clock start.
    pub start_time: String,
    /// Wall-clock end.
    pub end_time: String,
    /// Effective priority (retake bonus applied).
    pub priority: i32,
    /// Retake flag.
    pub is_retake: bool,
}

impl ScheduleAssignment {
    /// Places a subject in a slot.
    pub fn new(subject: &Subject, slot: impl Into<String>) -> Self {
        Self {
            subject: subject.name.clone(),
            slot: slot.into(),
            instructor: subject.instructor.clone(),
            sessions: SESSIONS_PER_SUBJECT,
            start_date: subject.start_date,
            end_date: subject.end_date,
            start_time: subject.start_time.clone(),
            end_time: subject.end_time.clone(),
            priority: subject.effective_priority(),
            is_retake: subject.is_retake,
        }
    }
}

/// A subject removed by conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    /// Dropped subject name.
    pub subject: String,
    /// Subject kept in its favour.
    pub kept_with: String,
    /// Human-readable explanation.
    pub reason: String,
}

impl ConflictEntry {
    /// Records that `dropped` lost an overlap against `kept`.
    pub fn dropped_for(dropped: &Subject, kept: &Subject) -> Self {
        Self {
            subject: dropped.name.clone(),
            kept_with: kept.name.clone(),
            reason: format!(
                "{} overlaps {} ({})",
                dropped.date_range(),
                kept.name,
                kept.date_range()
            ),
        }
    }
}
