//! Timetabling domain models.
//!
//! Provides the data types for a personal timetabling problem and its
//! solution.
//!
//! | Type | Role |
//! |------|------|
//! | `Subject` | A course with a date range, priority and retake flag |
//! | `SlotCatalog` | Ordered set of weekly time slots |
//! | `ConstraintMap` | Forbidden slots per subject |
//! | `SoftPreferences` | Unscored preference flags from the request |
//! | `ScheduleAssignment` | A subject placed in a slot |
//! | `ConflictEntry` | A subject dropped for overlapping another |

mod constraint;
mod schedule;
mod slot;
mod subject;

pub use constraint::{ConstraintMap, SoftPreferences};
pub use schedule::{ConflictEntry, ScheduleAssignment, SESSIONS_PER_SUBJECT};
pub use slot::{DEFAULT_DAYS, DEFAULT_PERIODS, SlotCatalog};
pub use subject::{
    DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY, RETAKE_BONUS, Subject,
};
