//! Timetable pipeline, decoding and KPI evaluation.
//!
//! # Pipeline
//!
//! `TimetableScheduler` validates a request, prunes date conflicts, runs
//! the GA over the slot catalogue and decodes the best chromosome. It
//! gives no optimality guarantee: the result is the best assignment seen
//! within the generation budget.
//!
//! # KPI
//!
//! `ScheduleKpi` reports cost terms, subject counts, slot utilisation and
//! how the GA terminated.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

mod assembler;
mod kpi;
mod timetable;

pub use assembler::ScheduleAssembler;
pub use kpi::ScheduleKpi;
pub use timetable::{TimetableRequest, TimetableResult, TimetableScheduler};
