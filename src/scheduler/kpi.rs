//! Timetable quality metrics (KPIs).
//!
//! Summarises a finished run from its assignments, penalty terms and GA
//! statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Cost | Weighted penalty of the returned timetable |
//! | Collisions | Re-uses of an already-taken slot |
//! | Forbidden hits | Subjects in one of their forbidden slots |
//! | Scheduled / Dropped | Subjects placed vs. removed by conflict resolution |
//! | Slot utilization | Distinct slots used / catalogue size |
//! | Generations | GA generations evaluated |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ga::{GaResult, PenaltyBreakdown};
use crate::models::{ScheduleAssignment, SlotCatalog};

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Weighted penalty (0 = every hard rule satisfied).
    pub cost: u64,
    /// Slot collisions in the returned timetable.
    pub collisions: u64,
    /// Forbidden-slot placements in the returned timetable.
    pub forbidden_hits: u64,
    /// Subjects in the request.
    pub subjects_requested: usize,
    /// Subjects placed in a slot.
    pub subjects_scheduled: usize,
    /// Subjects removed by conflict resolution.
    pub subjects_dropped: usize,
    /// Distinct slots occupied.
    pub distinct_slots_used: usize,
    /// `distinct_slots_used / catalogue size` (0.0..1.0).
    pub slot_utilization: f64,
    /// GA generations evaluated.
    pub generations: usize,
    /// Whether the GA stopped early on a zero-penalty timetable.
    pub perfect: bool,
}

impl ScheduleKpi {
    /// Computes KPIs for a finished run.
    ///
    /// # Arguments
    /// * `schedule` - Decoded assignments of the best chromosome.
    /// * `catalog` - Slot catalogue the run used.
    /// * `breakdown` - Penalty terms of the best chromosome.
    /// * `subjects_requested` - Subject count before conflict resolution.
    /// * `run` - GA outcome.
    pub fn calculate<I>(
        schedule: &[ScheduleAssignment],
        catalog: &SlotCatalog,
        breakdown: PenaltyBreakdown,
        subjects_requested: usize,
        run: &GaResult<I>,
    ) -> Self {
        let distinct_slots_used = schedule
            .iter()
            .map(|a| a.slot.as_str())
            .collect::<HashSet<_>>()
            .len();

        let slot_utilization = if catalog.is_empty() {
            0.0
        } else {
            distinct_slots_used as f64 / catalog.len() as f64
        };

        Self {
            cost: breakdown.total(),
            collisions: breakdown.collisions,
            forbidden_hits: breakdown.forbidden_hits,
            subjects_requested,
            subjects_scheduled: schedule.len(),
            subjects_dropped: subjects_requested.saturating_sub(schedule.len()),
            distinct_slots_used,
            slot_utilization,
            generations: run.generations,
            perfect: run.is_perfect(),
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_cost: u64, max_dropped: usize) -> bool {
        self.cost <= max_cost && self.subjects_dropped <= max_dropped
    }
}
