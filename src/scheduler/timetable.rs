//! End-to-end timetabling pipeline.
//!
//! ```text
//! TimetableRequest
//!   → validate_subjects        (reject malformed input)
//!   → ConflictResolver         (drop date-overlapping subjects)
//!   → SlotCatalog::or_default  (request slots or the default week)
//!   → GaRunner                 (search slot assignments)
//!   → ScheduleAssembler        (decode best chromosome)
//!   → TimetableResult
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::assembler::ScheduleAssembler;
use super::kpi::ScheduleKpi;
use crate::conflict::ConflictResolver;
use crate::error::{Result, TimetableError};
use crate::ga::{GaConfig, GaRunner, TimetableGaProblem};
use crate::models::{ConflictEntry, ConstraintMap, ScheduleAssignment, SlotCatalog, SoftPreferences};
use crate::validation::{SubjectInput, validate_subjects};

/// A timetabling request.
///
/// # Example
/// ```
/// use u_timetable::scheduler::TimetableRequest;
///
/// let request: TimetableRequest = serde_json::from_str(r#"{
///     "subjects": [
///         {"name": "Math", "start_date": "2024-03-04", "end_date": "2024-06-21"}
///     ],
///     "constraints": {"Math": ["Mon Morning"]},
///     "additionalConstraints": {"preferMorning": true}
/// }"#).unwrap();
///
/// assert_eq!(request.subjects.len(), 1);
/// assert!(request.available_time_slots.is_empty());
/// assert!(request.preferences.unwrap().prefer_morning);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableRequest {
    /// Subjects to place.
    pub subjects: Vec<SubjectInput>,
    /// Slot names; empty selects the default week.
    #[serde(default)]
    pub available_time_slots: Vec<String>,
    /// Forbidden slots per subject.
    #[serde(default)]
    pub constraints: ConstraintMap,
    /// Soft preferences (echoed, not scored).
    #[serde(default, alias = "additionalConstraints")]
    pub preferences: Option<SoftPreferences>,
}

impl TimetableRequest {
    /// Creates a request for `subjects` with the default week and no constraints.
    pub fn new(subjects: Vec<SubjectInput>) -> Self {
        Self {
            subjects,
            ..Default::default()
        }
    }

    /// Sets the available slot names.
    pub fn with_time_slots<S: Into<String>>(mut self, slots: impl IntoIterator<Item = S>) -> Self {
        self.available_time_slots = slots.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the forbidden-slot constraints.
    pub fn with_constraints(mut self, constraints: ConstraintMap) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the soft preferences.
    pub fn with_preferences(mut self, preferences: SoftPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }
}

/// A computed timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableResult {
    /// One assignment per surviving subject, in input order.
    pub schedule: Vec<ScheduleAssignment>,
    /// Penalty of the returned assignment (0 = no collision, no forbidden slot).
    pub cost: u64,
    /// Subjects dropped for date overlaps, in drop order.
    pub removed_conflicts: Vec<ConflictEntry>,
    /// Run metrics.
    pub diagnostics: ScheduleKpi,
    /// Preferences as received.
    pub preferences: Option<SoftPreferences>,
}

/// Runs the full pipeline for a request.
///
/// # Example
/// ```
/// use u_timetable::ga::GaConfig;
/// use u_timetable::scheduler::{TimetableRequest, TimetableScheduler};
/// use u_timetable::validation::SubjectInput;
///
/// let request = TimetableRequest::new(vec![
///     SubjectInput::new("Math", "2024-01-01", "2024-01-10"),
///     SubjectInput::new("Physics", "2024-01-05", "2024-01-15").with_priority(8),
///     SubjectInput::new("Art", "2024-02-01", "2024-02-10"),
/// ]);
///
/// let scheduler = TimetableScheduler::new(GaConfig::default().with_seed(42));
/// let result = scheduler.schedule(&request).unwrap();
///
/// assert_eq!(result.cost, 0);
/// assert_eq!(result.removed_conflicts[0].subject, "Math");
/// assert_eq!(result.schedule.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    config: GaConfig,
}

impl TimetableScheduler {
    /// Creates a scheduler with the given GA configuration.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// GA configuration in use.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Schedules with a generator seeded from the configuration.
    pub fn schedule(&self, request: &TimetableRequest) -> Result<TimetableResult> {
        let mut rng = self.config.rng();
        self.schedule_with_rng(request, &mut rng)
    }

    /// Schedules with an injected generator.
    ///
    /// # Errors
    /// - [`TimetableError::Validation`] for malformed subjects
    /// - [`TimetableError::NoViableSchedule`] if no subject survives
    /// - [`TimetableError::InvalidConfig`] for a bad GA configuration
    pub fn schedule_with_rng<R: Rng>(
        &self,
        request: &TimetableRequest,
        rng: &mut R,
    ) -> Result<TimetableResult> {
        let subjects = validate_subjects(&request.subjects).map_err(|errors| {
            warn!(event = "validation_failed", errors = errors.len());
            TimetableError::Validation(errors)
        })?;
        let requested = subjects.len();

        let resolution = ConflictResolver::new().resolve(subjects)?;
        let catalog = SlotCatalog::or_default(request.available_time_slots.iter());
        warn_unknown_slots(&request.constraints, &catalog);

        if let Some(prefs) = request.preferences.as_ref().filter(|p| p.any()) {
            info!(event = "preferences_unscored", preferences = ?prefs);
        }

        info!(
            event = "timetable_start",
            requested,
            kept = resolution.kept.len(),
            dropped = resolution.dropped.len(),
            slots = catalog.len(),
        );

        let problem = TimetableGaProblem::new(&resolution.kept, &catalog, &request.constraints)?;
        let run = GaRunner::run_with_rng(&problem, &self.config, rng)?;

        let schedule = ScheduleAssembler::assemble(&resolution.kept, &catalog, &run.best)?;
        let breakdown = problem.breakdown(&run.best);
        let diagnostics = ScheduleKpi::calculate(&schedule, &catalog, breakdown, requested, &run);

        info!(
            event = "timetable_complete",
            cost = run.best_fitness,
            scheduled = schedule.len(),
            generations = run.generations,
        );

        Ok(TimetableResult {
            schedule,
            cost: run.best_fitness,
            removed_conflicts: resolution.dropped,
            diagnostics,
            preferences: request.preferences.clone(),
        })
    }
}

fn warn_unknown_slots(constraints: &ConstraintMap, catalog: &SlotCatalog) {
    for (subject, slots) in constraints.iter() {
        for slot in slots.iter().filter(|s| !catalog.contains(s)) {
            warn!(event = "unknown_forbidden_slot", subject, slot = %slot);
        }
    }
}
