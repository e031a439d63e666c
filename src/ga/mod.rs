//! GA-based slot assignment.
//!
//! A generational genetic algorithm searches slot assignments for the
//! subjects that survived conflict resolution.
//!
//! # Encoding
//!
//! - **Slot vector**: gene `i` is the catalogue index of the slot given to
//!   the `i`-th resolved subject. Every in-range vector decodes to a
//!   timetable; collisions and forbidden slots are penalised.
//!
//! # Layers
//!
//! - [`GaProblem`] / [`Individual`]: encoding-specific operators.
//! - [`GaRunner`]: selection, elitism, termination, statistics.
//! - [`FitnessEvaluator`]: additive penalty over a slot vector.
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

mod chromosome;
mod fitness;
mod problem;
mod runner;

pub use chromosome::{SlotChromosome, UNEVALUATED, reassign_mutation, single_point_crossover};
pub use fitness::{COLLISION_PENALTY, FORBIDDEN_PENALTY, FitnessEvaluator, PenaltyBreakdown};
pub use problem::{GaProblem, Individual, TimetableGaProblem};
pub use runner::{
    GaConfig, GaResult, GaRunner, GenerationStats, PROGRESS_INTERVAL, Termination,
    tournament_select,
};
