//! GA problem definition.
//!
//! [`GaProblem`] is the seam between the generic population engine
//! ([`GaRunner`](super::GaRunner)) and a concrete encoding.
//! [`TimetableGaProblem`] bridges resolved subjects, the slot catalogue and
//! the constraint map to that engine.

use rand::Rng;
use tracing::error;

use super::chromosome::{SlotChromosome, reassign_mutation, single_point_crossover};
use super::fitness::{FitnessEvaluator, PenaltyBreakdown};
use crate::error::{Result, TimetableError};
use crate::models::{ConstraintMap, SlotCatalog, Subject};

/// A member of the population with a cached penalty.
///
/// Lower fitness = better (minimisation convention).
pub trait Individual: Clone + Send {
    /// Cached penalty.
    fn fitness(&self) -> u64;

    /// Stores a freshly computed penalty.
    fn set_fitness(&mut self, fitness: u64);
}

/// Problem-specific operators driven by [`GaRunner`](super::GaRunner).
///
/// The runner owns selection, elitism, the mutation probability and
/// termination; the problem supplies encoding-aware operators.
pub trait GaProblem {
    /// Chromosome type.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Penalty of an individual (0 = perfect).
    fn evaluate(&self, individual: &Self::Individual) -> u64;

    /// Recombines two parents into two children.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> (Self::Individual, Self::Individual);

    /// Mutates an individual unconditionally.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}

/// GA problem for assigning resolved subjects to catalogue slots.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::ga::{GaConfig, GaRunner, TimetableGaProblem};
/// use u_timetable::models::{ConstraintMap, SlotCatalog, Subject};
///
/// let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let subjects = vec![Subject::new("Math", d, d), Subject::new("Art", d, d)];
/// let catalog = SlotCatalog::new(["Mon AM", "Mon PM"]);
/// let problem = TimetableGaProblem::new(&subjects, &catalog, &ConstraintMap::new()).unwrap();
///
/// let result = GaRunner::run(&problem, &GaConfig::default().with_seed(42)).unwrap();
/// assert_eq!(result.best_fitness, 0);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGaProblem {
    subject_count: usize,
    slot_count: usize,
    evaluator: FitnessEvaluator,
}

impl TimetableGaProblem {
    /// Creates a problem for `subjects` in chromosome order.
    ///
    /// # Errors
    /// [`TimetableError::InvariantViolation`] if the catalogue is empty:
    /// no gene could be drawn.
    pub fn new(
        subjects: &[Subject],
        catalog: &SlotCatalog,
        constraints: &ConstraintMap,
    ) -> Result<Self> {
        if catalog.is_empty() {
            let msg = format!("no slots to place {} subjects in", subjects.len());
            error!(event = "empty_catalog", reason = %msg);
            return Err(TimetableError::InvariantViolation(msg));
        }
        Ok(Self {
            subject_count: subjects.len(),
            slot_count: catalog.len(),
            evaluator: FitnessEvaluator::new(subjects, catalog, constraints),
        })
    }

    /// Number of genes per chromosome.
    pub fn subject_count(&self) -> usize {
        self.subject_count
    }

    /// Number of slots genes may take.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Penalty terms of a chromosome.
    pub fn breakdown(&self, chromosome: &SlotChromosome) -> PenaltyBreakdown {
        self.evaluator.breakdown(&chromosome.genes)
    }
}

impl GaProblem for TimetableGaProblem {
    type Individual = SlotChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> SlotChromosome {
        SlotChromosome::random(self.subject_count, self.slot_count, rng)
    }

    fn evaluate(&self, individual: &SlotChromosome) -> u64 {
        self.evaluator.penalty(&individual.genes)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &SlotChromosome,
        parent2: &SlotChromosome,
        rng: &mut R,
    ) -> (SlotChromosome, SlotChromosome) {
        single_point_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut SlotChromosome, rng: &mut R) {
        reassign_mutation(individual, self.slot_count, rng);
    }
}
