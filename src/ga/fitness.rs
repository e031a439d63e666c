//! Penalty function for slot assignments.
//!
//! | Term | Penalty |
//! |------|---------|
//! | Slot collision (each re-use of an already-taken slot) | 1000 |
//! | Subject placed in one of its forbidden slots | 500 |
//!
//! Terms are summed. A score of zero means every subject has its own slot
//! and none sits in a forbidden one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{ConstraintMap, SlotCatalog, Subject};

/// Penalty per repeated slot occurrence.
pub const COLLISION_PENALTY: u64 = 1000;
/// Penalty per subject in a forbidden slot.
pub const FORBIDDEN_PENALTY: u64 = 500;

/// Penalty terms of one assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    /// Re-occurrences of an already-used slot.
    pub collisions: u64,
    /// Subjects placed in a forbidden slot.
    pub forbidden_hits: u64,
}

impl PenaltyBreakdown {
    /// Weighted total.
    pub fn total(&self) -> u64 {
        COLLISION_PENALTY * self.collisions + FORBIDDEN_PENALTY * self.forbidden_hits
    }

    /// Whether every constraint is satisfied.
    pub fn is_feasible(&self) -> bool {
        self.collisions == 0 && self.forbidden_hits == 0
    }
}

/// Scores gene vectors against a subject list, catalogue and constraints.
///
/// Forbidden slot names are resolved to catalogue indices once at
/// construction; names outside the catalogue can never be assigned and
/// are ignored.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    /// Forbidden slot indices per subject position.
    forbidden: Vec<HashSet<usize>>,
}

impl FitnessEvaluator {
    /// Builds an evaluator for `subjects` in their chromosome order.
    pub fn new(subjects: &[Subject], catalog: &SlotCatalog, constraints: &ConstraintMap) -> Self {
        let forbidden = subjects
            .iter()
            .map(|s| {
                constraints
                    .forbidden_for(&s.name)
                    .map(|slots| slots.iter().filter_map(|n| catalog.index_of(n)).collect())
                    .unwrap_or_default()
            })
            .collect();
        Self { forbidden }
    }

    /// Number of subject positions this evaluator expects.
    pub fn subject_count(&self) -> usize {
        self.forbidden.len()
    }

    /// Total penalty of a gene vector.
    pub fn penalty(&self, genes: &[usize]) -> u64 {
        self.breakdown(genes).total()
    }

    /// Individual penalty terms of a gene vector.
    pub fn breakdown(&self, genes: &[usize]) -> PenaltyBreakdown {
        let mut seen = HashSet::with_capacity(genes.len());
        let mut collisions = 0;
        for &slot in genes {
            if !seen.insert(slot) {
                collisions += 1;
            }
        }

        let forbidden_hits = genes
            .iter()
            .zip(&self.forbidden)
            .filter(|(slot, forbidden)| forbidden.contains(*slot))
            .count() as u64;

        PenaltyBreakdown {
            collisions,
            forbidden_hits,
        }
    }
}
