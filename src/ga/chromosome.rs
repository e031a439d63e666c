//! Slot-index chromosome for timetabling.
//!
//! # Encoding
//!
//! One gene per surviving subject, in resolved-subject order. Each gene is
//! an index into the [`SlotCatalog`](crate::models::SlotCatalog).
//! Any vector of in-range indices is a decodable timetable; collisions
//! and forbidden slots are penalised, not repaired.

use rand::Rng;

use super::problem::Individual;

/// Penalty marker for a chromosome that has not been evaluated yet.
pub const UNEVALUATED: u64 = u64::MAX;

/// Slot-index chromosome.
///
/// Lower fitness = better timetable (minimisation convention).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChromosome {
    /// Slot index per subject position.
    pub genes: Vec<usize>,
    /// Cached penalty ([`UNEVALUATED`] until scored).
    pub fitness: u64,
}

impl Individual for SlotChromosome {
    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}

impl SlotChromosome {
    /// Wraps explicit genes.
    pub fn from_genes(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: UNEVALUATED,
        }
    }

    /// Creates a chromosome with every gene uniform in `[0, slot_count)`.
    ///
    /// `slot_count` must be positive.
    pub fn random<R: Rng>(subject_count: usize, slot_count: usize, rng: &mut R) -> Self {
        let genes = (0..subject_count)
            .map(|_| rng.random_range(0..slot_count))
            .collect();
        Self::from_genes(genes)
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether the cached fitness is current.
    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED
    }

    /// Whether every gene indexes into a catalogue of `slot_count` slots.
    pub fn is_valid(&self, subject_count: usize, slot_count: usize) -> bool {
        self.genes.len() == subject_count && self.genes.iter().all(|&g| g < slot_count)
    }
}

// ======================== Crossover ========================

/// Single-point crossover.
///
/// Picks a cut uniformly in `[1, len - 1]` and swaps the tails. Children
/// of parents shorter than two genes are plain copies (no cut exists).
pub fn single_point_crossover<R: Rng>(
    p1: &SlotChromosome,
    p2: &SlotChromosome,
    rng: &mut R,
) -> (SlotChromosome, SlotChromosome) {
    let len = p1.len().min(p2.len());
    if len < 2 {
        return (
            SlotChromosome::from_genes(p1.genes.clone()),
            SlotChromosome::from_genes(p2.genes.clone()),
        );
    }

    let cut = rng.random_range(1..len);
    let child1 = p1.genes[..cut].iter().chain(&p2.genes[cut..]).copied().collect();
    let child2 = p2.genes[..cut].iter().chain(&p1.genes[cut..]).copied().collect();
    (
        SlotChromosome::from_genes(child1),
        SlotChromosome::from_genes(child2),
    )
}

// ======================== Mutation ========================

/// Reassigns one random gene to a uniform random slot.
///
/// The new slot may equal the old one.
pub fn reassign_mutation<R: Rng>(chromosome: &mut SlotChromosome, slot_count: usize, rng: &mut R) {
    if chromosome.is_empty() || slot_count == 0 {
        return;
    }
    let idx = rng.random_range(0..chromosome.len());
    chromosome.genes[idx] = rng.random_range(0..slot_count);
    chromosome.fitness = UNEVALUATED;
}
