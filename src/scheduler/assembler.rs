//! Chromosome decoding.
//!
//! Turns the best slot vector back into named assignments. Decoding is
//! pure; it neither repairs collisions nor re-checks constraints.

use tracing::error;

use crate::error::{Result, TimetableError};
use crate::ga::SlotChromosome;
use crate::models::{ScheduleAssignment, SlotCatalog, Subject};

/// Decodes slot chromosomes into schedule assignments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleAssembler;

impl ScheduleAssembler {
    /// Zips `subjects` with the slot names selected by `chromosome`.
    ///
    /// # Errors
    /// [`TimetableError::InvariantViolation`] if the chromosome length
    /// differs from the subject count or a gene is outside the catalogue.
    pub fn assemble(
        subjects: &[Subject],
        catalog: &SlotCatalog,
        chromosome: &SlotChromosome,
    ) -> Result<Vec<ScheduleAssignment>> {
        if chromosome.len() != subjects.len() {
            let msg = format!(
                "chromosome has {} genes for {} subjects",
                chromosome.len(),
                subjects.len()
            );
            error!(event = "assemble_failed", reason = %msg);
            return Err(TimetableError::InvariantViolation(msg));
        }

        subjects
            .iter()
            .zip(&chromosome.genes)
            .map(|(subject, &gene)| {
                let slot = catalog.name_at(gene).map_err(|_| {
                    let msg = format!(
                        "gene {gene} for '{}' outside catalogue of {} slots",
                        subject.name,
                        catalog.len()
                    );
                    error!(event = "assemble_failed", reason = %msg);
                    TimetableError::InvariantViolation(msg)
                })?;
                Ok(ScheduleAssignment::new(subject, slot))
            })
            .collect()
    }
}
