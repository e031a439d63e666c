//! Generational GA engine.
//!
//! # Generation loop
//!
//! ```text
//! initialise → evaluate ─┬─ any penalty == 0 ──────────► Perfect
//!                        ├─ generation cap reached ────► GenerationCap
//!                        └─ select → breed → evaluate ─┘
//! ```
//!
//! - **Selection**: tournament of `tournament_size` distinct individuals;
//!   the two best become parents.
//! - **Breeding**: crossover, then each child is mutated with probability
//!   `mutation_rate`.
//! - **Elitism**: the best `⌊population_size × elitism_rate⌋` individuals
//!   are copied unchanged into the next generation.
//!
//! The best individual ever evaluated is returned, even if later
//! generations regress. Given the same seed and problem, every run follows
//! the same trajectory.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//! Machine Learning", Ch. 1, 4

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::problem::{GaProblem, Individual};
use crate::error::{Result, TimetableError};

/// Generations between progress log events.
pub const PROGRESS_INTERVAL: usize = 20;

/// GA parameters.
///
/// # Example
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::from_toml_str(r#"
///     population_size = 50
///     max_generations = 500
///     seed = 7
/// "#).unwrap();
///
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.tournament_size, 5);
/// assert_eq!(config.elitism_count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Maximum number of evaluated generations.
    pub max_generations: usize,
    /// Fraction of the population carried over unchanged.
    pub elitism_rate: f64,
    /// Probability that a child is mutated.
    pub mutation_rate: f64,
    /// Individuals sampled per tournament.
    pub tournament_size: usize,
    /// Random seed; `None` draws fresh OS entropy per run.
    pub seed: Option<u64>,
    /// Evaluate each generation on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            elitism_rate: 0.1,
            mutation_rate: 0.1,
            tournament_size: 5,
            seed: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the elitism fraction.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    /// Sets the per-child mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of elite individuals per generation.
    pub fn elitism_count(&self) -> usize {
        let count = (self.population_size as f64 * self.elitism_rate).floor() as usize;
        count.min(self.population_size)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TimetableError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(TimetableError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(TimetableError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        for (name, rate) in [
            ("elitism_rate", self.elitism_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(TimetableError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a TOML configuration.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Why the GA stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// An individual reached penalty 0.
    Perfect,
    /// The generation cap was exhausted.
    GenerationCap,
}

/// Per-generation statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index (0-based).
    pub generation: usize,
    /// Best penalty within this generation.
    pub best_fitness: u64,
    /// Best penalty seen so far in the run.
    pub best_ever: u64,
    /// Mean penalty of this generation.
    pub mean_fitness: f64,
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best individual ever evaluated.
    pub best: I,
    /// Its penalty.
    pub best_fitness: u64,
    /// Number of evaluated generations.
    pub generations: usize,
    /// Stop reason.
    pub termination: Termination,
    /// Statistics per evaluated generation.
    pub history: Vec<GenerationStats>,
}

impl<I> GaResult<I> {
    /// Whether the run found a zero-penalty individual.
    pub fn is_perfect(&self) -> bool {
        self.termination == Termination::Perfect
    }
}

/// Runs the generational GA on a [`GaProblem`].
pub struct GaRunner;

impl GaRunner {
    /// Runs with a generator seeded from `config.seed` (or OS entropy).
    pub fn run<P>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem + Sync,
    {
        let mut rng = config.rng();
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with an injected generator. `config.seed` is ignored.
    pub fn run_with_rng<P, R>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem + Sync,
        R: Rng,
    {
        config.validate()?;
        let elite = config.elitism_count();

        info!(
            event = "ga_start",
            population_size = config.population_size,
            max_generations = config.max_generations,
            elite = elite,
            parallel = config.parallel,
        );

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(rng))
            .collect();

        let mut best: Option<P::Individual> = None;
        let mut best_fitness = u64::MAX;
        let mut history = Vec::with_capacity(config.max_generations);
        let mut termination = Termination::GenerationCap;

        for generation in 0..config.max_generations {
            evaluate_population(problem, &mut population, config.parallel);

            // First minimum in population order.
            let Some(leader) = population.iter().min_by_key(|ind| ind.fitness()) else {
                break;
            };
            let generation_best = leader.fitness();
            if generation_best < best_fitness {
                best_fitness = generation_best;
                best = Some(leader.clone());
            }

            let total: f64 = population.iter().map(|ind| ind.fitness() as f64).sum();
            history.push(GenerationStats {
                generation,
                best_fitness: generation_best,
                best_ever: best_fitness,
                mean_fitness: total / population.len() as f64,
            });

            if generation % PROGRESS_INTERVAL == 0 {
                debug!(event = "ga_progress", generation, best_fitness);
            }

            if generation_best == 0 {
                termination = Termination::Perfect;
                info!(event = "ga_perfect", generation);
                break;
            }
            if generation + 1 == config.max_generations {
                break;
            }

            population = next_generation(problem, population, config, elite, rng);
        }

        let best = best.ok_or_else(|| {
            let msg = "GA finished without evaluating a generation";
            error!(event = "ga_failed", reason = msg);
            TimetableError::InvariantViolation(msg.into())
        })?;

        info!(
            event = "ga_end",
            generations = history.len(),
            best_fitness,
            termination = ?termination,
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations: history.len(),
            termination,
            history,
        })
    }
}

/// Tournament selection.
///
/// Samples `min(size, population.len())` distinct individuals and returns
/// the best and second best (ties keep sampling order). A one-individual
/// tournament returns that individual twice.
///
/// `population` must be non-empty.
pub fn tournament_select<'a, I, R>(population: &'a [I], size: usize, rng: &mut R) -> (&'a I, &'a I)
where
    I: Individual,
    R: Rng,
{
    let k = size.clamp(1, population.len());
    let mut picks = index::sample(rng, population.len(), k).into_vec();
    picks.sort_by_key(|&i| population[i].fitness());

    let first = &population[picks[0]];
    let second = picks.get(1).map_or(first, |&i| &population[i]);
    (first, second)
}

fn evaluate_population<P>(problem: &P, population: &mut [P::Individual], parallel: bool)
where
    P: GaProblem + Sync,
{
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let fitness = problem.evaluate(ind);
            ind.set_fitness(fitness);
        });
    } else {
        for ind in population.iter_mut() {
            let fitness = problem.evaluate(ind);
            ind.set_fitness(fitness);
        }
    }
}

fn next_generation<P, R>(
    problem: &P,
    mut population: Vec<P::Individual>,
    config: &GaConfig,
    elite: usize,
    rng: &mut R,
) -> Vec<P::Individual>
where
    P: GaProblem,
    R: Rng,
{
    // Stable: equal penalties keep population order.
    population.sort_by_key(|ind| ind.fitness());

    let mut next = Vec::with_capacity(config.population_size);
    next.extend(population.iter().take(elite).cloned());

    while next.len() < config.population_size {
        let (p1, p2) = tournament_select(&population, config.tournament_size, rng);
        let (mut c1, mut c2) = problem.crossover(p1, p2, rng);
        if rng.random_bool(config.mutation_rate) {
            problem.mutate(&mut c1, rng);
        }
        if rng.random_bool(config.mutation_rate) {
            problem.mutate(&mut c2, rng);
        }
        next.push(c1);
        if next.len() < config.population_size {
            next.push(c2);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{SlotChromosome, TimetableGaProblem};
    use crate::models::{ConstraintMap, SlotCatalog, Subject};
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;

    fn subjects(n: usize) -> Vec<Subject> {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n).map(|i| Subject::new(format!("S{i}"), d, d)).collect()
    }

    fn problem(n: usize, slots: &[&str], constraints: &ConstraintMap) -> TimetableGaProblem {
        TimetableGaProblem::new(&subjects(n), &SlotCatalog::new(slots.iter().copied()), constraints)
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let c = GaConfig::default();
        assert_eq!(c.population_size, 100);
        assert_eq!(c.max_generations, 200);
        assert_eq!(c.tournament_size, 5);
        assert_eq!(c.elitism_count(), 10);
        assert!((c.mutation_rate - 0.1).abs() < 1e-12);
        assert!(c.seed.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let bad = [
            GaConfig::default().with_population_size(0),
            GaConfig::default().with_max_generations(0),
            GaConfig::default().with_tournament_size(0),
            GaConfig::default().with_mutation_rate(1.5),
            GaConfig::default().with_elitism_rate(-0.1),
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(TimetableError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_config_from_toml() {
        let c = GaConfig::from_toml_str("mutation_rate = 0.25\nparallel = true").unwrap();
        assert!((c.mutation_rate - 0.25).abs() < 1e-12);
        assert!(c.parallel);
        assert_eq!(c.population_size, 100);

        assert!(matches!(
            GaConfig::from_toml_str("population_size = 0"),
            Err(TimetableError::InvalidConfig(_))
        ));
        assert!(matches!(
            GaConfig::from_toml_str("population_size = \"many\""),
            Err(TimetableError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_config_load_missing_file() {
        assert!(matches!(
            GaConfig::load("/nonexistent/timetable-ga.toml"),
            Err(TimetableError::ConfigIo(_))
        ));
    }

    #[test]
    fn test_tournament_returns_two_best_of_sample() {
        let population: Vec<SlotChromosome> = (0..5u64)
            .map(|f| {
                let mut ch = SlotChromosome::from_genes(vec![f as usize]);
                ch.set_fitness(f * 100);
                ch
            })
            .collect();
        let mut rng = SmallRng::seed_from_u64(42);

        // Tournament covering the whole population is deterministic.
        let (a, b) = tournament_select(&population, 5, &mut rng);
        assert_eq!(a.fitness(), 0);
        assert_eq!(b.fitness(), 100);

        // Oversized tournament is clamped.
        let (a, b) = tournament_select(&population, 50, &mut rng);
        assert_eq!((a.fitness(), b.fitness()), (0, 100));

        // Smaller tournaments: first parent never worse than second.
        for _ in 0..100 {
            let (a, b) = tournament_select(&population, 3, &mut rng);
            assert!(a.fitness() < b.fitness());
        }
    }

    #[test]
    fn test_tournament_single_individual() {
        let mut ch = SlotChromosome::from_genes(vec![1]);
        ch.set_fitness(7);
        let population = vec![ch];
        let mut rng = SmallRng::seed_from_u64(1);
        let (a, b) = tournament_select(&population, 5, &mut rng);
        assert_eq!(a, b);
    }

    #[test]
    fn test_determinism() {
        let constraints = ConstraintMap::new().with_forbidden("S0", "A").with_forbidden("S1", "B");
        let p = problem(5, &["A", "B", "C", "D"], &constraints);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_seed(123);

        let r1 = GaRunner::run(&p, &config).unwrap();
        let r2 = GaRunner::run(&p, &config).unwrap();
        assert_eq!(r1.best, r2.best);
        assert_eq!(r1.best_fitness, r2.best_fitness);
        assert_eq!(r1.history, r2.history);
    }

    #[test]
    fn test_injected_rng_determinism() {
        let p = problem(6, &["A", "B", "C", "D", "E"], &ConstraintMap::new());
        let config = GaConfig::default().with_population_size(20).with_max_generations(30);

        let r1 = GaRunner::run_with_rng(&p, &config, &mut SmallRng::seed_from_u64(9)).unwrap();
        let r2 = GaRunner::run_with_rng(&p, &config, &mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(r1.best, r2.best);
        assert_eq!(r1.history, r2.history);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let p = problem(8, &["A", "B", "C", "D", "E", "F"], &ConstraintMap::new());
        let config = GaConfig::default()
            .with_population_size(40)
            .with_max_generations(25)
            .with_seed(5);

        let seq = GaRunner::run(&p, &config).unwrap();
        let par = GaRunner::run(&p, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.best, par.best);
        assert_eq!(seq.history, par.history);
    }

    #[test]
    fn test_best_ever_is_monotonic() {
        // 8 subjects, 6 slots: collisions unavoidable, so the run hits the cap.
        let p = problem(8, &["A", "B", "C", "D", "E", "F"], &ConstraintMap::new());
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(60)
            .with_seed(11);

        let result = GaRunner::run(&p, &config).unwrap();
        assert_eq!(result.termination, Termination::GenerationCap);
        assert_eq!(result.generations, 60);
        assert!(result
            .history
            .windows(2)
            .all(|w| w[1].best_ever <= w[0].best_ever));
        assert_eq!(result.history.last().unwrap().best_ever, result.best_fitness);
        // Pigeonhole lower bound
        assert!(result.best_fitness >= 2000);
    }

    #[test]
    fn test_elitism_keeps_generation_best() {
        let p = problem(8, &["A", "B", "C", "D", "E", "F"], &ConstraintMap::new());
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_seed(3);

        let result = GaRunner::run(&p, &config).unwrap();
        assert!(result
            .history
            .windows(2)
            .all(|w| w[1].best_fitness <= w[0].best_fitness));
    }

    #[test]
    fn test_three_subjects_three_slots_reach_zero() {
        let p = problem(3, &["A", "B", "C"], &ConstraintMap::new());
        for seed in [1, 2, 3, 42, 1234] {
            let result = GaRunner::run(&p, &GaConfig::default().with_seed(seed)).unwrap();
            assert_eq!(result.best_fitness, 0);
            assert!(result.is_perfect());
            assert!(result.generations < 200);

            let mut genes = result.best.genes.clone();
            genes.sort_unstable();
            assert_eq!(genes, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_single_subject_every_slot_forbidden() {
        let slots = ["A", "B", "C"];
        let constraints = ConstraintMap::new().with_forbidden_slots("S0", slots);
        let p = problem(1, &slots, &constraints);

        let result = GaRunner::run(&p, &GaConfig::default().with_seed(42)).unwrap();
        assert_eq!(result.best_fitness, 500);
        assert_eq!(result.termination, Termination::GenerationCap);
        assert_eq!(result.generations, 200);
    }

    #[test]
    fn test_population_of_one() {
        let p = problem(2, &["A", "B"], &ConstraintMap::new());
        let config = GaConfig::default()
            .with_population_size(1)
            .with_max_generations(500)
            .with_mutation_rate(1.0)
            .with_seed(8);

        let result = GaRunner::run(&p, &config).unwrap();
        assert_eq!(config.elitism_count(), 0);
        assert!(result.history.iter().all(|s| s.mean_fitness == s.best_fitness as f64));
        assert!(result.best_fitness <= 1000);
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let p = problem(2, &["A", "B"], &ConstraintMap::new());
        let err = GaRunner::run(&p, &GaConfig::default().with_population_size(0)).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfig(_)));
    }
}
