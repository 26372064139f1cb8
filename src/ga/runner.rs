//! Generational search loop.
//!
//! # Algorithm
//!
//! For a fixed number of generations:
//! 1. **Rank**: evaluate every candidate, stable-sort by fitness descending.
//! 2. **Select**: keep the top `population_size / 2`.
//! 3. **Reproduce**: draw two distinct survivors (or reuse the only one),
//!    cross them over with probability `crossover_rate`, mutate each child
//!    with probability `mutation_rate`, append both children.
//! 4. **Truncate** to exactly `population_size`.
//!
//! The final population is evaluated once more and the first candidate with
//! maximal fitness is returned. A generation may be worse than the previous
//! one; there is no elitist rollback beyond survivor retention.

use std::time::Instant;

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::problem::GaProblem;
use crate::config::GaConfig;
use crate::error::RosterError;
use crate::validation::validate_search;

/// An individual paired with its fitness.
#[derive(Debug, Clone)]
pub struct Scored<I> {
    pub fitness: i64,
    pub individual: I,
}

/// Summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Best fitness of the ranked population.
    pub best_fitness: i64,
    /// Worst fitness of the ranked population.
    pub worst_fitness: i64,
    /// Candidates kept by selection.
    pub survivors: usize,
    /// Size of the population handed to the next generation.
    pub population_size: usize,
}

/// Outcome of a search.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best individual of the final population.
    pub best: I,
    /// Its fitness.
    pub best_fitness: i64,
    /// Generations actually run.
    pub generations: usize,
    /// Per-generation statistics.
    pub history: Vec<GenerationStats>,
    /// Fitness of every candidate in the final population, in order.
    pub final_fitness: Vec<i64>,
    /// Whether the time limit cut the run short.
    pub timed_out: bool,
}

/// Runs the genetic search.
pub struct GaRunner;

impl GaRunner {
    /// Builds an initial population and evolves it.
    ///
    /// # Errors
    /// [`RosterError::InvalidConfiguration`] if a rate lies outside `[0, 1]`
    /// or the population is smaller than 2.
    pub fn run<P, R>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>, RosterError>
    where
        P: GaProblem,
        R: Rng,
    {
        validate_search(config).map_err(RosterError::InvalidConfiguration)?;
        Ok(Self::run_validated(problem, config, rng))
    }

    /// Runs a search whose parameters already passed validation.
    pub(crate) fn run_validated<P, R>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> GaResult<P::Individual>
    where
        P: GaProblem,
        R: Rng,
    {
        let population = problem.create_population(config.population_size, rng);
        Self::evolve(problem, config, population, rng)
    }

    fn evolve<P, R>(
        problem: &P,
        config: &GaConfig,
        mut population: Vec<P::Individual>,
        rng: &mut R,
    ) -> GaResult<P::Individual>
    where
        P: GaProblem,
        R: Rng,
    {
        let size = population.len();
        let started = Instant::now();
        let mut history = Vec::with_capacity(config.generations.min(1024));
        let mut timed_out = false;

        for generation in 0..config.generations {
            let ranked = Self::rank(problem, population);
            let best_fitness = ranked.first().map_or(0, |s| s.fitness);
            let worst_fitness = ranked.last().map_or(0, |s| s.fitness);

            let survivors = Self::select(ranked, size / 2);
            let survivor_count = survivors.len();
            population = Self::reproduce(problem, config, &survivors, size, rng);

            debug!(generation, best_fitness, worst_fitness, "generation complete");
            history.push(GenerationStats {
                generation,
                best_fitness,
                worst_fitness,
                survivors: survivor_count,
                population_size: population.len(),
            });

            if config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                timed_out = generation + 1 < config.generations;
                break;
            }
        }

        let final_fitness: Vec<i64> = population.iter().map(|i| problem.evaluate(i)).collect();
        let (best_idx, best_fitness) = Self::first_best(&final_fitness);
        GaResult {
            best: population.swap_remove(best_idx),
            best_fitness,
            generations: history.len(),
            history,
            final_fitness,
            timed_out,
        }
    }

    /// Evaluates and sorts a population, best first.
    ///
    /// The sort is stable: equal fitness keeps population order.
    pub fn rank<P: GaProblem>(
        problem: &P,
        population: Vec<P::Individual>,
    ) -> Vec<Scored<P::Individual>> {
        let mut scored: Vec<_> = population
            .into_iter()
            .map(|individual| Scored {
                fitness: problem.evaluate(&individual),
                individual,
            })
            .collect();
        scored.sort_by(|a, b| b.fitness.cmp(&a.fitness));
        scored
    }

    /// Keeps the first `count` ranked individuals.
    pub fn select<I>(ranked: Vec<Scored<I>>, count: usize) -> Vec<I> {
        ranked
            .into_iter()
            .take(count)
            .map(|s| s.individual)
            .collect()
    }

    /// Builds the next generation of exactly `size` individuals.
    ///
    /// Survivors are carried over first, then children are appended in
    /// pairs until the population is full; the excess child is dropped.
    pub fn reproduce<P, R>(
        problem: &P,
        config: &GaConfig,
        survivors: &[P::Individual],
        size: usize,
        rng: &mut R,
    ) -> Vec<P::Individual>
    where
        P: GaProblem,
        R: Rng,
    {
        let mut next: Vec<P::Individual> = Vec::with_capacity(size + 1);
        next.extend_from_slice(survivors);
        if survivors.is_empty() {
            return next;
        }

        while next.len() < size {
            let (p1, p2) = if survivors.len() < 2 {
                (&survivors[0], &survivors[0])
            } else {
                let pair: Vec<&P::Individual> = survivors.choose_multiple(rng, 2).collect();
                (pair[0], pair[1])
            };

            let (mut c1, mut c2) = if rng.random_bool(config.crossover_rate) {
                problem.crossover(p1, p2, rng)
            } else {
                (p1.clone(), p2.clone())
            };
            if rng.random_bool(config.mutation_rate) {
                problem.mutate(&mut c1, rng);
            }
            if rng.random_bool(config.mutation_rate) {
                problem.mutate(&mut c2, rng);
            }
            next.push(c1);
            next.push(c2);
        }

        next.truncate(size);
        next
    }

    /// Index and value of the first maximal fitness.
    fn first_best(fitness: &[i64]) -> (usize, i64) {
        let mut best = (0, i64::MIN);
        for (idx, &value) in fitness.iter().enumerate() {
            if value > best.1 {
                best = (idx, value);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FleetProblem, PenaltyWeights, ShiftRules};
    use crate::ga::DayProblem;
    use crate::models::{DriverRotation, Weekday};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Maximizes the number of set bits in a fixed-width word.
    struct OneMax;

    impl GaProblem for OneMax {
        type Individual = Vec<bool>;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            (0..16).map(|_| rng.random_bool(0.2)).collect()
        }

        fn evaluate(&self, individual: &Vec<bool>) -> i64 {
            individual.iter().filter(|&&b| b).count() as i64
        }

        fn crossover<R: Rng>(
            &self,
            p1: &Vec<bool>,
            p2: &Vec<bool>,
            rng: &mut R,
        ) -> (Vec<bool>, Vec<bool>) {
            let cut = rng.random_range(0..p1.len());
            let c1 = [&p1[..cut], &p2[cut..]].concat();
            let c2 = [&p2[..cut], &p1[cut..]].concat();
            (c1, c2)
        }

        fn mutate<R: Rng>(&self, individual: &mut Vec<bool>, rng: &mut R) {
            let i = rng.random_range(0..individual.len());
            individual[i] = !individual[i];
        }
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let population = vec![vec![true], vec![false], vec![true], vec![false]];
        let ranked = GaRunner::rank(&OneMax, population);
        let fitness: Vec<i64> = ranked.iter().map(|s| s.fitness).collect();
        assert_eq!(fitness, vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_select_keeps_top_half() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = OneMax.create_population(50, &mut rng);
        let ranked = GaRunner::rank(&OneMax, population);
        let cutoff = ranked[24].fitness;

        let survivors = GaRunner::select(ranked, 25);
        assert_eq!(survivors.len(), 25);
        assert!(survivors.iter().all(|s| OneMax.evaluate(s) >= cutoff));
    }

    #[test]
    fn test_reproduce_fills_exactly() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = GaConfig::default();
        for (survivors, size) in [(25, 50), (1, 2), (1, 3), (2, 5), (3, 7)] {
            let parents = OneMax.create_population(survivors, &mut rng);
            let next = GaRunner::reproduce(&OneMax, &config, &parents, size, &mut rng);
            assert_eq!(next.len(), size);
            assert_eq!(&next[..survivors], &parents[..]);
        }
    }

    #[test]
    fn test_population_size_invariant() {
        let config = GaConfig::default().with_generations(20);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = GaRunner::run(&OneMax, &config, &mut rng).unwrap();

        assert_eq!(result.generations, 20);
        assert_eq!(result.history.len(), 20);
        for stats in &result.history {
            assert_eq!(stats.survivors, 25);
            assert_eq!(stats.population_size, 50);
            assert!(stats.best_fitness >= stats.worst_fitness);
        }
    }

    #[test]
    fn test_onemax_improves() {
        let config = GaConfig::default()
            .with_generations(60)
            .with_mutation_rate(0.5)
            .with_crossover_rate(0.9);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = GaRunner::run(&OneMax, &config, &mut rng).unwrap();
        let first = result.history[0].best_fitness;
        // Survivor retention keeps the ranked best from ever dropping
        assert!(result.best_fitness >= first);
        assert!(result.history.windows(2).all(|w| w[1].best_fitness >= w[0].best_fitness));
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let config = GaConfig::default().with_generations(0).with_population_size(10);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = GaRunner::run(&OneMax, &config, &mut rng).unwrap();
        assert_eq!(result.generations, 0);
        assert!(result.history.is_empty());
        assert!(result.best_fitness >= 0);
    }

    #[test]
    fn test_first_maximal_wins_ties() {
        assert_eq!(GaRunner::first_best(&[0, 1, 1]), (1, 1));
        assert_eq!(GaRunner::first_best(&[-7, -3, -5, -3]), (1, -3));
    }

    #[test]
    fn test_invalid_search_parameters_rejected() {
        let mut rng = SmallRng::seed_from_u64(42);
        for config in [
            GaConfig::default().with_crossover_rate(1.5),
            GaConfig::default().with_mutation_rate(-0.1),
            GaConfig::default().with_population_size(1),
            GaConfig::default().with_population_size(0),
        ] {
            let result = GaRunner::run(&OneMax, &config, &mut rng);
            assert!(
                matches!(result, Err(RosterError::InvalidConfiguration(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_minimum_population_of_two() {
        let config = GaConfig::default().with_population_size(2).with_generations(5);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = GaRunner::run(&OneMax, &config, &mut rng).unwrap();
        assert_eq!(result.final_fitness.len(), 2);
        assert!(result.history.iter().all(|s| s.survivors == 1));
    }

    #[test]
    fn test_time_limit_stops_early() {
        let config = GaConfig::default()
            .with_generations(1_000_000)
            .with_time_limit(std::time::Duration::ZERO);
        let mut rng = SmallRng::seed_from_u64(42);
        let result = GaRunner::run(&OneMax, &config, &mut rng).unwrap();
        assert_eq!(result.generations, 1);
        assert!(result.timed_out);
    }

    #[test]
    fn test_day_problem_best_is_population_max() {
        let fleet = FleetProblem::new(10, 5, 7);
        let rotation = DriverRotation::assign(7);
        let rules = ShiftRules::default();
        let weights = PenaltyWeights::default();
        let problem =
            DayProblem::new(fleet, Weekday::Monday, &rotation, &rules, &weights).unwrap();
        let config = GaConfig::default().with_population_size(10).with_generations(5);
        let mut rng = SmallRng::seed_from_u64(42);

        let result = GaRunner::run(&problem, &config, &mut rng).unwrap();
        assert!(!result.best.is_empty());
        assert_eq!(problem.evaluate(&result.best), result.best_fitness);
        assert_eq!(result.final_fitness.len(), 10);
        assert_eq!(result.final_fitness.iter().max(), Some(&result.best_fitness));
        assert!(result.history.iter().all(|s| s.population_size == 10));
    }
}
