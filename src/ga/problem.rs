//! Rostering GA problem definition.
//!
//! [`GaProblem`] is the seam between the generic search loop and a concrete
//! encoding. [`DayProblem`] implements it for one weekday: individuals are
//! [`DaySchedule`]s, fitness is the constraint-penalty score.

use rand::Rng;

use super::fitness::FitnessEvaluator;
use super::operators::{reassign_driver_mutation, tail_swap_crossover};
use super::population::build_candidate;
use crate::config::{FleetProblem, PenaltyWeights, ShiftRules};
use crate::error::RosterError;
use crate::models::{DaySchedule, DriverKind, DriverRotation, Weekday};
use crate::validation::validate_day;

/// A problem the genetic search can optimize.
///
/// Fitness is maximized.
pub trait GaProblem {
    /// Candidate solution.
    type Individual: Clone;

    /// Builds one random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Builds an initial population.
    fn create_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Self::Individual> {
        (0..size).map(|_| self.create_individual(rng)).collect()
    }

    /// Scores an individual (higher is better).
    fn evaluate(&self, individual: &Self::Individual) -> i64;

    /// Recombines two parents into two children.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> (Self::Individual, Self::Individual);

    /// Perturbs an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}

/// Drivers eligible to work on one weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverPool {
    /// Regular driver indices (empty on weekends).
    pub regular: Vec<u32>,
    /// Flexible driver indices permitted by the rotation.
    pub flexible: Vec<u32>,
}

impl DriverPool {
    /// Resolves eligibility for `weekday`.
    pub fn for_day(problem: &FleetProblem, rotation: &DriverRotation, weekday: Weekday) -> Self {
        let regular = if weekday.is_weekend() {
            Vec::new()
        } else {
            (0..problem.regular_drivers).collect()
        };
        Self {
            regular,
            flexible: rotation.eligible_on(weekday),
        }
    }

    /// Eligible indices of one category.
    #[inline]
    pub fn of_kind(&self, kind: DriverKind) -> &[u32] {
        match kind {
            DriverKind::Regular => &self.regular,
            DriverKind::Flexible => &self.flexible,
        }
    }
}

/// GA problem for one weekday.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_roster::config::{FleetProblem, GaConfig, PenaltyWeights, ShiftRules};
/// use u_roster::ga::{DayProblem, GaRunner};
/// use u_roster::models::{DriverRotation, Weekday};
///
/// let fleet = FleetProblem::new(4, 2, 3);
/// let rotation = DriverRotation::assign(fleet.flexible_drivers);
/// let rules = ShiftRules::default();
/// let weights = PenaltyWeights::default();
/// let problem = DayProblem::new(fleet, Weekday::Monday, &rotation, &rules, &weights)?;
///
/// let config = GaConfig::default().with_population_size(6).with_generations(2);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let result = GaRunner::run(&problem, &config, &mut rng)?;
/// assert!(result.best_fitness <= 0);
/// # Ok::<(), u_roster::RosterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DayProblem<'a> {
    pub(crate) fleet: FleetProblem,
    pub(crate) weekday: Weekday,
    pub(crate) rules: &'a ShiftRules,
    pub(crate) pool: DriverPool,
    evaluator: FitnessEvaluator<'a>,
}

impl<'a> DayProblem<'a> {
    /// Creates the problem for `weekday`.
    ///
    /// # Errors
    /// [`RosterError::InvalidConfiguration`] if the fleet or day rules are
    /// invalid (empty fleet, non-positive tick, inconsistent shift rules).
    pub fn new(
        fleet: FleetProblem,
        weekday: Weekday,
        rotation: &DriverRotation,
        rules: &'a ShiftRules,
        weights: &'a PenaltyWeights,
    ) -> Result<Self, RosterError> {
        validate_day(&fleet, rules).map_err(RosterError::InvalidConfiguration)?;
        Ok(Self::from_validated(fleet, weekday, rotation, rules, weights))
    }

    /// Creates the problem from rules that already passed validation.
    pub(crate) fn from_validated(
        fleet: FleetProblem,
        weekday: Weekday,
        rotation: &DriverRotation,
        rules: &'a ShiftRules,
        weights: &'a PenaltyWeights,
    ) -> Self {
        Self {
            fleet,
            weekday,
            rules,
            pool: DriverPool::for_day(&fleet, rotation, weekday),
            evaluator: FitnessEvaluator::new(rules, weights, fleet.fleet_size, weekday),
        }
    }

    /// The weekday being optimized.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Drivers eligible on this weekday.
    #[inline]
    pub fn pool(&self) -> &DriverPool {
        &self.pool
    }

    /// The fitness evaluator for this weekday.
    #[inline]
    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }
}

impl GaProblem for DayProblem<'_> {
    type Individual = DaySchedule;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> DaySchedule {
        build_candidate(self, rng)
    }

    fn evaluate(&self, individual: &DaySchedule) -> i64 {
        self.evaluator.evaluate(individual)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &DaySchedule,
        parent2: &DaySchedule,
        rng: &mut R,
    ) -> (DaySchedule, DaySchedule) {
        tail_swap_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut DaySchedule, rng: &mut R) {
        reassign_driver_mutation(individual, &self.pool, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayHorizon;
    use crate::validation::ValidationErrorKind;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_weekday() {
        let fleet = FleetProblem::new(10, 5, 7);
        let rotation = DriverRotation::assign(7);
        let pool = DriverPool::for_day(&fleet, &rotation, Weekday::Monday);
        assert_eq!(pool.regular, vec![0, 1, 2, 3, 4]);
        assert_eq!(pool.flexible, vec![0, 3, 6]);
        assert_eq!(pool.of_kind(DriverKind::Flexible), &[0, 3, 6]);
    }

    #[test]
    fn test_pool_weekend_has_no_regular() {
        let fleet = FleetProblem::new(10, 5, 7);
        let rotation = DriverRotation::assign(7);
        let pool = DriverPool::for_day(&fleet, &rotation, Weekday::Sunday);
        assert!(pool.regular.is_empty());
        assert_eq!(pool.flexible, vec![0, 3, 6]);
    }

    #[test]
    fn test_create_population_size() {
        let fleet = FleetProblem::new(5, 3, 4);
        let rotation = DriverRotation::assign(4);
        let rules = ShiftRules::default();
        let weights = PenaltyWeights::default();
        let problem =
            DayProblem::new(fleet, Weekday::Tuesday, &rotation, &rules, &weights).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        let population = problem.create_population(8, &mut rng);
        assert_eq!(population.len(), 8);
        assert!(population.iter().all(|s| problem.evaluate(s) <= 0));
        assert_eq!(problem.weekday(), Weekday::Tuesday);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let fleet = FleetProblem::new(5, 3, 4);
        let rotation = DriverRotation::assign(4);
        let rules = ShiftRules::default().with_horizon(DayHorizon::new(360, 1620, 0));
        let weights = PenaltyWeights::default();

        let err = DayProblem::new(fleet, Weekday::Monday, &rotation, &rules, &weights).unwrap_err();
        match err {
            RosterError::InvalidConfiguration(errors) => {
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidTick));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_fleet_rejected() {
        let rotation = DriverRotation::assign(2);
        let rules = ShiftRules::default();
        let weights = PenaltyWeights::default();
        let result = DayProblem::new(
            FleetProblem::new(0, 1, 2),
            Weekday::Monday,
            &rotation,
            &rules,
            &weights,
        );
        assert!(result.is_err());
    }
}
