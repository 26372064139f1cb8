//! Weekly roster orchestration.
//!
//! # Algorithm
//!
//! 1. Validate the configuration (fail fast).
//! 2. Assign the Flexible-driver rotation once.
//! 3. For each weekday, independently build a fresh population and run the
//!    genetic search; keep the best schedule and its driver set.
//!
//! Days share only read-only state, so they may run concurrently. Each day
//! gets its own `SmallRng` seeded from values drawn from the caller's RNG
//! in weekday order, which keeps results identical whether days run
//! sequentially or in parallel.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{info, instrument};

use super::kpi::RosterKpi;
use crate::config::{FleetProblem, GaConfig, PenaltyWeights, ShiftRules};
use crate::error::RosterError;
use crate::ga::{DayProblem, GaResult, GaRunner};
use crate::models::{DayRoster, DaySchedule, DriverRotation, Weekday, WeeklyResult};
use crate::validation::validate_config;

/// Optimizes a full week of rosters.
///
/// # Example
/// ```
/// use u_roster::config::{FleetProblem, GaConfig, ShiftRules};
/// use u_roster::models::Weekday;
/// use u_roster::scheduler::WeeklyScheduler;
///
/// let scheduler = WeeklyScheduler::new(
///     FleetProblem::new(4, 2, 3),
///     ShiftRules::default(),
///     GaConfig::default()
///         .with_population_size(6)
///         .with_generations(3)
///         .with_seed(42),
/// )
/// .unwrap();
///
/// let week = scheduler.run();
/// assert_eq!(week.days.len(), 7);
/// assert_eq!(week.days[0].weekday, Weekday::Monday);
/// ```
#[derive(Debug, Clone)]
pub struct WeeklyScheduler {
    problem: FleetProblem,
    rules: ShiftRules,
    weights: PenaltyWeights,
    config: GaConfig,
    rotation: DriverRotation,
}

impl WeeklyScheduler {
    /// Validates the configuration and assigns the driver rotation.
    ///
    /// # Errors
    /// [`RosterError::InvalidConfiguration`] listing every detected problem.
    pub fn new(
        problem: FleetProblem,
        rules: ShiftRules,
        config: GaConfig,
    ) -> Result<Self, RosterError> {
        validate_config(&problem, &rules, &config).map_err(RosterError::InvalidConfiguration)?;
        Ok(Self {
            rotation: DriverRotation::assign(problem.flexible_drivers),
            problem,
            rules,
            weights: PenaltyWeights::default(),
            config,
        })
    }

    /// Replaces the penalty weights.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The Flexible-driver rotation used for every day.
    pub fn rotation(&self) -> &DriverRotation {
        &self.rotation
    }

    /// The search parameters.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the week, seeded from `GaConfig::seed` or OS entropy.
    pub fn run(&self) -> WeeklyResult {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SmallRng::seed_from_u64(seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs the week with an explicit random source.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> WeeklyResult {
        info!(
            fleet_size = self.problem.fleet_size,
            regular_drivers = self.problem.regular_drivers,
            flexible_drivers = self.problem.flexible_drivers,
            parallel = self.config.parallel,
            "optimizing weekly roster"
        );

        let seeds: Vec<(Weekday, u64)> = Weekday::ALL
            .into_iter()
            .map(|day| (day, rng.random()))
            .collect();

        let days: Vec<DayRoster> = if self.config.parallel {
            seeds
                .par_iter()
                .map(|&(day, seed)| self.optimize_day(day, &mut SmallRng::seed_from_u64(seed)))
                .collect()
        } else {
            seeds
                .iter()
                .map(|&(day, seed)| self.optimize_day(day, &mut SmallRng::seed_from_u64(seed)))
                .collect()
        };

        let result = WeeklyResult { days };
        info!(total_fitness = result.total_fitness(), "weekly roster complete");
        result
    }

    /// Optimizes a single weekday.
    pub fn optimize_day<R: Rng>(&self, weekday: Weekday, rng: &mut R) -> DayRoster {
        let result = self.search_day(weekday, rng);
        DayRoster::new(weekday, result.best, result.best_fitness)
    }

    /// Runs the genetic search for one weekday and returns the full result.
    #[instrument(skip_all, fields(day = %weekday))]
    pub fn search_day<R: Rng>(&self, weekday: Weekday, rng: &mut R) -> GaResult<DaySchedule> {
        let problem = self.day_problem(weekday);
        let result = GaRunner::run_validated(&problem, &self.config, rng);
        info!(
            best_fitness = result.best_fitness,
            trips = result.best.len(),
            generations = result.generations,
            timed_out = result.timed_out,
            "day optimized"
        );
        result
    }

    /// The GA problem for one weekday.
    pub fn day_problem(&self, weekday: Weekday) -> DayProblem<'_> {
        DayProblem::from_validated(
            self.problem,
            weekday,
            &self.rotation,
            &self.rules,
            &self.weights,
        )
    }

    /// Quality indicators of a day roster.
    pub fn kpi(&self, roster: &DayRoster) -> RosterKpi {
        let problem = self.day_problem(roster.weekday);
        RosterKpi::calculate(&roster.schedule, problem.evaluator())
    }
}
