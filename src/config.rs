//! Problem input, day rules, penalty weights and GA parameters.
//!
//! Every structure is immutable once handed to the scheduler. Defaults
//! are the standard operating rules:
//!
//! | Rule | Default |
//! |------|---------|
//! | Service day | 06:00 to 03:00 (+1), 5-minute ticks |
//! | Peak windows | 07:00-09:00, 17:00-19:00 (weekdays) |
//! | Required load | 70% of fleet at peak, 30% otherwise |
//! | Trip length | 60 ± 10 minutes |
//! | Regular shift | 08:00-17:00, lunch after 12:00 |
//! | Flexible duty cap | 120 minutes, reset by a 15-minute rest |
//! | Population / generations | 50 / 100 |
//! | Mutation / crossover rate | 0.1 / 0.5 |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{DayHorizon, TimeWindow, Weekday, MINUTES_PER_DAY};

/// Fleet and workforce sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetProblem {
    /// Number of vehicles (must be > 0).
    pub fleet_size: u32,
    /// Number of Regular drivers.
    pub regular_drivers: u32,
    /// Number of Flexible drivers.
    pub flexible_drivers: u32,
}

impl FleetProblem {
    /// Creates a problem.
    pub fn new(fleet_size: u32, regular_drivers: u32, flexible_drivers: u32) -> Self {
        Self {
            fleet_size,
            regular_drivers,
            flexible_drivers,
        }
    }
}

/// Operating rules for one service day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRules {
    /// Sampled service day.
    pub horizon: DayHorizon,
    /// Weekday peak windows (minute of day).
    pub peak_windows: Vec<TimeWindow>,
    /// Fraction of the fleet required on the road at peak.
    pub peak_load: f64,
    /// Fraction of the fleet required on the road otherwise.
    pub normal_load: f64,
    /// Nominal trip length (minutes).
    pub trip_duration_min: i64,
    /// Uniform jitter applied to the trip length (± minutes).
    pub trip_jitter_min: i64,
    /// Vehicle turnaround after a trip or lunch (minutes).
    pub vehicle_turnaround_min: i64,
    /// Regular drivers' working window.
    pub regular_shift: TimeWindow,
    /// Earliest lunch start for Regular drivers.
    pub lunch_after_min: i64,
    /// Lunch length (minutes).
    pub lunch_duration_min: i64,
    /// Extra unavailability after lunch before the next trip (minutes).
    pub lunch_recovery_min: i64,
    /// Rest that breaks a Flexible driver's continuous duty (minutes).
    pub flexible_rest_min: i64,
    /// Continuous duty a Flexible driver may accumulate (minutes).
    pub flexible_max_duty_min: i64,
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self {
            horizon: DayHorizon::default(),
            peak_windows: vec![TimeWindow::from_hours(7, 9), TimeWindow::from_hours(17, 19)],
            peak_load: 0.7,
            normal_load: 0.3,
            trip_duration_min: 60,
            trip_jitter_min: 10,
            vehicle_turnaround_min: 15,
            regular_shift: TimeWindow::from_hours(8, 17),
            lunch_after_min: 12 * 60,
            lunch_duration_min: 60,
            lunch_recovery_min: 60,
            flexible_rest_min: 15,
            flexible_max_duty_min: 120,
        }
    }
}

impl ShiftRules {
    /// Sets the service day.
    pub fn with_horizon(mut self, horizon: DayHorizon) -> Self {
        self.horizon = horizon;
        self
    }

    /// Replaces the peak windows.
    pub fn with_peak_windows(mut self, windows: Vec<TimeWindow>) -> Self {
        self.peak_windows = windows;
        self
    }

    /// Sets peak and off-peak load fractions.
    pub fn with_loads(mut self, peak_load: f64, normal_load: f64) -> Self {
        self.peak_load = peak_load;
        self.normal_load = normal_load;
        self
    }

    /// Whether `minute` is a peak minute on `day`. Weekends are never peak.
    ///
    /// Minutes past midnight are folded onto the clock (26:00 → 02:00).
    pub fn is_peak(&self, minute: i64, day: Weekday) -> bool {
        if day.is_weekend() {
            return false;
        }
        let clock = minute.rem_euclid(MINUTES_PER_DAY);
        self.peak_windows.iter().any(|w| w.contains(clock))
    }

    /// Vehicles required on the road, `floor(fleet × load)`.
    pub fn required_vehicles(&self, fleet_size: u32, peak: bool) -> usize {
        let load = if peak { self.peak_load } else { self.normal_load };
        (fleet_size as f64 * load).floor() as usize
    }
}

/// Penalty charged per detected violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Per repeated (vehicle, driver, start, end) tuple.
    pub duplicate_trip: i64,
    /// Per Regular trip outside the Regular shift.
    pub regular_hours: i64,
    /// Once per Regular driver working after lunch time.
    pub missing_lunch: i64,
    /// Per intersecting pair of one driver's trips.
    pub overlap: i64,
    /// Per missing vehicle per tick.
    pub coverage_shortfall: i64,
    /// Per continuous-duty cap breach of a Flexible driver.
    pub continuous_duty: i64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            duplicate_trip: 100,
            regular_hours: 10,
            missing_lunch: 20,
            overlap: 5,
            coverage_shortfall: 2,
            continuous_duty: 10,
        }
    }
}

/// Genetic search parameters.
///
/// # Example
/// ```
/// use u_roster::config::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_generations(10)
///     .with_seed(42)
///     .with_parallel(false);
/// assert_eq!(config.survivor_count(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Candidates per generation (must be >= 2).
    pub population_size: usize,
    /// Number of generations.
    pub generations: usize,
    /// Per-child mutation probability.
    pub mutation_rate: f64,
    /// Per-pair crossover probability.
    pub crossover_rate: f64,
    /// Seed for reproducible runs; OS entropy when `None`.
    pub seed: Option<u64>,
    /// Optimize weekdays concurrently.
    pub parallel: bool,
    /// Wall-clock cap per day search; checked between generations.
    pub time_limit: Option<Duration>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.1,
            crossover_rate: 0.5,
            seed: None,
            parallel: true,
            time_limit: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables concurrent weekdays.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Caps the wall-clock time of each day search.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Candidates kept by selection: `population_size / 2`.
    #[inline]
    pub fn survivor_count(&self) -> usize {
        self.population_size / 2
    }
}
