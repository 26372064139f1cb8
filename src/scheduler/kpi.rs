//! Roster quality metrics (KPIs).
//!
//! Summarizes a day schedule alongside the penalty breakdown that produced
//! its fitness.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Trip count | Number of trips |
//! | Vehicles used | Distinct vehicles with at least one trip |
//! | Drivers | Distinct Regular / Flexible drivers working |
//! | Duty | Sum of trip lengths (minutes) |
//! | Uncovered ticks | Ticks with fewer vehicles on the road than required |
//! | Coverage rate | Fraction of ticks meeting the requirement |

use serde::{Deserialize, Serialize};

use crate::ga::{FitnessBreakdown, FitnessEvaluator};
use crate::models::DaySchedule;

/// Day roster performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterKpi {
    pub trip_count: usize,
    pub vehicles_used: usize,
    pub regular_drivers: usize,
    pub flexible_drivers: usize,
    /// Sum of trip lengths (minutes).
    pub total_duty_min: i64,
    /// Ticks where fewer vehicles ran than required.
    pub uncovered_ticks: usize,
    /// Fraction of ticks meeting the requirement (0.0..1.0).
    pub coverage_rate: f64,
    /// Penalties by category.
    pub penalties: FitnessBreakdown,
}

impl RosterKpi {
    /// Computes KPIs of `schedule` under the evaluator's day rules.
    pub fn calculate(schedule: &DaySchedule, evaluator: &FitnessEvaluator<'_>) -> Self {
        let drivers = schedule.drivers();
        let regular_drivers = drivers.iter().filter(|d| d.is_regular()).count();

        let active = evaluator.active_per_tick(schedule);
        let uncovered_ticks = active
            .iter()
            .zip(evaluator.required())
            .filter(|&(&count, &required)| count < required)
            .count();
        let coverage_rate = if active.is_empty() {
            1.0
        } else {
            (active.len() - uncovered_ticks) as f64 / active.len() as f64
        };

        Self {
            trip_count: schedule.len(),
            vehicles_used: schedule.vehicles().len(),
            regular_drivers,
            flexible_drivers: drivers.len() - regular_drivers,
            total_duty_min: schedule.total_duty_min(),
            uncovered_ticks,
            coverage_rate,
            penalties: evaluator.breakdown(schedule),
        }
    }

    /// Whether no penalty of any kind was charged.
    pub fn is_clean(&self) -> bool {
        self.penalties.total() == 0
    }
}
