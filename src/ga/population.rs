//! Stochastic construction of initial candidates.
//!
//! # Algorithm
//!
//! Simulates the service day tick by tick. Each vehicle, Regular driver and
//! Flexible driver has a "free again at" time. At every tick, each free
//! vehicle draws a driver category uniformly and:
//!
//! 1. **Regular** (weekdays only): picks a free Regular driver. After lunch
//!    time, a driver who has not eaten takes lunch instead of a trip.
//! 2. **Flexible**: picks a free Flexible driver permitted by the rotation.
//!
//! A trip lasts the nominal length plus uniform jitter. It is dropped if a
//! Regular driver would end past the shift, if the driver already drives
//! an intersecting trip, or if it would run past the end of the day.
//!
//! Candidates are mostly but not fully valid; fitness penalizes the rest.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::trace;

use super::problem::DayProblem;
use crate::models::{DaySchedule, DriverId, DriverKind, Trip};

/// Outcome counters of one construction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub trips: usize,
    pub lunches: usize,
    /// Draws with no eligible free driver.
    pub no_driver: usize,
    /// Trips dropped by a shift, overlap or end-of-day rule.
    pub rejected: usize,
}

/// Builds one candidate schedule for the problem's weekday.
pub fn build_candidate<R: Rng>(problem: &DayProblem<'_>, rng: &mut R) -> DaySchedule {
    build_candidate_with_stats(problem, rng).0
}

/// Builds one candidate and reports what happened during construction.
pub fn build_candidate_with_stats<R: Rng>(
    problem: &DayProblem<'_>,
    rng: &mut R,
) -> (DaySchedule, BuildStats) {
    let rules = problem.rules;
    let horizon = rules.horizon;
    let weekend = problem.weekday().is_weekend();
    let regular_count = if weekend { 0 } else { problem.fleet.regular_drivers as usize };

    let mut schedule = DaySchedule::new();
    let mut stats = BuildStats::default();

    let mut vehicle_free = vec![horizon.start_min; problem.fleet.fleet_size as usize];
    let mut regular_free = vec![rules.regular_shift.start_min; regular_count];
    let mut regular_lunch = vec![false; regular_count];
    let mut flexible_free = vec![0i64; problem.fleet.flexible_drivers as usize];
    let mut candidates: Vec<u32> = Vec::new();

    let mut clock = horizon.start_min;
    while clock < horizon.end_min {
        for vehicle in 0..vehicle_free.len() {
            if vehicle_free[vehicle] > clock {
                continue;
            }

            let kind = if rng.random_bool(0.5) {
                DriverKind::Regular
            } else {
                DriverKind::Flexible
            };
            if kind == DriverKind::Regular && weekend {
                continue;
            }

            candidates.clear();
            let free_at = match kind {
                DriverKind::Regular => &regular_free,
                DriverKind::Flexible => &flexible_free,
            };
            candidates.extend(
                problem
                    .pool()
                    .of_kind(kind)
                    .iter()
                    .copied()
                    .filter(|&i| free_at.get(i as usize).is_some_and(|&free| free <= clock)),
            );
            let Some(&index) = candidates.choose(rng) else {
                stats.no_driver += 1;
                continue;
            };

            if kind == DriverKind::Regular
                && clock >= rules.lunch_after_min
                && !regular_lunch[index as usize]
            {
                let lunch_end = clock + rules.lunch_duration_min;
                regular_free[index as usize] = lunch_end + rules.lunch_recovery_min;
                regular_lunch[index as usize] = true;
                vehicle_free[vehicle] = lunch_end + rules.vehicle_turnaround_min;
                stats.lunches += 1;
                continue;
            }

            let driver = DriverId::new(kind, index);
            let duration = rules.trip_duration_min
                + rng.random_range(-rules.trip_jitter_min..=rules.trip_jitter_min);
            let end = clock + duration;

            if (kind == DriverKind::Regular && end > rules.regular_shift.end_min)
                || end > horizon.end_min
                || schedule.driver_busy(driver, clock, end)
            {
                stats.rejected += 1;
                continue;
            }

            schedule.add_trip(Trip::new(vehicle as u32 + 1, driver, clock, end));
            stats.trips += 1;
            vehicle_free[vehicle] = end + rules.vehicle_turnaround_min;
            match kind {
                DriverKind::Regular => regular_free[index as usize] = end,
                DriverKind::Flexible => {
                    flexible_free[index as usize] = end + rules.flexible_rest_min
                }
            }
        }
        clock += horizon.tick_min;
    }

    trace!(
        weekday = %problem.weekday(),
        trips = stats.trips,
        lunches = stats.lunches,
        no_driver = stats.no_driver,
        rejected = stats.rejected,
        "built candidate"
    );
    (schedule, stats)
}
