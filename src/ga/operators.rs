//! Genetic operators for day schedules.
//!
//! - [`tail_swap_crossover`]: one-point crossover with an independent cut
//!   in each parent; children swap tails.
//! - [`reassign_driver_mutation`]: moves one random trip to another eligible
//!   driver of the same category, unless that driver is busy then.
//!
//! The probability gates (crossover rate, mutation rate) live in the search
//! loop; these functions always apply the operator.

use rand::prelude::IndexedRandom;
use rand::Rng;

use super::problem::DriverPool;
use crate::models::{DaySchedule, DriverId};

/// One-point crossover with independent cut points.
///
/// With cuts `i` in parent 1 and `j` in parent 2:
/// - child 1 = `p1[..i] ++ p2[j..]`
/// - child 2 = `p2[..j] ++ p1[i..]`
///
/// If either parent is empty, the children are copies of the parents.
pub fn tail_swap_crossover<R: Rng>(
    p1: &DaySchedule,
    p2: &DaySchedule,
    rng: &mut R,
) -> (DaySchedule, DaySchedule) {
    if p1.is_empty() || p2.is_empty() {
        return (p1.clone(), p2.clone());
    }
    let cut1 = rng.random_range(0..p1.len());
    let cut2 = rng.random_range(0..p2.len());

    let (head1, tail1) = p1.trips.split_at(cut1);
    let (head2, tail2) = p2.trips.split_at(cut2);

    let child1 = DaySchedule::from_trips([head1, tail2].concat());
    let child2 = DaySchedule::from_trips([head2, tail1].concat());
    (child1, child2)
}

/// Reassigns one random trip to another eligible driver.
///
/// The replacement is drawn from the same category in `pool`. The change is
/// rejected if the new driver already drives an intersecting trip (drawing
/// the current driver counts as busy). Returns whether the schedule changed.
pub fn reassign_driver_mutation<R: Rng>(
    schedule: &mut DaySchedule,
    pool: &DriverPool,
    rng: &mut R,
) -> bool {
    if schedule.is_empty() {
        return false;
    }
    let idx = rng.random_range(0..schedule.len());
    let trip = schedule.trips[idx];

    let Some(&index) = pool.of_kind(trip.driver_kind()).choose(rng) else {
        return false;
    };
    let driver = DriverId::new(trip.driver_kind(), index);
    if schedule.driver_busy(driver, trip.start_min, trip.end_min) {
        return false;
    }

    schedule.trips[idx].driver = driver;
    true
}
