//! Constraint-penalty fitness for day schedules.
//!
//! Fitness is the negated sum of independent penalties; 0 means no detected
//! violation and the search maximizes it.
//!
//! | Check | Charge |
//! |-------|--------|
//! | Repeated (vehicle, driver, start, end) tuple | per repeat |
//! | Regular trip starting before / ending after the Regular shift | per trip |
//! | Regular driver working at or after lunch time | once per driver |
//! | Intersecting trips of one driver | per pair |
//! | Vehicles on the road below requirement | per missing vehicle per tick |
//! | Flexible continuous duty above the cap | per breach |
//!
//! Overlaps are found by a forward scan: each trip is compared against the
//! earlier trips of the same driver only, so every intersecting pair is
//! charged exactly once.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::{PenaltyWeights, ShiftRules};
use crate::models::{DayHorizon, DaySchedule, DriverId, Trip, Weekday};

/// Per-category penalty totals of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub duplicate: i64,
    pub regular_hours: i64,
    pub missing_lunch: i64,
    pub overlap: i64,
    pub coverage: i64,
    pub continuous_duty: i64,
}

impl FitnessBreakdown {
    /// Total penalty.
    pub fn total(&self) -> i64 {
        self.duplicate
            + self.regular_hours
            + self.missing_lunch
            + self.overlap
            + self.coverage
            + self.continuous_duty
    }

    /// Fitness value (`-total`).
    #[inline]
    pub fn fitness(&self) -> i64 {
        -self.total()
    }
}

/// Scores candidate schedules for one weekday.
///
/// Per-tick vehicle requirements are resolved once at construction, so
/// repeated evaluations only walk the trips.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    rules: &'a ShiftRules,
    weights: &'a PenaltyWeights,
    required: Vec<usize>,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator for a fleet on a weekday.
    pub fn new(
        rules: &'a ShiftRules,
        weights: &'a PenaltyWeights,
        fleet_size: u32,
        weekday: Weekday,
    ) -> Self {
        let required = rules
            .horizon
            .ticks()
            .map(|t| rules.required_vehicles(fleet_size, rules.is_peak(t, weekday)))
            .collect();
        Self {
            rules,
            weights,
            required,
        }
    }

    /// Sampled service day.
    #[inline]
    pub fn horizon(&self) -> &DayHorizon {
        &self.rules.horizon
    }

    /// Vehicles required at each tick.
    #[inline]
    pub fn required(&self) -> &[usize] {
        &self.required
    }

    /// Fitness of a schedule (≤ 0, higher is better).
    pub fn evaluate(&self, schedule: &DaySchedule) -> i64 {
        self.breakdown(schedule).fitness()
    }

    /// Trips on the road at each tick.
    pub fn active_per_tick(&self, schedule: &DaySchedule) -> Vec<usize> {
        let horizon = self.horizon();
        let mut active = vec![0usize; self.required.len()];
        for trip in &schedule.trips {
            for slot in &mut active[horizon.tick_range(trip.start_min, trip.end_min)] {
                *slot += 1;
            }
        }
        active
    }

    /// Scores a schedule category by category.
    pub fn breakdown(&self, schedule: &DaySchedule) -> FitnessBreakdown {
        let rules = self.rules;
        let w = self.weights;
        let mut out = FitnessBreakdown::default();

        let mut seen: HashSet<&Trip> = HashSet::with_capacity(schedule.len());
        let mut lunch_charged: HashSet<DriverId> = HashSet::new();
        let mut intervals: HashMap<DriverId, Vec<(i64, i64)>> = HashMap::new();

        for trip in &schedule.trips {
            if !seen.insert(trip) {
                out.duplicate += w.duplicate_trip;
            }

            if trip.driver.is_regular() {
                if trip.start_min < rules.regular_shift.start_min
                    || trip.end_min > rules.regular_shift.end_min
                {
                    out.regular_hours += w.regular_hours;
                }
                if trip.start_min >= rules.lunch_after_min && lunch_charged.insert(trip.driver) {
                    out.missing_lunch += w.missing_lunch;
                }
            }

            let earlier = intervals.entry(trip.driver).or_default();
            let clashes = earlier
                .iter()
                .filter(|&&(start, end)| trip.overlaps(start, end))
                .count() as i64;
            out.overlap += clashes * w.overlap;
            earlier.push((trip.start_min, trip.end_min));
        }

        let active = self.active_per_tick(schedule);
        out.coverage = active
            .iter()
            .zip(&self.required)
            .map(|(&count, &required)| required.saturating_sub(count) as i64)
            .sum::<i64>()
            * w.coverage_shortfall;

        for (driver, trips) in &mut intervals {
            if driver.is_flexible() {
                out.continuous_duty += self.duty_breaches(trips) * w.continuous_duty;
            }
        }

        out
    }

    /// Counts continuous-duty cap breaches of one Flexible driver.
    ///
    /// Duty accumulates across gaps shorter than the rest period and resets
    /// to the current trip's length after a long enough rest. A breach
    /// resets the accumulator to zero.
    fn duty_breaches(&self, trips: &mut [(i64, i64)]) -> i64 {
        trips.sort_by_key(|&(start, _)| start);

        let mut breaches = 0;
        let mut continuous = 0;
        let mut last_end: Option<i64> = None;
        for &(start, end) in trips.iter() {
            let duration = end - start;
            continuous = match last_end {
                Some(prev) if start - prev < self.rules.flexible_rest_min => continuous + duration,
                _ => duration,
            };
            if continuous > self.rules.flexible_max_duty_min {
                breaches += 1;
                continuous = 0;
            }
            last_end = Some(end);
        }
        breaches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rules whose day is a single off-peak tick at 03:00, so coverage
    /// never contributes and other penalties can be checked in isolation.
    fn quiet_rules() -> ShiftRules {
        ShiftRules::default().with_horizon(DayHorizon::new(3 * 60, 3 * 60 + 5, 5))
    }

    fn trip(driver: DriverId, start_min: i64, end_min: i64) -> Trip {
        Trip::new(1, driver, start_min, end_min)
    }

    fn score(rules: &ShiftRules, trips: Vec<Trip>) -> FitnessBreakdown {
        let weights = PenaltyWeights::default();
        let evaluator = FitnessEvaluator::new(rules, &weights, 1, Weekday::Monday);
        evaluator.breakdown(&DaySchedule::from_trips(trips))
    }

    #[test]
    fn test_empty_schedule_only_coverage() {
        let rules = ShiftRules::default();
        let b = score(&rules, vec![]);
        assert_eq!(b.total(), b.coverage);
    }

    #[test]
    fn test_overlap_counted_once_per_pair() {
        let rules = quiet_rules();
        let a1 = DriverId::regular(0);
        let b = score(&rules, vec![trip(a1, 0, 60), trip(a1, 30, 90)]);
        assert_eq!(b.overlap, 5);
    }

    #[test]
    fn test_overlap_three_way() {
        let rules = quiet_rules();
        let b1 = DriverId::flexible(0);
        let b = score(
            &rules,
            vec![trip(b1, 600, 660), trip(b1, 610, 670), trip(b1, 620, 680)],
        );
        assert_eq!(b.overlap, 15);
    }

    #[test]
    fn test_touching_trips_do_not_overlap() {
        let rules = quiet_rules();
        let b1 = DriverId::flexible(0);
        let b = score(&rules, vec![trip(b1, 600, 660), trip(b1, 660, 700)]);
        assert_eq!(b.overlap, 0);
    }

    #[test]
    fn test_duplicate_trip() {
        let rules = quiet_rules();
        let b1 = DriverId::flexible(0);
        let t = trip(b1, 600, 660);
        let b = score(&rules, vec![t, t, t]);
        assert_eq!(b.duplicate, 200);
        // Identical intervals also intersect pairwise
        assert_eq!(b.overlap, 15);
    }

    #[test]
    fn test_regular_hours() {
        let rules = quiet_rules();
        let a1 = DriverId::regular(0);
        let b = score(
            &rules,
            vec![trip(a1, 7 * 60, 8 * 60), trip(a1, 9 * 60, 10 * 60), trip(a1, 16 * 60 + 30, 17 * 60 + 20)],
        );
        assert_eq!(b.regular_hours, 20);
    }

    #[test]
    fn test_missing_lunch_single_trip() {
        let rules = quiet_rules();
        let b = score(&rules, vec![trip(DriverId::regular(0), 13 * 60, 14 * 60)]);
        assert_eq!(b.missing_lunch, 20);
        assert_eq!(b.regular_hours, 0);
    }

    #[test]
    fn test_missing_lunch_charged_once_per_driver() {
        let rules = quiet_rules();
        let a1 = DriverId::regular(0);
        let b = score(
            &rules,
            vec![trip(a1, 8 * 60, 9 * 60), trip(a1, 13 * 60, 14 * 60), trip(a1, 15 * 60, 16 * 60)],
        );
        assert_eq!(b.missing_lunch, 20);

        let b = score(
            &rules,
            vec![trip(a1, 13 * 60, 14 * 60), trip(DriverId::regular(1), 13 * 60, 14 * 60)],
        );
        assert_eq!(b.missing_lunch, 40);
    }

    #[test]
    fn test_flexible_not_charged_for_lunch() {
        let rules = quiet_rules();
        let b = score(&rules, vec![trip(DriverId::flexible(0), 13 * 60, 14 * 60)]);
        assert_eq!(b.missing_lunch, 0);
        assert_eq!(b.regular_hours, 0);
    }

    #[test]
    fn test_coverage_shortfall_at_peak() {
        // One peak tick at 08:00 on a Monday, fleet of 10 → 7 required
        let rules = ShiftRules::default().with_horizon(DayHorizon::new(8 * 60, 8 * 60 + 5, 5));
        let weights = PenaltyWeights::default();
        let evaluator = FitnessEvaluator::new(&rules, &weights, 10, Weekday::Monday);
        assert_eq!(evaluator.required(), &[7]);

        let schedule = DaySchedule::from_trips(vec![
            Trip::new(1, DriverId::flexible(0), 8 * 60, 9 * 60),
            Trip::new(2, DriverId::flexible(1), 8 * 60, 9 * 60),
        ]);
        let b = evaluator.breakdown(&schedule);
        assert_eq!(b.coverage, (7 - 2) * 2);
    }

    #[test]
    fn test_coverage_normal_and_weekend() {
        let rules = ShiftRules::default().with_horizon(DayHorizon::new(8 * 60, 8 * 60 + 5, 5));
        let weights = PenaltyWeights::default();
        let saturday = FitnessEvaluator::new(&rules, &weights, 10, Weekday::Saturday);
        assert_eq!(saturday.required(), &[3]);
        assert_eq!(saturday.breakdown(&DaySchedule::new()).coverage, 6);
    }

    #[test]
    fn test_coverage_ignores_ticks_outside_day() {
        let rules = ShiftRules::default();
        let weights = PenaltyWeights::default();
        let evaluator = FitnessEvaluator::new(&rules, &weights, 10, Weekday::Monday);
        let empty = evaluator.breakdown(&DaySchedule::new()).coverage;
        // A trip entirely before 06:00 does not reduce the shortfall
        let early = DaySchedule::from_trips(vec![Trip::new(1, DriverId::flexible(0), 0, 60)]);
        assert_eq!(evaluator.breakdown(&early).coverage, empty);
        // A trip at 06:00-07:00 covers 12 off-peak ticks
        let morning = DaySchedule::from_trips(vec![Trip::new(1, DriverId::flexible(0), 360, 420)]);
        assert_eq!(evaluator.breakdown(&morning).coverage, empty - 12 * 2);
    }

    #[test]
    fn test_flexible_continuous_duty() {
        let rules = quiet_rules();
        let b1 = DriverId::flexible(0);
        // 60 + 60 back to back with a 10-minute gap → 120, not above the cap
        let b = score(&rules, vec![trip(b1, 600, 660), trip(b1, 670, 730)]);
        assert_eq!(b.continuous_duty, 0);

        // Third trip after a 5-minute gap pushes it to 180 → one breach
        let b = score(
            &rules,
            vec![trip(b1, 600, 660), trip(b1, 670, 730), trip(b1, 735, 795)],
        );
        assert_eq!(b.continuous_duty, 10);
    }

    #[test]
    fn test_flexible_rest_resets_duty() {
        let rules = quiet_rules();
        let b1 = DriverId::flexible(0);
        // 15-minute gaps reset the accumulator every time
        let b = score(
            &rules,
            vec![trip(b1, 600, 670), trip(b1, 685, 755), trip(b1, 770, 840)],
        );
        assert_eq!(b.continuous_duty, 0);
    }

    #[test]
    fn test_flexible_duty_sorted_by_start() {
        let rules = quiet_rules();
        let b1 = DriverId::flexible(0);
        // Same trips as the breach case, listed out of order
        let b = score(
            &rules,
            vec![trip(b1, 735, 795), trip(b1, 600, 660), trip(b1, 670, 730)],
        );
        assert_eq!(b.continuous_duty, 10);
    }

    #[test]
    fn test_regular_driver_has_no_duty_cap() {
        let rules = quiet_rules();
        let a1 = DriverId::regular(0);
        let b = score(
            &rules,
            vec![trip(a1, 480, 540), trip(a1, 545, 605), trip(a1, 610, 670)],
        );
        assert_eq!(b.continuous_duty, 0);
    }

    #[test]
    fn test_fitness_is_negated_total() {
        let rules = quiet_rules();
        let weights = PenaltyWeights::default();
        let evaluator = FitnessEvaluator::new(&rules, &weights, 1, Weekday::Monday);
        let a1 = DriverId::regular(0);
        let schedule = DaySchedule::from_trips(vec![trip(a1, 0, 60), trip(a1, 30, 90)]);
        let b = evaluator.breakdown(&schedule);
        assert_eq!(evaluator.evaluate(&schedule), -b.total());
        assert!(evaluator.evaluate(&schedule) < 0);
    }
}
