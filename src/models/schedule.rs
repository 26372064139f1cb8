//! Trip and day-schedule (candidate solution) model.
//!
//! A day schedule is a collection of trips, each binding one vehicle to
//! one driver for a time interval. It may contain violations (overlapping
//! driver assignments, shift breaches); these are penalized by the fitness
//! evaluator rather than rejected here.
//!
//! Trip order carries no meaning except as the cut axis of crossover.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{format_clock, DriverId, DriverKind};

/// One vehicle driven by one driver over `[start_min, end_min)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trip {
    /// Vehicle number (1-based).
    pub vehicle: u32,
    /// Assigned driver.
    pub driver: DriverId,
    /// Start (minutes from midnight).
    pub start_min: i64,
    /// End (minutes from midnight, exclusive).
    pub end_min: i64,
}

impl Trip {
    /// Creates a new trip.
    pub fn new(vehicle: u32, driver: DriverId, start_min: i64, end_min: i64) -> Self {
        Self {
            vehicle,
            driver,
            start_min,
            end_min,
        }
    }

    /// Driver category of this trip.
    #[inline]
    pub fn driver_kind(&self) -> DriverKind {
        self.driver.kind
    }

    /// Trip length (minutes).
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Whether this trip intersects `[start_min, end_min)`.
    #[inline]
    pub fn overlaps(&self, start_min: i64, end_min: i64) -> bool {
        !(self.end_min <= start_min || self.start_min >= end_min)
    }

    /// Whether the trip is in progress at `minute`.
    #[inline]
    pub fn is_active_at(&self, minute: i64) -> bool {
        self.start_min <= minute && minute < self.end_min
    }
}

/// One display row of a day schedule.
///
/// Carries everything a table renderer needs: vehicle, driver type and id,
/// clock strings and how many trips were running when this one started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRow {
    pub vehicle: u32,
    pub driver_type: DriverKind,
    pub driver_id: String,
    /// Start as `HH:MM` (24h rollover).
    pub start: String,
    /// End as `HH:MM` (24h rollover).
    pub end: String,
    /// Trips in progress at this trip's start, itself included.
    pub active_at_start: usize,
}

/// A full day's roster (candidate schedule).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Trips in insertion order.
    pub trips: Vec<Trip>,
}

impl DaySchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from trips.
    pub fn from_trips(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    /// Appends a trip.
    pub fn add_trip(&mut self, trip: Trip) {
        self.trips.push(trip);
    }

    /// Number of trips.
    #[inline]
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the schedule has no trips.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Whether `driver` already drives something intersecting `[start, end)`.
    pub fn driver_busy(&self, driver: DriverId, start_min: i64, end_min: i64) -> bool {
        self.trips
            .iter()
            .any(|t| t.driver == driver && t.overlaps(start_min, end_min))
    }

    /// Trips of one driver, in schedule order.
    pub fn trips_for_driver(&self, driver: DriverId) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.driver == driver).collect()
    }

    /// Distinct drivers appearing in the schedule.
    pub fn drivers(&self) -> BTreeSet<DriverId> {
        self.trips.iter().map(|t| t.driver).collect()
    }

    /// Distinct vehicles appearing in the schedule.
    pub fn vehicles(&self) -> BTreeSet<u32> {
        self.trips.iter().map(|t| t.vehicle).collect()
    }

    /// Number of trips in progress at `minute`.
    pub fn active_at(&self, minute: i64) -> usize {
        self.trips.iter().filter(|t| t.is_active_at(minute)).count()
    }

    /// Total driven minutes.
    pub fn total_duty_min(&self) -> i64 {
        self.trips.iter().map(Trip::duration_min).sum()
    }

    /// Display rows sorted by start time.
    pub fn rows(&self) -> Vec<TripRow> {
        let mut sorted: Vec<&Trip> = self.trips.iter().collect();
        sorted.sort_by_key(|t| t.start_min);

        sorted
            .iter()
            .map(|t| TripRow {
                vehicle: t.vehicle,
                driver_type: t.driver_kind(),
                driver_id: t.driver.to_string(),
                start: format_clock(t.start_min),
                end: format_clock(t.end_min),
                active_at_start: self.active_at(t.start_min),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> DaySchedule {
        let mut s = DaySchedule::new();
        s.add_trip(Trip::new(1, DriverId::regular(0), 480, 540));
        s.add_trip(Trip::new(2, DriverId::flexible(0), 500, 560));
        s.add_trip(Trip::new(1, DriverId::regular(0), 560, 620));
        s
    }

    #[test]
    fn test_trip_overlap() {
        let t = Trip::new(1, DriverId::regular(0), 0, 60);
        assert!(t.overlaps(30, 90));
        assert!(!t.overlaps(60, 120));
        assert!(t.is_active_at(0));
        assert!(!t.is_active_at(60));
        assert_eq!(t.duration_min(), 60);
    }

    #[test]
    fn test_driver_busy() {
        let s = sample_schedule();
        assert!(s.driver_busy(DriverId::regular(0), 530, 590));
        assert!(!s.driver_busy(DriverId::regular(0), 540, 560));
        assert!(!s.driver_busy(DriverId::regular(1), 480, 540));
    }

    #[test]
    fn test_drivers_and_vehicles() {
        let s = sample_schedule();
        let drivers: Vec<_> = s.drivers().into_iter().collect();
        assert_eq!(drivers, vec![DriverId::regular(0), DriverId::flexible(0)]);
        assert_eq!(s.vehicles().len(), 2);
        assert_eq!(s.trips_for_driver(DriverId::regular(0)).len(), 2);
    }

    #[test]
    fn test_active_at() {
        let s = sample_schedule();
        assert_eq!(s.active_at(510), 2);
        assert_eq!(s.active_at(540), 1);
        assert_eq!(s.active_at(700), 0);
        assert_eq!(s.total_duty_min(), 180);
    }

    #[test]
    fn test_rows_sorted_with_active_count() {
        let mut s = sample_schedule();
        s.add_trip(Trip::new(3, DriverId::flexible(1), 1560, 1620));
        let rows = s.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].start, "08:00");
        assert_eq!(rows[0].active_at_start, 1);
        assert_eq!(rows[1].driver_id, "B1");
        assert_eq!(rows[1].active_at_start, 2);
        assert_eq!(rows[3].start, "02:00");
        assert_eq!(rows[3].end, "03:00");
    }

    #[test]
    fn test_empty_schedule() {
        let s = DaySchedule::new();
        assert!(s.is_empty());
        assert!(s.drivers().is_empty());
        assert!(s.rows().is_empty());
    }
}
