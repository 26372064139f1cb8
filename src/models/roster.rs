//! Weekly roster (optimization result).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{DaySchedule, DriverId, Weekday};

/// Best schedule found for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRoster {
    /// The weekday this roster is for.
    pub weekday: Weekday,
    /// Best-found schedule.
    pub schedule: DaySchedule,
    /// Distinct drivers appearing in `schedule`.
    pub drivers: BTreeSet<DriverId>,
    /// Fitness of `schedule` (0 = no detected violations).
    pub fitness: i64,
}

impl DayRoster {
    /// Builds a roster, deriving the driver set from the schedule.
    pub fn new(weekday: Weekday, schedule: DaySchedule, fitness: i64) -> Self {
        let drivers = schedule.drivers();
        Self {
            weekday,
            schedule,
            drivers,
            fitness,
        }
    }
}

/// One best schedule per weekday, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyResult {
    pub days: Vec<DayRoster>,
}

impl WeeklyResult {
    /// Roster of a weekday, if it was computed.
    pub fn day(&self, weekday: Weekday) -> Option<&DayRoster> {
        self.days.iter().find(|d| d.weekday == weekday)
    }

    /// Schedule of a weekday.
    pub fn schedule_for(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.day(weekday).map(|d| &d.schedule)
    }

    /// Drivers who work on a weekday (empty if the day is absent).
    pub fn drivers_on(&self, weekday: Weekday) -> BTreeSet<DriverId> {
        self.day(weekday)
            .map(|d| d.drivers.clone())
            .unwrap_or_default()
    }

    /// Sum of daily fitness values.
    pub fn total_fitness(&self) -> i64 {
        self.days.iter().map(|d| d.fitness).sum()
    }
}
