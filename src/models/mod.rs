//! Rostering domain models.
//!
//! Provides the core data types for representing the weekly bus and driver
//! rostering problem and its solutions.
//!
//! # Domain Mappings
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Trip` | vehicle × driver × interval |
//! | `DaySchedule` | one candidate roster for a day |
//! | `DriverId` | a Regular or Flexible driver |
//! | `DriverRotation` | permitted working weekdays of Flexible drivers |
//! | `WeeklyResult` | best roster per weekday |

mod calendar;
mod driver;
mod roster;
mod rotation;
mod schedule;

pub use calendar::{
    format_clock, DayHorizon, TimeWindow, Weekday, MINUTES_PER_DAY, MINUTES_PER_HOUR,
};
pub use driver::{DriverId, DriverKind};
pub use roster::{DayRoster, WeeklyResult};
pub use rotation::{DriverRotation, ROTATION_STRIDE};
pub use schedule::{DaySchedule, Trip, TripRow};
