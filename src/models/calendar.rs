//! Day timeline and weekday model.
//!
//! A service day runs from a start offset to an end offset measured in
//! minutes from midnight. The end may pass midnight (e.g. 27:00 = 03:00 on
//! the following calendar day). The timeline is sampled in fixed ticks,
//! both for coverage accounting and for the construction simulation.
//!
//! # Time Model
//! All times are minutes relative to midnight of the service day.
//! Intervals are half-open: `[start, end)`.

use serde::{Deserialize, Serialize};

/// Minutes per hour.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Minutes per calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// A time interval [start, end) in minutes from midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (minutes, inclusive).
    pub start_min: i64,
    /// Interval end (minutes, exclusive).
    pub end_min: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_min: i64, end_min: i64) -> Self {
        Self { start_min, end_min }
    }

    /// Creates a window from whole hours, e.g. `from_hours(7, 9)`.
    pub fn from_hours(start_hour: i64, end_hour: i64) -> Self {
        Self::new(start_hour * MINUTES_PER_HOUR, end_hour * MINUTES_PER_HOUR)
    }

    /// Duration of this window (minutes).
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Whether a minute falls within this window.
    #[inline]
    pub fn contains(&self, minute: i64) -> bool {
        minute >= self.start_min && minute < self.end_min
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in roster order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Number of days in the planning week.
    pub const COUNT: usize = 7;

    /// Zero-based position in the week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weekday at a zero-based position, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Saturday and Sunday.
    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Short label ("Mon", "Tue", ...).
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The sampled service day.
///
/// Ticks are `start_min, start_min + tick_min, ...` strictly below
/// `end_min`. Anything outside `[start_min, end_min)` is not sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHorizon {
    /// First minute of service (default 06:00).
    pub start_min: i64,
    /// End of service, exclusive (default 27:00).
    pub end_min: i64,
    /// Sampling step (default 5 minutes).
    pub tick_min: i64,
}

impl Default for DayHorizon {
    fn default() -> Self {
        Self {
            start_min: 6 * MINUTES_PER_HOUR,
            end_min: 27 * MINUTES_PER_HOUR,
            tick_min: 5,
        }
    }
}

impl DayHorizon {
    /// Creates a horizon.
    pub fn new(start_min: i64, end_min: i64, tick_min: i64) -> Self {
        Self {
            start_min,
            end_min,
            tick_min,
        }
    }

    /// Length of the service day (minutes).
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Number of sampled ticks.
    pub fn tick_count(&self) -> usize {
        if self.tick_min <= 0 || self.end_min <= self.start_min {
            return 0;
        }
        ((self.duration_min() + self.tick_min - 1) / self.tick_min) as usize
    }

    /// Iterates the sampled ticks in order.
    pub fn ticks(&self) -> impl Iterator<Item = i64> {
        let start = self.start_min;
        let step = self.tick_min;
        (0..self.tick_count() as i64).map(move |i| start + i * step)
    }

    /// Tick index range `[first, last)` covered by an interval `[start, end)`.
    ///
    /// A tick `t` is covered iff `start <= t < end`. The interval is clipped
    /// to the horizon, so ranges never index outside the tick grid.
    pub fn tick_range(&self, start_min: i64, end_min: i64) -> std::ops::Range<usize> {
        let count = self.tick_count();
        if count == 0 {
            return 0..0;
        }
        let lo = start_min.max(self.start_min) - self.start_min;
        let hi = end_min.min(self.end_min) - self.start_min;
        if hi <= lo {
            return 0..0;
        }
        let first = div_ceil(lo, self.tick_min) as usize;
        let last = (div_ceil(hi, self.tick_min) as usize).min(count);
        first.min(last)..last
    }
}

fn div_ceil(value: i64, step: i64) -> i64 {
    (value + step - 1) / step
}

/// Formats minutes from midnight as a 24-hour clock, rolling past midnight.
///
/// ```
/// use u_roster::models::format_clock;
///
/// assert_eq!(format_clock(6 * 60), "06:00");
/// assert_eq!(format_clock(26 * 60 + 10), "02:10");
/// ```
pub fn format_clock(minute: i64) -> String {
    let minute = minute.rem_euclid(MINUTES_PER_DAY);
    format!(
        "{:02}:{:02}",
        minute / MINUTES_PER_HOUR,
        minute % MINUTES_PER_HOUR
    )
}
