//! Rest-day rotation for Flexible drivers.
//!
//! Each Flexible driver works every third day of the week, starting at an
//! offset of `index mod 3`. Across all drivers this spreads the workforce
//! evenly: every weekday has roughly a third of the Flexible drivers.
//!
//! | index mod 3 | Permitted days |
//! |-------------|----------------|
//! | 0 | Mon, Thu, Sun |
//! | 1 | Tue, Fri |
//! | 2 | Wed, Sat |

use serde::{Deserialize, Serialize};

use super::Weekday;

/// Spacing between consecutive working days of one driver.
pub const ROTATION_STRIDE: usize = 3;

/// Permitted weekdays per Flexible driver.
///
/// Computed once per weekly run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRotation {
    /// `days[i][d]`: driver `i` may work on weekday `d`.
    days: Vec<[bool; Weekday::COUNT]>,
}

impl DriverRotation {
    /// Assigns permitted days to `flexible_count` drivers.
    pub fn assign(flexible_count: u32) -> Self {
        let days = (0..flexible_count as usize)
            .map(|i| {
                let mut permitted = [false; Weekday::COUNT];
                for day in (i % ROTATION_STRIDE..Weekday::COUNT).step_by(ROTATION_STRIDE) {
                    permitted[day] = true;
                }
                permitted
            })
            .collect();
        Self { days }
    }

    /// Number of Flexible drivers covered.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether there are no Flexible drivers.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether driver `index` may work on `day`. Unknown drivers may not.
    #[inline]
    pub fn permits(&self, index: u32, day: Weekday) -> bool {
        self.days
            .get(index as usize)
            .is_some_and(|permitted| permitted[day.index()])
    }

    /// Permitted weekdays of driver `index`, in week order.
    pub fn permitted_days(&self, index: u32) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|&day| self.permits(index, day))
            .collect()
    }

    /// Indices of drivers eligible on `day`, ascending.
    pub fn eligible_on(&self, day: Weekday) -> Vec<u32> {
        (0..self.days.len() as u32)
            .filter(|&i| self.permits(i, day))
            .collect()
    }
}
