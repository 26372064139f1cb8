//! Driver model.
//!
//! Drivers come in two categories:
//! - **Regular** (`A`): fixed daytime shift on weekdays, one lunch break.
//! - **Flexible** (`B`): works only on rotation-assigned days, subject to a
//!   continuous-duty cap instead of a lunch rule.
//!
//! Internally a driver is a tagged `(kind, index)` pair. The string form
//! (`"A3"`, `"B5"`, 1-based) exists only at the serialization boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

/// Driver category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DriverKind {
    /// Fixed daytime driver, weekdays only.
    Regular,
    /// Rotation-bound driver, no lunch rule.
    Flexible,
}

impl DriverKind {
    /// Id prefix letter.
    pub fn letter(self) -> char {
        match self {
            DriverKind::Regular => 'A',
            DriverKind::Flexible => 'B',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(DriverKind::Regular),
            'B' => Some(DriverKind::Flexible),
            _ => None,
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverKind::Regular => f.write_str("Regular"),
            DriverKind::Flexible => f.write_str("Flexible"),
        }
    }
}

/// Unique driver identifier across both categories.
///
/// Ordered by kind, then index, so Regular drivers sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverId {
    /// Driver category.
    pub kind: DriverKind,
    /// Zero-based index within the category.
    pub index: u32,
}

impl DriverId {
    /// Creates a driver id.
    pub fn new(kind: DriverKind, index: u32) -> Self {
        Self { kind, index }
    }

    /// Regular driver with a zero-based index.
    pub fn regular(index: u32) -> Self {
        Self::new(DriverKind::Regular, index)
    }

    /// Flexible driver with a zero-based index.
    pub fn flexible(index: u32) -> Self {
        Self::new(DriverKind::Flexible, index)
    }

    /// Whether this is a Regular driver.
    #[inline]
    pub fn is_regular(&self) -> bool {
        self.kind == DriverKind::Regular
    }

    /// Whether this is a Flexible driver.
    #[inline]
    pub fn is_flexible(&self) -> bool {
        self.kind == DriverKind::Flexible
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.letter(), self.index + 1)
    }
}

impl FromStr for DriverId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RosterError::InvalidDriverId(s.to_string());
        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(DriverKind::from_letter)
            .ok_or_else(invalid)?;
        let number: u32 = chars.as_str().parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }
        Ok(Self::new(kind, number - 1))
    }
}

impl Serialize for DriverId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DriverId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
