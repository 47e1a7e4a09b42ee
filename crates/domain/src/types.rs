// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a staff member's name.
///
/// The name is the sole identifier for a staff member within a roster
/// period. Names are trimmed on construction; equality is on the trimmed
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaffName {
    /// The trimmed name value.
    value: String,
}

impl StaffName {
    /// Creates a new `StaffName`.
    ///
    /// # Arguments
    ///
    /// * `value` - The name (surrounding whitespace is removed)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_owned(),
        }
    }

    /// Returns the name value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether the name is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Display for StaffName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents one of the two daily shift periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    /// The morning shift.
    Morning,
    /// The afternoon shift.
    Afternoon,
}

impl Period {
    /// Converts this period to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
        }
    }

    /// Returns the other period.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Morning => Self::Afternoon,
            Self::Afternoon => Self::Morning,
        }
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            _ => Err(DomainError::InvalidPeriod(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the weekly availability of one staff member on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    /// Available for the morning shift only.
    Morning,
    /// Available for the afternoon shift only.
    Afternoon,
    /// Available for both shifts.
    Both,
    /// Not available.
    #[default]
    Off,
}

impl AvailabilityStatus {
    /// Returns whether this status covers the given period.
    #[must_use]
    pub const fn covers(&self, period: Period) -> bool {
        matches!(
            (self, period),
            (Self::Morning | Self::Both, Period::Morning)
                | (Self::Afternoon | Self::Both, Period::Afternoon)
        )
    }

    /// Converts this status to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Both => "Morning&Afternoon",
            Self::Off => "None",
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Morning" => Ok(Self::Morning),
            "Afternoon" => Ok(Self::Afternoon),
            "Morning&Afternoon" => Ok(Self::Both),
            "None" => Ok(Self::Off),
            _ => Err(DomainError::InvalidStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies which weeks of the month an availability row applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekTag {
    /// The row applies to every week of the month.
    EveryWeek,
    /// The row applies to a single week-of-month (1-5).
    Week(u8),
}

impl WeekTag {
    /// Converts this tag to its persisted string representation.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::EveryWeek => String::from("every"),
            Self::Week(n) => format!("week{n}"),
        }
    }
}

impl FromStr for WeekTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "every" {
            return Ok(Self::EveryWeek);
        }
        if let Some(num) = s.strip_prefix("week") {
            let week: u8 = num
                .parse()
                .map_err(|_| DomainError::InvalidWeekTag(s.to_owned()))?;
            if (1..=5).contains(&week) {
                return Ok(Self::Week(week));
            }
            return Err(DomainError::WeekOutOfRange { week });
        }
        Err(DomainError::InvalidWeekTag(s.to_owned()))
    }
}

impl std::fmt::Display for WeekTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// A calendar date on which the unit is closed.
///
/// No shift or room assignment is generated for a closure date, overriding
/// every pattern and request that touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClosureDate(pub time::Date);

/// A non-regular working day (Saturday or holiday) with an explicit roster.
///
/// Special days bypass the shift balancer: the listed staff work, and the
/// duty person (if any) is seated first in the designated duty room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDay {
    /// The calendar date.
    pub date: time::Date,
    /// The staff working this day.
    pub staff: Vec<StaffName>,
    /// The designated duty person, if any. Must be one of `staff`.
    pub duty: Option<StaffName>,
}
