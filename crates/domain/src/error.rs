// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Period;

/// Errors that can occur during domain validation and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Staff name is empty after trimming.
    EmptyStaffName,
    /// Availability status string is not recognized.
    InvalidStatus(String),
    /// Week tag string is not recognized.
    InvalidWeekTag(String),
    /// Week-of-month value is out of range.
    WeekOutOfRange {
        /// The invalid week value.
        week: u8,
    },
    /// Weekday string is not recognized.
    InvalidWeekday(String),
    /// Time period string is not recognized.
    InvalidPeriod(String),
    /// Request category string is not recognized.
    InvalidCategory(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Roster month string is not of the form `YYYY-MM`.
    InvalidMonth(String),
    /// Version tag string is not `verN.0` or `final`.
    InvalidVersionTag(String),
    /// Slot key string is not of the form `H:MM(room)`.
    InvalidSlotKey(String),
    /// Slot time string is not one of the configured start times.
    InvalidSlotTime(String),
    /// A room number appears more than once within a time period.
    DuplicateRoom {
        /// The duplicated room number.
        room: u8,
        /// The time period in which it was duplicated.
        period: Period,
    },
    /// A time period does not have exactly one duty slot.
    DutySlotCount {
        /// The time period.
        period: Period,
        /// The number of duty slots found.
        count: usize,
    },
    /// A special day has no working staff listed.
    EmptySpecialDay {
        /// The special day's date.
        date: time::Date,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStaffName => write!(f, "Staff name cannot be empty"),
            Self::InvalidStatus(s) => write!(f, "Invalid availability status: '{s}'"),
            Self::InvalidWeekTag(s) => write!(f, "Invalid week tag: '{s}'"),
            Self::WeekOutOfRange { week } => {
                write!(f, "Week-of-month {week} is out of range (1-5)")
            }
            Self::InvalidWeekday(s) => write!(f, "Invalid weekday: '{s}'"),
            Self::InvalidPeriod(s) => write!(f, "Invalid time period: '{s}'"),
            Self::InvalidCategory(s) => write!(f, "Invalid request category: '{s}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidMonth(s) => write!(f, "Invalid roster month: '{s}' (expected YYYY-MM)"),
            Self::InvalidVersionTag(s) => {
                write!(f, "Invalid version tag: '{s}' (expected verN.0 or final)")
            }
            Self::InvalidSlotKey(s) => write!(f, "Invalid slot key: '{s}'"),
            Self::InvalidSlotTime(s) => write!(f, "Invalid slot start time: '{s}'"),
            Self::DuplicateRoom { room, period } => {
                write!(f, "Room {room} is configured more than once for {period}")
            }
            Self::DutySlotCount { period, count } => {
                write!(
                    f,
                    "Expected exactly one duty slot for {period}, found {count}"
                )
            }
            Self::EmptySpecialDay { date } => {
                write!(f, "Special day {date} has no working staff listed")
            }
        }
    }
}

impl std::error::Error for DomainError {}
