// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Month, Weekday};

/// Represents a target scheduling month.
///
/// All engine runs are scoped to a single `RosterMonth`. The string form is
/// machine-oriented (`"2025-11"`); it is used in persisted sheet names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterMonth {
    /// The calendar year.
    year: i32,
    /// The calendar month.
    month: Month,
}

impl RosterMonth {
    /// Creates a new `RosterMonth`.
    #[must_use]
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the calendar month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns every calendar date in this month, in order.
    #[must_use]
    pub fn days(&self) -> Vec<Date> {
        (1..=31)
            .filter_map(|day: u8| Date::from_calendar_date(self.year, self.month, day).ok())
            .collect()
    }

    /// Returns whether the given date falls inside this month.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the 1-based week-of-month for a date in this month.
    ///
    /// Weeks run Monday through Sunday, and the week containing the 1st is
    /// week 1.
    #[must_use]
    pub fn week_of_month(&self, date: Date) -> u8 {
        let first_weekday: Weekday = self
            .days()
            .first()
            .map_or(Weekday::Monday, |d| d.weekday());
        let offset: u16 = u16::from(first_weekday.number_days_from_monday());
        let day: u16 = u16::from(date.day());
        u8::try_from((day - 1 + offset) / 7 + 1).unwrap_or(5)
    }

    /// Returns the number of distinct week-of-month values in this month.
    #[must_use]
    pub fn week_count(&self) -> u8 {
        self.days()
            .last()
            .map_or(4, |last: &Date| self.week_of_month(*last))
    }

    /// Returns the month immediately following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self.month {
            Month::December => Self {
                year: self.year + 1,
                month: Month::January,
            },
            _ => Self {
                year: self.year,
                month: self.month.next(),
            },
        }
    }
}

impl FromStr for RosterMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(s.to_owned());
        let (year_s, month_s) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year_s.parse().map_err(|_| invalid())?;
        let month_num: u8 = month_s.parse().map_err(|_| invalid())?;
        let month: Month = Month::try_from(month_num).map_err(|_| invalid())?;
        Ok(Self { year, month })
    }
}

impl std::fmt::Display for RosterMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}
