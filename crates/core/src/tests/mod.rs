// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod allocate_tests;
mod balance_tests;
mod resolve_tests;
mod swap_tests;
mod version_tests;

use endo_rota_domain::{
    AvailabilityPattern, AvailabilityStatus, RosterMonth, StaffName, WeekTag,
};
use time::{Date, Month, Weekday};

/// November 2025: the 1st is a Saturday, weekdays start on the 3rd.
pub fn november() -> RosterMonth {
    RosterMonth::new(2025, Month::November)
}

pub fn date(day: u8) -> Date {
    Date::from_calendar_date(2025, Month::November, day).unwrap()
}

pub fn staff(name: &str) -> StaffName {
    StaffName::new(name)
}

/// A pattern where every named staff member works both periods every
/// weekday of every week.
pub fn full_pattern(names: &[&str]) -> AvailabilityPattern {
    let mut pattern: AvailabilityPattern = AvailabilityPattern::new();
    for name in names {
        for weekday in [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ] {
            pattern.set(
                staff(name),
                weekday,
                WeekTag::EveryWeek,
                AvailabilityStatus::Both,
            );
        }
    }
    pattern
}
