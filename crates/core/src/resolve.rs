// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The availability resolver.
//!
//! Derives, for each weekday of the target month, the set of staff
//! available for each shift period, by merging the master weekly pattern
//! with one-off requests and institution-wide closures. No state is
//! retained between runs; everything is recomputed fresh.

use endo_rota_domain::{
    AvailabilityPattern, ClosureDate, Period, RequestCategory, RosterMonth, ShiftRequest,
    StaffName,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use time::{Date, Weekday};

/// The resolved availability of one staff member on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAvailability {
    /// Available for the morning shift.
    pub morning: bool,
    /// Available for the afternoon shift.
    pub afternoon: bool,
}

/// The available staff for one date, per period, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCandidates {
    /// Staff available for the morning shift.
    pub morning: Vec<StaffName>,
    /// Staff available for the afternoon shift.
    pub afternoon: Vec<StaffName>,
}

impl DayCandidates {
    /// Returns the candidates for one period.
    #[must_use]
    pub fn for_period(&self, period: Period) -> &[StaffName] {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
        }
    }
}

/// The resolved availability for a whole month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    /// The month this availability covers.
    pub month: RosterMonth,
    /// Candidates per regular weekday (closures excluded).
    pub days: BTreeMap<Date, DayCandidates>,
    /// The supplement pool: who could plausibly work a (weekday, period),
    /// derived from the pattern alone, independent of specific dates.
    pool: HashMap<(Weekday, Period), Vec<StaffName>>,
}

impl Availability {
    /// Returns the supplement pool for a (weekday, period).
    #[must_use]
    pub fn pool_for(&self, weekday: Weekday, period: Period) -> &[StaffName] {
        self.pool
            .get(&(weekday, period))
            .map_or(&[], Vec::as_slice)
    }
}

/// Resolves one staff member's availability on one date.
///
/// Precedence, in order:
///
/// 1. a closure date is unavailable for both periods, unconditionally;
/// 2. the base comes from the weekly pattern (every-week entry first,
///    then the week-of-month entry, defaulting to off);
/// 3. a vacation or conference request covering the date removes both
///    periods;
/// 4. a must-work request covering the date force-adds its period, even
///    over a vacation that covers the same date.
#[must_use]
pub fn resolve_day(
    staff: &StaffName,
    date: Date,
    month: &RosterMonth,
    pattern: &AvailabilityPattern,
    requests: &[ShiftRequest],
    closures: &HashSet<Date>,
) -> DayAvailability {
    if closures.contains(&date) {
        return DayAvailability {
            morning: false,
            afternoon: false,
        };
    }

    let status = pattern.status_for(staff, date.weekday(), month.week_of_month(date));
    let mut morning: bool = status.covers(Period::Morning);
    let mut afternoon: bool = status.covers(Period::Afternoon);

    for request in requests.iter().filter(|r| &r.staff == staff) {
        if request.category.removes_availability() && request.covers(date) {
            morning = false;
            afternoon = false;
        }
    }
    for request in requests.iter().filter(|r| &r.staff == staff) {
        if let RequestCategory::MustWork(period) = request.category {
            if request.covers(date) {
                match period {
                    Period::Morning => morning = true,
                    Period::Afternoon => afternoon = true,
                }
            }
        }
    }

    DayAvailability { morning, afternoon }
}

/// Resolves the availability of every staff member for every regular
/// weekday of the month.
///
/// Closure dates and weekends are excluded (weekends are only worked via
/// special-day schedules, which bypass the resolver entirely).
#[must_use]
pub fn resolve_month(
    month: &RosterMonth,
    pattern: &AvailabilityPattern,
    requests: &[ShiftRequest],
    closures: &[ClosureDate],
) -> Availability {
    let closure_set: HashSet<Date> = closures.iter().map(|c| c.0).collect();
    let staff_names: Vec<StaffName> = pattern.staff_names().into_iter().collect();

    let mut days: BTreeMap<Date, DayCandidates> = BTreeMap::new();
    for date in month.days() {
        if matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
            continue;
        }
        if closure_set.contains(&date) {
            continue;
        }
        let mut candidates: DayCandidates = DayCandidates::default();
        for staff in &staff_names {
            let available: DayAvailability =
                resolve_day(staff, date, month, pattern, requests, &closure_set);
            if available.morning {
                candidates.morning.push(staff.clone());
            }
            if available.afternoon {
                candidates.afternoon.push(staff.clone());
            }
        }
        days.insert(date, candidates);
    }

    let mut pool: HashMap<(Weekday, Period), Vec<StaffName>> = HashMap::new();
    for weekday in [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ] {
        for period in [Period::Morning, Period::Afternoon] {
            let members: Vec<StaffName> = staff_names
                .iter()
                .filter(|staff| {
                    (1..=5).any(|week| {
                        pattern.status_for(staff, weekday, week).covers(period)
                    })
                })
                .cloned()
                .collect();
            pool.insert((weekday, period), members);
        }
    }

    Availability { month: *month, days, pool }
}
