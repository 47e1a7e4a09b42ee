// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AvailabilityStatus, StaffName, WeekTag};
use std::collections::{BTreeMap, BTreeSet};
use time::Weekday;

/// The availability entry for one (staff, weekday) pair.
///
/// Either a single every-week status exists, or one status per
/// week-of-month. The two forms never mix for the same pair.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WeekEntries {
    /// One status that applies to every week of the month.
    Every(AvailabilityStatus),
    /// One status per week-of-month (1-5).
    ByWeek(BTreeMap<u8, AvailabilityStatus>),
}

/// The master weekly availability pattern for a roster period.
///
/// Lookup resolves the every-week entry first, then the per-week entry for
/// the date's week-of-month, and defaults to [`AvailabilityStatus::Off`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityPattern {
    // Keyed by (staff, days-from-Monday) so the map stays ordered.
    entries: BTreeMap<(StaffName, u8), WeekEntries>,
}

const fn weekday_index(weekday: Weekday) -> u8 {
    weekday.number_days_from_monday()
}

const fn index_weekday(index: u8) -> Weekday {
    match index {
        0 => Weekday::Monday,
        1 => Weekday::Tuesday,
        2 => Weekday::Wednesday,
        3 => Weekday::Thursday,
        4 => Weekday::Friday,
        5 => Weekday::Saturday,
        _ => Weekday::Sunday,
    }
}

impl AvailabilityPattern {
    /// Creates an empty pattern.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry for one (staff, weekday, week tag).
    ///
    /// An every-week entry replaces any per-week entries for the pair, and
    /// a per-week entry replaces an existing every-week entry.
    pub fn set(
        &mut self,
        staff: StaffName,
        weekday: Weekday,
        week: WeekTag,
        status: AvailabilityStatus,
    ) {
        let key: (StaffName, u8) = (staff, weekday_index(weekday));
        match week {
            WeekTag::EveryWeek => {
                self.entries.insert(key, WeekEntries::Every(status));
            }
            WeekTag::Week(n) => match self.entries.get_mut(&key) {
                Some(WeekEntries::ByWeek(map)) => {
                    map.insert(n, status);
                }
                _ => {
                    let mut map: BTreeMap<u8, AvailabilityStatus> = BTreeMap::new();
                    map.insert(n, status);
                    self.entries.insert(key, WeekEntries::ByWeek(map));
                }
            },
        }
    }

    /// Resolves the status for a staff member on a weekday in a given
    /// week-of-month.
    #[must_use]
    pub fn status_for(
        &self,
        staff: &StaffName,
        weekday: Weekday,
        week_of_month: u8,
    ) -> AvailabilityStatus {
        match self.entries.get(&(staff.clone(), weekday_index(weekday))) {
            Some(WeekEntries::Every(status)) => *status,
            Some(WeekEntries::ByWeek(map)) => {
                map.get(&week_of_month).copied().unwrap_or_default()
            }
            None => AvailabilityStatus::default(),
        }
    }

    /// Collapses per-week entries to an every-week entry where every week
    /// in the month carries the same status.
    pub fn collapse(&mut self, weeks_in_month: u8) {
        for entry in self.entries.values_mut() {
            if let WeekEntries::ByWeek(map) = entry {
                if map.len() == usize::from(weeks_in_month) {
                    let mut statuses = map.values();
                    if let Some(first) = statuses.next().copied() {
                        if statuses.all(|s| *s == first) {
                            *entry = WeekEntries::Every(first);
                        }
                    }
                }
            }
        }
    }

    /// Returns every (staff, weekday) pair whose per-week entries do not
    /// cover all weeks of the month.
    ///
    /// Partial coverage is not an error (uncovered weeks resolve to `Off`),
    /// but it is reported so an operator can spot an accidental gap.
    #[must_use]
    pub fn coverage_gaps(&self, weeks_in_month: u8) -> Vec<(StaffName, Weekday)> {
        self.entries
            .iter()
            .filter_map(|((staff, weekday), entry)| match entry {
                WeekEntries::ByWeek(map) if map.len() < usize::from(weeks_in_month) => {
                    Some((staff.clone(), index_weekday(*weekday)))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns every staff name appearing in the pattern.
    #[must_use]
    pub fn staff_names(&self) -> BTreeSet<StaffName> {
        self.entries.keys().map(|(staff, _)| staff.clone()).collect()
    }

    /// Returns the raw rows of this pattern for persistence.
    #[must_use]
    pub fn rows(&self) -> Vec<(StaffName, Weekday, WeekTag, AvailabilityStatus)> {
        let mut rows: Vec<(StaffName, Weekday, WeekTag, AvailabilityStatus)> = Vec::new();
        for ((staff, weekday), entry) in &self.entries {
            let weekday: Weekday = index_weekday(*weekday);
            match entry {
                WeekEntries::Every(status) => {
                    rows.push((staff.clone(), weekday, WeekTag::EveryWeek, *status));
                }
                WeekEntries::ByWeek(map) => {
                    for (week, status) in map {
                        rows.push((staff.clone(), weekday, WeekTag::Week(*week), *status));
                    }
                }
            }
        }
        rows
    }

    /// Returns whether the pattern has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
