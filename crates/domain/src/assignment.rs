// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::month::RosterMonth;
use crate::rooms::{ON_CALL_KEY, slot_period};
use crate::types::{Period, StaffName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Classifies how a calendar day was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayKind {
    /// A normal balanced weekday.
    Regular,
    /// A closure date: the row is entirely empty.
    Closure,
    /// A special (Saturday/holiday) day with an explicit roster.
    Special,
    /// A day with too few candidates to balance; listed verbatim.
    SmallTeam,
}

/// The shift assignments for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDay {
    /// How this day was scheduled.
    pub kind: DayKind,
    /// Staff working the morning shift.
    pub morning: Vec<StaffName>,
    /// Staff working the afternoon shift.
    pub afternoon: Vec<StaffName>,
    /// The morning on-call person, if one could be assigned.
    pub on_call: Option<StaffName>,
}

impl ShiftDay {
    /// Creates an empty day of the given kind.
    #[must_use]
    pub const fn empty(kind: DayKind) -> Self {
        Self {
            kind,
            morning: Vec::new(),
            afternoon: Vec::new(),
            on_call: None,
        }
    }

    /// Returns the workers for one period.
    #[must_use]
    pub fn workers(&self, period: Period) -> &[StaffName] {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
        }
    }

    /// Returns a mutable reference to the workers for one period.
    pub fn workers_mut(&mut self, period: Period) -> &mut Vec<StaffName> {
        match period {
            Period::Morning => &mut self.morning,
            Period::Afternoon => &mut self.afternoon,
        }
    }

    /// Returns whether the day has no assignments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty() && self.on_call.is_none()
    }
}

/// The shift roster for a month: one [`ShiftDay`] per scheduled date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTable {
    /// The month this table covers.
    pub month: RosterMonth,
    days: BTreeMap<Date, ShiftDay>,
}

impl ShiftTable {
    /// Creates an empty table for a month.
    #[must_use]
    pub const fn new(month: RosterMonth) -> Self {
        Self {
            month,
            days: BTreeMap::new(),
        }
    }

    /// Inserts or replaces the day row for a date.
    pub fn insert(&mut self, date: Date, day: ShiftDay) {
        self.days.insert(date, day);
    }

    /// Returns the day row for a date.
    #[must_use]
    pub fn day(&self, date: Date) -> Option<&ShiftDay> {
        self.days.get(&date)
    }

    /// Returns a mutable reference to the day row for a date.
    pub fn day_mut(&mut self, date: Date) -> Option<&mut ShiftDay> {
        self.days.get_mut(&date)
    }

    /// Iterates over (date, day) rows in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&Date, &ShiftDay)> {
        self.days.iter()
    }

    /// Returns whether the staff member works the given period on a date.
    #[must_use]
    pub fn works(&self, date: Date, period: Period, staff: &StaffName) -> bool {
        self.days
            .get(&date)
            .is_some_and(|day| day.workers(period).contains(staff))
    }
}

/// The room assignments for one calendar day, keyed by slot token.
///
/// Keys are slot tokens (`"8:30(3)"`) plus the literal on-call column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDay {
    cells: BTreeMap<String, StaffName>,
}

impl RoomDay {
    /// Creates an empty day.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a staff member to a slot, returning the previous occupant.
    pub fn assign(&mut self, key: &str, staff: StaffName) -> Option<StaffName> {
        self.cells.insert(key.to_owned(), staff)
    }

    /// Returns the occupant of a slot.
    #[must_use]
    pub fn occupant(&self, key: &str) -> Option<&StaffName> {
        self.cells.get(key)
    }

    /// Removes the occupant of a slot.
    pub fn clear(&mut self, key: &str) -> Option<StaffName> {
        self.cells.remove(key)
    }

    /// Returns every slot key the staff member occupies.
    #[must_use]
    pub fn keys_for(&self, staff: &StaffName) -> Vec<String> {
        self.cells
            .iter()
            .filter(|(_, occupant)| *occupant == staff)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Returns whether the staff member already holds a slot in the given
    /// period (the no-double-booking check).
    #[must_use]
    pub fn occupied_in_period(&self, staff: &StaffName, period: Period) -> bool {
        self.cells.iter().any(|(key, occupant)| {
            occupant == staff && key != ON_CALL_KEY && slot_period(key) == Some(period)
        })
    }

    /// Iterates over (slot key, occupant) cells in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StaffName)> {
        self.cells.iter()
    }

    /// Returns whether the day has no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The room roster for a month: one [`RoomDay`] per scheduled date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTable {
    /// The month this table covers.
    pub month: RosterMonth,
    days: BTreeMap<Date, RoomDay>,
}

impl RoomTable {
    /// Creates an empty table for a month.
    #[must_use]
    pub const fn new(month: RosterMonth) -> Self {
        Self {
            month,
            days: BTreeMap::new(),
        }
    }

    /// Inserts or replaces the day row for a date.
    pub fn insert(&mut self, date: Date, day: RoomDay) {
        self.days.insert(date, day);
    }

    /// Returns the day row for a date.
    #[must_use]
    pub fn day(&self, date: Date) -> Option<&RoomDay> {
        self.days.get(&date)
    }

    /// Returns a mutable reference to the day row for a date.
    pub fn day_mut(&mut self, date: Date) -> Option<&mut RoomDay> {
        self.days.get_mut(&date)
    }

    /// Iterates over (date, day) rows in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&Date, &RoomDay)> {
        self.days.iter()
    }
}
