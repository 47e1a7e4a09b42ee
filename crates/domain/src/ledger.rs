// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::StaffName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cumulative fairness counters for one staff member.
///
/// Counters are monotonic within a period and carried month-to-month as
/// the base for the next period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffCounters {
    /// Morning shifts worked.
    pub morning: u32,
    /// Afternoon shifts worked.
    pub afternoon: u32,
    /// Early-room (8:30) assignments.
    pub early: u32,
    /// Late-room (10:00) assignments.
    pub late: u32,
    /// Morning on-call assignments.
    pub morning_duty: u32,
    /// Afternoon duty-room assignments.
    pub afternoon_duty: u32,
    /// Assignments per concrete slot key (e.g. `"8:30(3)"`).
    pub per_slot: BTreeMap<String, u32>,
}

impl StaffCounters {
    /// Returns the count for one concrete slot key.
    #[must_use]
    pub fn slot(&self, key: &str) -> u32 {
        self.per_slot.get(key).copied().unwrap_or(0)
    }

    /// Increments the count for one concrete slot key.
    pub fn bump_slot(&mut self, key: &str) {
        *self.per_slot.entry(key.to_owned()).or_insert(0) += 1;
    }

    /// Element-wise saturating subtraction.
    #[must_use]
    pub fn minus(&self, other: &Self) -> Self {
        let mut per_slot: BTreeMap<String, u32> = self.per_slot.clone();
        for (key, value) in &other.per_slot {
            let entry: &mut u32 = per_slot.entry(key.clone()).or_insert(0);
            *entry = entry.saturating_sub(*value);
        }
        Self {
            morning: self.morning.saturating_sub(other.morning),
            afternoon: self.afternoon.saturating_sub(other.afternoon),
            early: self.early.saturating_sub(other.early),
            late: self.late.saturating_sub(other.late),
            morning_duty: self.morning_duty.saturating_sub(other.morning_duty),
            afternoon_duty: self.afternoon_duty.saturating_sub(other.afternoon_duty),
            per_slot,
        }
    }

    /// Element-wise addition.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut per_slot: BTreeMap<String, u32> = self.per_slot.clone();
        for (key, value) in &other.per_slot {
            *per_slot.entry(key.clone()).or_insert(0) += value;
        }
        Self {
            morning: self.morning + other.morning,
            afternoon: self.afternoon + other.afternoon,
            early: self.early + other.early,
            late: self.late + other.late,
            morning_duty: self.morning_duty + other.morning_duty,
            afternoon_duty: self.afternoon_duty + other.afternoon_duty,
            per_slot,
        }
    }
}

/// The fairness ledger: cumulative counters per staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    counters: BTreeMap<StaffName, StaffCounters>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counters for a staff member, defaulting to zeroes.
    #[must_use]
    pub fn get(&self, staff: &StaffName) -> StaffCounters {
        self.counters.get(staff).cloned().unwrap_or_default()
    }

    /// Returns a mutable reference to a staff member's counters, creating
    /// a zeroed entry on first access.
    pub fn entry(&mut self, staff: &StaffName) -> &mut StaffCounters {
        self.counters.entry(staff.clone()).or_default()
    }

    /// Replaces the counters for a staff member.
    pub fn insert(&mut self, staff: StaffName, counters: StaffCounters) {
        self.counters.insert(staff, counters);
    }

    /// Iterates over (staff, counters) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&StaffName, &StaffCounters)> {
        self.counters.iter()
    }

    /// Returns every staff name in the ledger.
    #[must_use]
    pub fn staff_names(&self) -> Vec<StaffName> {
        self.counters.keys().cloned().collect()
    }

    /// Returns whether the ledger has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Element-wise saturating subtraction over the union of staff.
    #[must_use]
    pub fn minus(&self, other: &Self) -> Self {
        let mut result: Self = self.clone();
        for (staff, counters) in &other.counters {
            let base: StaffCounters = result.get(staff);
            result.insert(staff.clone(), base.minus(counters));
        }
        result
    }

    /// Element-wise addition over the union of staff.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut result: Self = self.clone();
        for (staff, counters) in &other.counters {
            let base: StaffCounters = result.get(staff);
            result.insert(staff.clone(), base.plus(counters));
        }
        result
    }
}
