// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fairness ledger maintenance.
//!
//! A run produces a contribution ledger (what this month's tables add to
//! every counter). Saving a version rolls the cumulative ledger forward by
//! replacing the previously saved contribution with the new one, so
//! re-saving the same month never double-counts.

use endo_rota_domain::{
    Ledger, ON_CALL_KEY, Period, RoomLayout, RoomTable, ShiftTable, StaffCounters, parse_slot_key,
};

/// Computes the counter contribution of one month's tables.
///
/// Shift rows feed the morning/afternoon counts and the on-call column
/// feeds the morning duty count. Room cells feed the per-slot counts plus
/// the early/late/duty aggregates. The on-call room cell is skipped; the
/// shift table already counts it.
#[must_use]
pub fn contribution(shifts: &ShiftTable, rooms: &RoomTable, layout: &RoomLayout) -> Ledger {
    let mut ledger: Ledger = Ledger::new();

    for (_, day) in shifts.iter() {
        for staff in day.workers(Period::Morning) {
            ledger.entry(staff).morning += 1;
        }
        for staff in day.workers(Period::Afternoon) {
            ledger.entry(staff).afternoon += 1;
        }
        if let Some(on_call) = &day.on_call {
            ledger.entry(on_call).morning_duty += 1;
        }
    }

    let afternoon_duty_key: Option<String> =
        layout.duty_slot(Period::Afternoon).map(|slot| slot.key());
    for (_, day) in rooms.iter() {
        for (key, staff) in day.iter() {
            if key == ON_CALL_KEY {
                continue;
            }
            let counters: &mut StaffCounters = ledger.entry(staff);
            counters.bump_slot(key);
            if let Ok((time, _)) = parse_slot_key(key) {
                if time.is_early() {
                    counters.early += 1;
                }
                if time.is_late() {
                    counters.late += 1;
                }
            }
            if afternoon_duty_key.as_deref() == Some(key.as_str()) {
                counters.afternoon_duty += 1;
            }
        }
    }

    ledger
}

/// Rolls the cumulative ledger forward to reflect a new draft.
///
/// Subtracts the contribution recorded at the last save and adds the new
/// draft's contribution. Applying the same draft twice is a no-op, which
/// is what makes save idempotent.
#[must_use]
pub fn roll_forward(saved: &Ledger, saved_contribution: &Ledger, draft: &Ledger) -> Ledger {
    saved.minus(saved_contribution).plus(draft)
}
