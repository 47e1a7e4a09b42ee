// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Ledger, StaffCounters, StaffName};

fn kim() -> StaffName {
    StaffName::new("Kim")
}

#[test]
fn test_counters_default_to_zero() {
    let ledger: Ledger = Ledger::new();
    let counters: StaffCounters = ledger.get(&kim());
    assert_eq!(counters.morning, 0);
    assert_eq!(counters.slot("8:30(1)"), 0);
}

#[test]
fn test_minus_saturates_at_zero() {
    let mut saved: Ledger = Ledger::new();
    saved.entry(&kim()).morning = 2;

    let mut contribution: Ledger = Ledger::new();
    contribution.entry(&kim()).morning = 5;

    let base: Ledger = saved.minus(&contribution);
    assert_eq!(base.get(&kim()).morning, 0);
}

#[test]
fn test_plus_merges_per_slot_counts() {
    let mut a: Ledger = Ledger::new();
    a.entry(&kim()).bump_slot("8:30(1)");

    let mut b: Ledger = Ledger::new();
    b.entry(&kim()).bump_slot("8:30(1)");
    b.entry(&kim()).bump_slot("10:00(12)");

    let sum: Ledger = a.plus(&b);
    assert_eq!(sum.get(&kim()).slot("8:30(1)"), 2);
    assert_eq!(sum.get(&kim()).slot("10:00(12)"), 1);
}

#[test]
fn test_roll_forward_law_is_idempotent() {
    // saved = base + old draft; re-deriving with a new draft twice gives
    // the same answer both times.
    let mut saved: Ledger = Ledger::new();
    saved.entry(&kim()).morning = 10;
    saved.entry(&kim()).early = 3;

    let mut old_contribution: Ledger = Ledger::new();
    old_contribution.entry(&kim()).morning = 4;
    old_contribution.entry(&kim()).early = 1;

    let mut draft: Ledger = Ledger::new();
    draft.entry(&kim()).morning = 5;

    let first: Ledger = saved.minus(&old_contribution).plus(&draft);
    let second: Ledger = saved.minus(&old_contribution).plus(&draft);

    assert_eq!(first, second);
    assert_eq!(first.get(&kim()).morning, 11);
    assert_eq!(first.get(&kim()).early, 2);
}
