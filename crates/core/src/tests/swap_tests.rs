// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{date, november, staff};
use crate::swap::{SwapOutcome, SwapRejection, SwapRequest, SwapTarget, apply_swaps};
use endo_rota_domain::{
    DayKind, ON_CALL_KEY, Period, RoomDay, RoomTable, ShiftDay, ShiftTable,
};

fn sample_tables() -> (ShiftTable, RoomTable) {
    let mut shift_day: ShiftDay = ShiftDay::empty(DayKind::Regular);
    shift_day.morning = vec![staff("A"), staff("B"), staff("C")];
    shift_day.afternoon = vec![staff("A"), staff("C")];
    shift_day.on_call = Some(staff("A"));
    let mut shifts: ShiftTable = ShiftTable::new(november());
    shifts.insert(date(3), shift_day);

    let mut room_day: RoomDay = RoomDay::new();
    room_day.assign("8:30(1)", staff("A"));
    room_day.assign("9:00(4)", staff("B"));
    room_day.assign("9:30(7)", staff("C"));
    room_day.assign("13:30(1)", staff("A"));
    room_day.assign("13:30(2)", staff("C"));
    room_day.assign(ON_CALL_KEY, staff("A"));
    let mut rooms: RoomTable = RoomTable::new(november());
    rooms.insert(date(3), room_day);

    (shifts, rooms)
}

fn swap_request(before: &str, after: &str, target: SwapTarget) -> SwapRequest {
    SwapRequest {
        id: String::from("swap-1"),
        requester: staff(before),
        person_before: staff(before),
        person_after: staff(after),
        date: date(3),
        target,
    }
}

#[test]
fn test_on_call_swap_exchanges_whole_days() {
    let (mut shifts, mut rooms) = sample_tables();
    let swaps: Vec<SwapRequest> =
        vec![swap_request("A", "B", SwapTarget::Period(Period::Morning))];

    let outcomes: Vec<SwapOutcome> = apply_swaps(&mut shifts, &mut rooms, &swaps);
    assert!(matches!(outcomes[0], SwapOutcome::Applied { .. }));

    let room_day = rooms.day(date(3)).unwrap();
    assert_eq!(room_day.occupant("8:30(1)"), Some(&staff("B")));
    assert_eq!(room_day.occupant("9:00(4)"), Some(&staff("A")));
    assert_eq!(room_day.occupant("13:30(1)"), Some(&staff("B")));
    assert_eq!(room_day.occupant(ON_CALL_KEY), Some(&staff("B")));

    let shift_day = shifts.day(date(3)).unwrap();
    assert_eq!(shift_day.on_call, Some(staff("B")));
    // B inherits A's afternoon membership, A inherits B's absence.
    assert!(shift_day.afternoon.contains(&staff("B")));
    assert!(!shift_day.afternoon.contains(&staff("A")));
}

#[test]
fn test_slot_swap_moves_the_cell() {
    let (mut shifts, mut rooms) = sample_tables();
    let swaps: Vec<SwapRequest> = vec![swap_request(
        "B",
        "D",
        SwapTarget::Slot(String::from("9:00(4)")),
    )];

    let outcomes: Vec<SwapOutcome> = apply_swaps(&mut shifts, &mut rooms, &swaps);
    assert!(matches!(outcomes[0], SwapOutcome::Applied { .. }));

    let room_day = rooms.day(date(3)).unwrap();
    assert_eq!(room_day.occupant("9:00(4)"), Some(&staff("D")));

    let shift_day = shifts.day(date(3)).unwrap();
    assert!(shift_day.morning.contains(&staff("D")));
    assert!(!shift_day.morning.contains(&staff("B")));
}

#[test]
fn test_slot_swap_rejects_wrong_holder() {
    let (mut shifts, mut rooms) = sample_tables();
    let swaps: Vec<SwapRequest> = vec![swap_request(
        "C",
        "D",
        SwapTarget::Slot(String::from("9:00(4)")),
    )];

    let outcomes: Vec<SwapOutcome> = apply_swaps(&mut shifts, &mut rooms, &swaps);
    assert_eq!(
        outcomes[0],
        SwapOutcome::Rejected {
            reason: SwapRejection::SourceNotFound
        }
    );
    // Nothing moved.
    assert_eq!(
        rooms.day(date(3)).unwrap().occupant("9:00(4)"),
        Some(&staff("B"))
    );
}

#[test]
fn test_slot_swap_rejects_double_booking() {
    let (mut shifts, mut rooms) = sample_tables();
    let swaps: Vec<SwapRequest> = vec![swap_request(
        "B",
        "C",
        SwapTarget::Slot(String::from("9:00(4)")),
    )];

    let outcomes: Vec<SwapOutcome> = apply_swaps(&mut shifts, &mut rooms, &swaps);
    assert_eq!(
        outcomes[0],
        SwapOutcome::Rejected {
            reason: SwapRejection::AlreadyAssigned
        }
    );
}

#[test]
fn test_period_swap_carries_room_cells() {
    let (mut shifts, mut rooms) = sample_tables();
    let swaps: Vec<SwapRequest> =
        vec![swap_request("C", "D", SwapTarget::Period(Period::Afternoon))];

    let outcomes: Vec<SwapOutcome> = apply_swaps(&mut shifts, &mut rooms, &swaps);
    assert!(matches!(outcomes[0], SwapOutcome::Applied { .. }));

    let shift_day = shifts.day(date(3)).unwrap();
    assert!(shift_day.afternoon.contains(&staff("D")));
    assert!(!shift_day.afternoon.contains(&staff("C")));
    // C's morning is untouched.
    assert!(shift_day.morning.contains(&staff("C")));

    let room_day = rooms.day(date(3)).unwrap();
    assert_eq!(room_day.occupant("13:30(2)"), Some(&staff("D")));
    assert_eq!(room_day.occupant("9:30(7)"), Some(&staff("C")));
}

#[test]
fn test_swap_on_missing_day_is_rejected() {
    let (mut shifts, mut rooms) = sample_tables();
    let mut swap: SwapRequest = swap_request("A", "B", SwapTarget::Period(Period::Morning));
    swap.date = date(10);

    let outcomes: Vec<SwapOutcome> = apply_swaps(&mut shifts, &mut rooms, &[swap]);
    assert_eq!(
        outcomes[0],
        SwapOutcome::Rejected {
            reason: SwapRejection::NoAssignmentRow
        }
    );
}

#[test]
fn test_swaps_apply_sequentially() {
    let (mut shifts, mut rooms) = sample_tables();
    let swaps: Vec<SwapRequest> = vec![
        swap_request("B", "D", SwapTarget::Slot(String::from("9:00(4)"))),
        swap_request("D", "E", SwapTarget::Slot(String::from("9:00(4)"))),
    ];

    let outcomes: Vec<SwapOutcome> = apply_swaps(&mut shifts, &mut rooms, &swaps);
    assert!(matches!(outcomes[0], SwapOutcome::Applied { .. }));
    assert!(matches!(outcomes[1], SwapOutcome::Applied { .. }));
    assert_eq!(
        rooms.day(date(3)).unwrap().occupant("9:00(4)"),
        Some(&staff("E"))
    );
}
