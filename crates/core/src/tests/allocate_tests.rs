// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{date, november, staff};
use crate::allocate::allocate;
use crate::context::RunContext;
use endo_rota_domain::{
    DayKind, Ledger, ON_CALL_KEY, Period, RoomLayout, RoomRequest, RoomRequestCategory, RoomTable,
    ShiftDay, ShiftTable, SlotTime, StaffName, Tier,
};

fn full_regular_day() -> ShiftDay {
    let mut day: ShiftDay = ShiftDay::empty(DayKind::Regular);
    day.morning = (1..=12).map(|n| staff(&format!("M{n}"))).collect();
    day.afternoon = (1..=5).map(|n| staff(&format!("M{n}"))).collect();
    day.on_call = Some(staff("M1"));
    day
}

fn one_day_table(day: ShiftDay) -> ShiftTable {
    let mut table: ShiftTable = ShiftTable::new(november());
    table.insert(date(3), day);
    table
}

fn run_allocation(table: &ShiftTable, requests: &[RoomRequest]) -> (RoomTable, RunContext) {
    let mut ctx: RunContext = RunContext::with_seed(november(), Ledger::new(), 11);
    let rooms: RoomTable = allocate(&mut ctx, &RoomLayout::reference(), table, requests);
    (rooms, ctx)
}

#[test]
fn test_every_morning_worker_gets_exactly_one_room() {
    let table: ShiftTable = one_day_table(full_regular_day());
    let (rooms, _) = run_allocation(&table, &[]);

    let day = rooms.day(date(3)).unwrap();
    for n in 1..=12 {
        let worker: StaffName = staff(&format!("M{n}"));
        let held: Vec<String> = day
            .keys_for(&worker)
            .into_iter()
            .filter(|key| key != ON_CALL_KEY)
            .filter(|key| endo_rota_domain::slot_period(key) == Some(Period::Morning))
            .collect();
        assert_eq!(held.len(), 1, "{worker} holds {held:?}");
    }
}

#[test]
fn test_on_call_person_takes_the_morning_duty_room() {
    let table: ShiftTable = one_day_table(full_regular_day());
    let (rooms, _) = run_allocation(&table, &[]);

    let day = rooms.day(date(3)).unwrap();
    assert_eq!(day.occupant("8:30(1)"), Some(&staff("M1")));
    assert_eq!(day.occupant(ON_CALL_KEY), Some(&staff("M1")));
}

#[test]
fn test_numbered_room_request_is_honored() {
    let table: ShiftTable = one_day_table(full_regular_day());
    let requests: Vec<RoomRequest> = vec![RoomRequest {
        staff: staff("M7"),
        category: RoomRequestCategory::Room(5),
        date: date(3),
        period: Period::Morning,
    }];
    let (rooms, ctx) = run_allocation(&table, &requests);

    let day = rooms.day(date(3)).unwrap();
    assert_eq!(day.occupant("9:00(5)"), Some(&staff("M7")));
    assert!(!ctx.report.tier(Tier::Applied).is_empty());
}

#[test]
fn test_duty_room_request_is_hard_rejected() {
    let table: ShiftTable = one_day_table(full_regular_day());
    let requests: Vec<RoomRequest> = vec![RoomRequest {
        staff: staff("M7"),
        category: RoomRequestCategory::Room(1),
        date: date(3),
        period: Period::Morning,
    }];
    let (_, ctx) = run_allocation(&table, &requests);

    let hard: Vec<&str> = ctx.report.tier(Tier::HardSkip);
    assert_eq!(hard.len(), 1);
    assert!(hard[0].contains("duty room"));
}

#[test]
fn test_start_time_request_seats_at_that_time() {
    let table: ShiftTable = one_day_table(full_regular_day());
    let requests: Vec<RoomRequest> = vec![RoomRequest {
        staff: staff("M9"),
        category: RoomRequestCategory::StartTime(SlotTime::M1000),
        date: date(3),
        period: Period::Morning,
    }];
    let (rooms, _) = run_allocation(&table, &requests);

    let day = rooms.day(date(3)).unwrap();
    let held: Vec<String> = day.keys_for(&staff("M9"));
    assert!(held.iter().any(|key| key.starts_with("10:00(")), "{held:?}");
}

#[test]
fn test_afternoon_duty_room_prefers_an_open_allowance() {
    let table: ShiftTable = one_day_table(full_regular_day());

    // Only M3 still has afternoon-duty allowance in the ledger.
    let mut base: Ledger = Ledger::new();
    base.entry(&staff("M3")).afternoon_duty = 2;

    let mut ctx: RunContext = RunContext::with_seed(november(), base, 11);
    let rooms: RoomTable = allocate(&mut ctx, &RoomLayout::reference(), &table, &[]);

    let day = rooms.day(date(3)).unwrap();
    assert_eq!(day.occupant("13:30(1)"), Some(&staff("M3")));
}

#[test]
fn test_late_room_exclusion_is_respected_when_feasible() {
    // Three workers, twelve slots: the exclusion can always be honored.
    let mut day: ShiftDay = ShiftDay::empty(DayKind::Regular);
    day.morning = vec![staff("A"), staff("B"), staff("C")];
    let table: ShiftTable = one_day_table(day);
    let requests: Vec<RoomRequest> = vec![RoomRequest {
        staff: staff("A"),
        category: RoomRequestCategory::NoLateRooms,
        date: date(3),
        period: Period::Morning,
    }];
    let (rooms, _) = run_allocation(&table, &requests);

    let room_day = rooms.day(date(3)).unwrap();
    for key in room_day.keys_for(&staff("A")) {
        assert!(!key.starts_with("10:00("), "A was seated in {key}");
    }
}

#[test]
fn test_request_for_unscheduled_day_is_hard_rejected() {
    let table: ShiftTable = one_day_table(full_regular_day());
    let requests: Vec<RoomRequest> = vec![RoomRequest {
        staff: staff("M2"),
        category: RoomRequestCategory::Room(3),
        date: date(17),
        period: Period::Morning,
    }];
    let (_, ctx) = run_allocation(&table, &requests);

    assert_eq!(ctx.report.tier(Tier::HardSkip).len(), 1);
}

#[test]
fn test_special_day_duty_person_takes_the_duty_room() {
    let mut day: ShiftDay = ShiftDay::empty(DayKind::Special);
    day.morning = vec![staff("A"), staff("B"), staff("C"), staff("D")];
    day.on_call = Some(staff("C"));
    let mut table: ShiftTable = ShiftTable::new(november());
    table.insert(date(8), day);

    let (rooms, _) = run_allocation(&table, &[]);

    let room_day = rooms.day(date(8)).unwrap();
    assert_eq!(room_day.occupant("9:00(1)"), Some(&staff("C")));
    // Everyone else landed in one of the remaining special rooms.
    for name in ["A", "B", "D"] {
        assert_eq!(room_day.keys_for(&staff(name)).len(), 1);
    }
}

#[test]
fn test_special_day_rejects_non_room_requests() {
    let mut day: ShiftDay = ShiftDay::empty(DayKind::Special);
    day.morning = vec![staff("A"), staff("B")];
    day.on_call = Some(staff("A"));
    let mut table: ShiftTable = ShiftTable::new(november());
    table.insert(date(8), day);

    let requests: Vec<RoomRequest> = vec![RoomRequest {
        staff: staff("B"),
        category: RoomRequestCategory::NoEarlyRooms,
        date: date(8),
        period: Period::Morning,
    }];
    let (_, ctx) = run_allocation(&table, &requests);

    assert_eq!(ctx.report.tier(Tier::HardSkip).len(), 1);
}

#[test]
fn test_closure_day_has_no_room_assignments() {
    let mut table: ShiftTable = ShiftTable::new(november());
    table.insert(date(5), ShiftDay::empty(DayKind::Closure));
    let (rooms, _) = run_allocation(&table, &[]);

    assert!(rooms.day(date(5)).unwrap().is_empty());
}
