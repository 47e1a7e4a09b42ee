// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{date, full_pattern, november, staff};
use crate::balance::{BalanceConfig, balance};
use crate::context::RunContext;
use crate::resolve::{Availability, resolve_month};
use crate::run::{RunInputs, RunOutput, run_schedule};
use endo_rota_domain::{
    AvailabilityPattern, DayKind, Ledger, Period, RequestCategory, RoomLayout, RosterMonth,
    ShiftRequest, ShiftTable, SpecialDay, StaffName, Tier,
};

fn small_config() -> BalanceConfig {
    BalanceConfig {
        target_morning: 2,
        target_afternoon: 1,
        small_team_threshold: 2,
        max_iterations: 100,
    }
}

fn balanced(
    names: &[&str],
    config: &BalanceConfig,
    requests: &[ShiftRequest],
    specials: &[SpecialDay],
    closures: &[time::Date],
) -> ShiftTable {
    let month: RosterMonth = november();
    let pattern: AvailabilityPattern = full_pattern(names);
    let closure_dates: Vec<endo_rota_domain::ClosureDate> =
        closures.iter().map(|d| endo_rota_domain::ClosureDate(*d)).collect();
    let availability: Availability = resolve_month(&month, &pattern, requests, &closure_dates);
    let mut ctx: RunContext = RunContext::with_seed(month, Ledger::new(), 7);
    balance(&mut ctx, config, &availability, requests, specials, closures)
}

#[test]
fn test_closure_day_row_is_empty() {
    let table: ShiftTable =
        balanced(&["A", "B", "C", "D"], &small_config(), &[], &[], &[date(5)]);

    let day = table.day(date(5)).unwrap();
    assert_eq!(day.kind, DayKind::Closure);
    assert!(day.is_empty());
}

#[test]
fn test_special_day_roster_is_verbatim() {
    let specials: Vec<SpecialDay> = vec![SpecialDay {
        date: date(8),
        staff: vec![staff("A"), staff("B"), staff("C")],
        duty: Some(staff("B")),
    }];
    let table: ShiftTable =
        balanced(&["A", "B", "C", "D"], &small_config(), &[], &specials, &[]);

    let day = table.day(date(8)).unwrap();
    assert_eq!(day.kind, DayKind::Special);
    assert_eq!(day.morning, vec![staff("A"), staff("B"), staff("C")]);
    assert_eq!(day.on_call, Some(staff("B")));
}

#[test]
fn test_plain_weekend_gets_no_row() {
    let table: ShiftTable = balanced(&["A", "B", "C", "D"], &small_config(), &[], &[], &[]);

    assert!(table.day(date(1)).is_none());
    assert!(table.day(date(2)).is_none());
}

#[test]
fn test_small_team_day_listed_verbatim() {
    // Three candidates against the default threshold of thirteen.
    let config: BalanceConfig = BalanceConfig::default();
    let table: ShiftTable = balanced(&["A", "B", "C"], &config, &[], &[], &[]);

    let day = table.day(date(3)).unwrap();
    assert_eq!(day.kind, DayKind::SmallTeam);
    assert_eq!(day.morning.len(), 3);
}

#[test]
fn test_regular_days_hit_the_targets() {
    let config: BalanceConfig = small_config();
    let table: ShiftTable =
        balanced(&["A", "B", "C", "D", "E"], &config, &[], &[], &[]);

    for (_, day) in table.iter() {
        if day.kind == DayKind::Regular {
            assert_eq!(day.morning.len(), config.target_morning);
            assert_eq!(day.afternoon.len(), config.target_afternoon);
        }
    }
}

#[test]
fn test_trim_spares_must_work() {
    let requests: Vec<ShiftRequest> = vec![ShiftRequest::new(
        staff("E"),
        RequestCategory::MustWork(Period::Morning),
        vec![date(3)],
    )];
    let table: ShiftTable =
        balanced(&["A", "B", "C", "D", "E"], &small_config(), &requests, &[], &[]);

    let day = table.day(date(3)).unwrap();
    assert!(day.morning.contains(&staff("E")));
    assert_eq!(day.morning.len(), 2);
}

#[test]
fn test_afternoon_workers_also_work_the_morning() {
    let table: ShiftTable =
        balanced(&["A", "B", "C", "D", "E"], &small_config(), &[], &[], &[]);

    for (_, day) in table.iter() {
        if day.kind == DayKind::Regular {
            for worker in &day.afternoon {
                assert!(day.morning.contains(worker), "{worker} has afternoon only");
            }
        }
    }
}

#[test]
fn test_on_call_comes_from_the_afternoon() {
    let table: ShiftTable =
        balanced(&["A", "B", "C", "D", "E"], &small_config(), &[], &[], &[]);

    for (_, day) in table.iter() {
        if day.kind == DayKind::Regular {
            let on_call: &StaffName = day.on_call.as_ref().unwrap();
            assert!(day.afternoon.contains(on_call));
        }
    }
}

#[test]
fn test_on_call_allowance_comes_from_the_ledger() {
    let month: RosterMonth = november();
    let pattern: AvailabilityPattern = full_pattern(&["A", "B", "C"]);
    let availability: Availability = resolve_month(&month, &pattern, &[], &[]);

    // A is the only worker with a morning-duty allowance, large enough to
    // cover every afternoon day A works.
    let mut base: Ledger = Ledger::new();
    base.entry(&staff("A")).morning_duty = 30;

    let config: BalanceConfig = BalanceConfig {
        target_morning: 3,
        target_afternoon: 2,
        small_team_threshold: 2,
        max_iterations: 100,
    };
    let mut ctx: RunContext = RunContext::with_seed(month, base, 5);
    let table: ShiftTable = balance(&mut ctx, &config, &availability, &[], &[], &[]);

    for (_, day) in table.iter() {
        if day.kind == DayKind::Regular && day.afternoon.contains(&staff("A")) {
            assert_eq!(day.on_call, Some(staff("A")));
        }
    }
}

#[test]
fn test_exhausted_on_call_allowances_are_reported() {
    let month: RosterMonth = november();
    let pattern: AvailabilityPattern = full_pattern(&["A", "B", "C", "D", "E"]);
    let availability: Availability = resolve_month(&month, &pattern, &[], &[]);

    // Nobody has an allowance, so every assignment is a random overage.
    let mut ctx: RunContext = RunContext::with_seed(month, Ledger::new(), 9);
    let table: ShiftTable =
        balance(&mut ctx, &small_config(), &availability, &[], &[], &[]);

    for (_, day) in table.iter() {
        if day.kind == DayKind::Regular {
            assert!(day.on_call.is_some());
        }
    }
    let soft: Vec<&str> = ctx.report.tier(Tier::SoftSkip);
    assert!(soft.iter().any(|msg| msg.contains("allowance")));
}

#[test]
fn test_vacation_keeps_staff_off_the_table() {
    let requests: Vec<ShiftRequest> = vec![ShiftRequest::new(
        staff("A"),
        RequestCategory::Vacation,
        vec![date(3), date(4), date(5)],
    )];
    let table: ShiftTable =
        balanced(&["A", "B", "C", "D", "E"], &small_config(), &requests, &[], &[]);

    for day_number in [3_u8, 4, 5] {
        let day = table.day(date(day_number)).unwrap();
        assert!(!day.morning.contains(&staff("A")));
        assert!(!day.afternoon.contains(&staff("A")));
    }
}

#[test]
fn test_same_seed_reproduces_the_run() {
    let month: RosterMonth = november();
    let inputs: RunInputs = RunInputs {
        pattern: full_pattern(&["A", "B", "C", "D", "E", "F"]),
        requests: Vec::new(),
        room_requests: Vec::new(),
        specials: Vec::new(),
        closures: Vec::new(),
        config: small_config(),
        layout: RoomLayout::reference(),
    };

    let first: RunOutput =
        run_schedule(RunContext::with_seed(month, Ledger::new(), 42), &inputs);
    let second: RunOutput =
        run_schedule(RunContext::with_seed(month, Ledger::new(), 42), &inputs);

    assert_eq!(first.shift_table, second.shift_table);
    assert_eq!(first.room_table, second.room_table);
    assert_eq!(first.contribution, second.contribution);
}

#[test]
fn test_higher_cumulative_count_is_trimmed_first() {
    let month: RosterMonth = november();
    let pattern: AvailabilityPattern = full_pattern(&["A", "B", "C"]);
    let availability: Availability = resolve_month(&month, &pattern, &[], &[]);

    // C has worked far more mornings than anyone else.
    let mut base: Ledger = Ledger::new();
    base.entry(&staff("C")).morning = 40;

    let config: BalanceConfig = BalanceConfig {
        target_morning: 2,
        target_afternoon: 1,
        small_team_threshold: 2,
        max_iterations: 100,
    };
    let mut ctx: RunContext = RunContext::with_seed(month, base, 3);
    let table: ShiftTable = balance(&mut ctx, &config, &availability, &[], &[], &[]);

    let day = table.day(date(3)).unwrap();
    assert!(!day.morning.contains(&staff("C")));
}
