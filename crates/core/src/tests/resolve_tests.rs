// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{date, full_pattern, november, staff};
use crate::resolve::{Availability, DayAvailability, resolve_day, resolve_month};
use endo_rota_domain::{
    AvailabilityPattern, AvailabilityStatus, ClosureDate, Period, RequestCategory, ShiftRequest,
    WeekTag,
};
use std::collections::HashSet;
use time::Weekday;

#[test]
fn test_vacation_removes_both_periods() {
    let pattern: AvailabilityPattern = full_pattern(&["Kim"]);
    let requests: Vec<ShiftRequest> = vec![ShiftRequest::new(
        staff("Kim"),
        RequestCategory::Vacation,
        vec![date(3), date(4), date(5)],
    )];
    let closures: HashSet<time::Date> = HashSet::new();

    let on_vacation: DayAvailability =
        resolve_day(&staff("Kim"), date(3), &november(), &pattern, &requests, &closures);
    assert!(!on_vacation.morning);
    assert!(!on_vacation.afternoon);

    // The following Monday is unaffected.
    let back: DayAvailability =
        resolve_day(&staff("Kim"), date(10), &november(), &pattern, &requests, &closures);
    assert!(back.morning);
    assert!(back.afternoon);
}

#[test]
fn test_must_work_overrides_vacation() {
    let pattern: AvailabilityPattern = full_pattern(&["Kim"]);
    let requests: Vec<ShiftRequest> = vec![
        ShiftRequest::new(staff("Kim"), RequestCategory::Vacation, vec![date(3)]),
        ShiftRequest::new(
            staff("Kim"),
            RequestCategory::MustWork(Period::Morning),
            vec![date(3)],
        ),
    ];
    let closures: HashSet<time::Date> = HashSet::new();

    let resolved: DayAvailability =
        resolve_day(&staff("Kim"), date(3), &november(), &pattern, &requests, &closures);
    assert!(resolved.morning);
    assert!(!resolved.afternoon);
}

#[test]
fn test_closure_beats_must_work() {
    let pattern: AvailabilityPattern = full_pattern(&["Kim"]);
    let requests: Vec<ShiftRequest> = vec![ShiftRequest::new(
        staff("Kim"),
        RequestCategory::MustWork(Period::Morning),
        vec![date(3)],
    )];
    let closures: HashSet<time::Date> = [date(3)].into_iter().collect();

    let resolved: DayAvailability =
        resolve_day(&staff("Kim"), date(3), &november(), &pattern, &requests, &closures);
    assert!(!resolved.morning);
    assert!(!resolved.afternoon);
}

#[test]
fn test_week_scoped_pattern_resolves_by_week_of_month() {
    let mut pattern: AvailabilityPattern = AvailabilityPattern::new();
    pattern.set(
        staff("Lee"),
        Weekday::Monday,
        WeekTag::Week(2),
        AvailabilityStatus::Morning,
    );
    let requests: Vec<ShiftRequest> = Vec::new();
    let closures: HashSet<time::Date> = HashSet::new();

    // Nov 3 falls in week 2 (the month starts on a Saturday).
    let in_week: DayAvailability =
        resolve_day(&staff("Lee"), date(3), &november(), &pattern, &requests, &closures);
    assert!(in_week.morning);
    assert!(!in_week.afternoon);

    let out_of_week: DayAvailability =
        resolve_day(&staff("Lee"), date(10), &november(), &pattern, &requests, &closures);
    assert!(!out_of_week.morning);
}

#[test]
fn test_month_resolution_excludes_weekends_and_closures() {
    let pattern: AvailabilityPattern = full_pattern(&["Kim", "Lee"]);
    let closures: Vec<ClosureDate> = vec![ClosureDate(date(5))];

    let availability: Availability = resolve_month(&november(), &pattern, &[], &closures);

    assert!(!availability.days.contains_key(&date(1)));
    assert!(!availability.days.contains_key(&date(2)));
    assert!(!availability.days.contains_key(&date(5)));
    assert!(availability.days.contains_key(&date(3)));
    assert_eq!(availability.days[&date(3)].morning.len(), 2);
}

#[test]
fn test_pool_includes_any_week_coverage() {
    let mut pattern: AvailabilityPattern = AvailabilityPattern::new();
    pattern.set(
        staff("Lee"),
        Weekday::Monday,
        WeekTag::Week(2),
        AvailabilityStatus::Both,
    );
    let availability: Availability = resolve_month(&november(), &pattern, &[], &[]);

    assert!(availability
        .pool_for(Weekday::Monday, Period::Morning)
        .contains(&staff("Lee")));
    assert!(availability
        .pool_for(Weekday::Tuesday, Period::Morning)
        .is_empty());
}
