// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, RosterMonth, display_token, parse_date_spec, parse_display_token, parse_iso,
};
use time::{Date, Month};

#[test]
fn test_parse_iso_accepts_valid_date() {
    let date: Date = parse_iso("2025-11-03").unwrap();
    assert_eq!(date.year(), 2025);
    assert_eq!(date.month(), Month::November);
    assert_eq!(date.day(), 3);
}

#[test]
fn test_parse_iso_rejects_garbage() {
    let result: Result<Date, DomainError> = parse_iso("11/03/2025");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_parse_date_spec_single_date() {
    let dates: Vec<Date> = parse_date_spec("2025-11-03").unwrap();
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].day(), 3);
}

#[test]
fn test_parse_date_spec_comma_list() {
    let dates: Vec<Date> = parse_date_spec("2025-11-03, 2025-11-07").unwrap();
    assert_eq!(dates.len(), 2);
    assert_eq!(dates[1].day(), 7);
}

#[test]
fn test_parse_date_spec_range_is_inclusive_of_both_endpoints() {
    let dates: Vec<Date> = parse_date_spec("2025-11-03~2025-11-05").unwrap();
    assert_eq!(dates.len(), 3);
    assert_eq!(dates[0].day(), 3);
    assert_eq!(dates[2].day(), 5);
}

#[test]
fn test_parse_date_spec_rejects_inverted_range() {
    let result: Result<Vec<Date>, DomainError> = parse_date_spec("2025-11-05~2025-11-03");
    assert!(result.is_err());
}

#[test]
fn test_parse_date_spec_rejects_empty() {
    assert!(parse_date_spec("  ").is_err());
}

#[test]
fn test_display_token_round_trip() {
    let month: RosterMonth = RosterMonth::new(2025, Month::November);
    let date: Date = parse_iso("2025-11-03").unwrap();
    let token: String = display_token(date);
    assert_eq!(token, "11월 3일");
    assert_eq!(parse_display_token(&token, &month).unwrap(), date);
}

#[test]
fn test_parse_display_token_rejects_trailing_text() {
    let month: RosterMonth = RosterMonth::new(2025, Month::November);
    assert!(parse_display_token("11월 3일 오전", &month).is_err());
}

#[test]
fn test_week_of_month_starts_on_monday() {
    // 2025-11-01 is a Saturday, so week 1 ends on Sunday the 2nd and
    // Monday the 3rd opens week 2.
    let month: RosterMonth = RosterMonth::new(2025, Month::November);
    assert_eq!(month.week_of_month(parse_iso("2025-11-01").unwrap()), 1);
    assert_eq!(month.week_of_month(parse_iso("2025-11-02").unwrap()), 1);
    assert_eq!(month.week_of_month(parse_iso("2025-11-03").unwrap()), 2);
    assert_eq!(month.week_of_month(parse_iso("2025-11-30").unwrap()), 5);
}

#[test]
fn test_roster_month_next_wraps_year() {
    let month: RosterMonth = RosterMonth::new(2025, Month::December);
    let next: RosterMonth = month.next();
    assert_eq!(next.year(), 2026);
    assert_eq!(next.month(), Month::January);
}

#[test]
fn test_roster_month_string_round_trip() {
    let month: RosterMonth = "2025-11".parse().unwrap();
    assert_eq!(month.to_string(), "2025-11");
    assert!("2025-13".parse::<RosterMonth>().is_err());
    assert!("202511".parse::<RosterMonth>().is_err());
}
