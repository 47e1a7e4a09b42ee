// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date parsing and the persistence-boundary date formats.
//!
//! Two literal formats exist in persisted tables: machine-oriented ISO
//! (`"2025-11-03"`) for request and ledger tables, and the localized
//! display token (`"11월 3일"`) used as assignment-table row keys. Both are
//! confined to this module; all internal logic uses [`time::Date`].

use crate::error::DomainError;
use crate::month::RosterMonth;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns [`DomainError::DateParseError`] if the string is malformed.
pub fn parse_iso(s: &str) -> Result<Date, DomainError> {
    Date::parse(s.trim(), &ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: s.to_owned(),
        error: e.to_string(),
    })
}

/// Formats a date as an ISO `YYYY-MM-DD` string.
#[must_use]
pub fn format_iso(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Formats a date as the localized display token used for assignment-table
/// row keys, e.g. `"11월 3일"`.
#[must_use]
pub fn display_token(date: Date) -> String {
    format!("{}월 {}일", u8::from(date.month()), date.day())
}

/// Parses a display token (`"M월 D일"`) back into a date.
///
/// The token carries no year, so the containing roster month supplies it.
///
/// # Errors
///
/// Returns [`DomainError::DateParseError`] if the token is malformed or
/// does not name a real date in the roster month's year.
pub fn parse_display_token(token: &str, month: &RosterMonth) -> Result<Date, DomainError> {
    let bad = |reason: &str| DomainError::DateParseError {
        date_string: token.to_owned(),
        error: reason.to_owned(),
    };
    let rest: &str = token.trim();
    let (month_s, rest) = rest.split_once('월').ok_or_else(|| bad("missing 월"))?;
    let (day_s, tail) = rest.trim().split_once('일').ok_or_else(|| bad("missing 일"))?;
    if !tail.trim().is_empty() {
        return Err(bad("trailing characters"));
    }
    let month_num: u8 = month_s.trim().parse().map_err(|_| bad("bad month"))?;
    let day: u8 = day_s.trim().parse().map_err(|_| bad("bad day"))?;
    let parsed_month: time::Month =
        time::Month::try_from(month_num).map_err(|_| bad("bad month"))?;
    Date::from_calendar_date(month.year(), parsed_month, day)
        .map_err(|e| bad(&e.to_string()))
}

/// Parses a request date specification.
///
/// Accepted forms, with surrounding whitespace ignored:
///
/// - a single date: `"2025-11-03"`
/// - a comma list: `"2025-11-03, 2025-11-07"`
/// - an inclusive range: `"2025-11-03~2025-11-05"`
///
/// Ranges are inclusive of both endpoints.
///
/// # Errors
///
/// Returns [`DomainError::DateParseError`] on the first malformed token or
/// an inverted range. Callers treat this as a warning and skip the request.
pub fn parse_date_spec(spec: &str) -> Result<Vec<Date>, DomainError> {
    let mut dates: Vec<Date> = Vec::new();
    for part in spec.split(',') {
        let part: &str = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((start_s, end_s)) = part.split_once('~') {
            let start: Date = parse_iso(start_s)?;
            let end: Date = parse_iso(end_s)?;
            if end < start {
                return Err(DomainError::DateParseError {
                    date_string: part.to_owned(),
                    error: String::from("range end precedes start"),
                });
            }
            let mut cursor: Date = start;
            while cursor <= end {
                dates.push(cursor);
                match cursor.next_day() {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
        } else {
            dates.push(parse_iso(part)?);
        }
    }
    if dates.is_empty() {
        return Err(DomainError::DateParseError {
            date_string: spec.to_owned(),
            error: String::from("no dates in specification"),
        });
    }
    Ok(dates)
}
