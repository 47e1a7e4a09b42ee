// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Encoders and decoders between domain values and stored tables.
//!
//! Decoding is lenient: a malformed row is skipped and reported as a
//! parse warning rather than failing the whole load, so one bad hand
//! edit never takes the month down. Two date formats exist in sheets:
//! request, special-day, and closure tables carry ISO dates (singles,
//! comma lists, and `~` ranges for request date specs), while assignment
//! tables key their rows by the display token form (`"11월 3일"`). This
//! module and `domain::dates` are the only places either literal appears.

use crate::table::Table;
use endo_rota_domain::{
    AvailabilityPattern, AvailabilityStatus, ClosureDate, DayKind, Ledger, Period, RoomDay,
    RoomLayout, RoomRequest, RoomRequestCategory, RoomTable, RosterMonth, RunReport, ShiftDay,
    ShiftRequest, ShiftTable, SpecialDay, StaffCounters, StaffName, Tier, VersionTag, WeekTag,
    display_token, format_iso, parse_date_spec, parse_display_token, parse_iso,
    validate_special_day, validate_staff_name,
};
use std::collections::BTreeMap;
use time::{Date, Weekday};

/// One entry in a month's version index sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// The version tag.
    pub tag: VersionTag,
    /// When the version was saved (RFC 3339, recorded by the caller).
    pub saved_at: String,
}

/// The audit log sheet, shared by every month.
pub const AUDIT_SHEET: &str = "audit_log";

/// The availability pattern sheet, shared by every month.
pub const PATTERN_SHEET: &str = "availability_pattern";

/// The shift table sheet for one (month, version).
#[must_use]
pub fn shift_sheet(month: RosterMonth, tag: &VersionTag) -> String {
    format!("shift_{month}_{tag}")
}

/// The room table sheet for one (month, version).
#[must_use]
pub fn rooms_sheet(month: RosterMonth, tag: &VersionTag) -> String {
    format!("rooms_{month}_{tag}")
}

/// The cumulative ledger sheet carried into a month.
#[must_use]
pub fn ledger_sheet(month: RosterMonth) -> String {
    format!("ledger_{month}")
}

/// The sheet recording what the month's last save contributed.
#[must_use]
pub fn ledger_contribution_sheet(month: RosterMonth) -> String {
    format!("ledger_contribution_{month}")
}

/// The version index sheet for a month.
#[must_use]
pub fn versions_sheet(month: RosterMonth) -> String {
    format!("versions_{month}")
}

/// The swap log sheet for a month.
#[must_use]
pub fn swap_log_sheet(month: RosterMonth) -> String {
    format!("swap_log_{month}")
}

/// The monthly shift-request sheet.
#[must_use]
pub fn requests_sheet(month: RosterMonth) -> String {
    format!("requests_{month}")
}

/// The monthly room-request sheet.
#[must_use]
pub fn room_requests_sheet(month: RosterMonth) -> String {
    format!("room_requests_{month}")
}

/// The monthly special-day sheet.
#[must_use]
pub fn specials_sheet(month: RosterMonth) -> String {
    format!("specials_{month}")
}

/// The monthly closure sheet.
#[must_use]
pub fn closures_sheet(month: RosterMonth) -> String {
    format!("closures_{month}")
}

/// The header of the swap log sheet.
#[must_use]
pub fn swap_log_header() -> Vec<String> {
    to_header(&[
        "id",
        "requester",
        "person-before",
        "person-after",
        "date",
        "target",
        "outcome",
    ])
}

/// The header of the audit log sheet.
#[must_use]
pub fn audit_log_header() -> Vec<String> {
    to_header(&[
        "actor", "cause", "action", "details", "before", "after", "month", "version",
    ])
}

fn to_header(names: &[&str]) -> Vec<String> {
    names.iter().map(|&s| s.to_owned()).collect()
}

const fn weekday_str(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "monday",
        Weekday::Tuesday => "tuesday",
        Weekday::Wednesday => "wednesday",
        Weekday::Thursday => "thursday",
        Weekday::Friday => "friday",
        Weekday::Saturday => "saturday",
        Weekday::Sunday => "sunday",
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" => Some(Weekday::Monday),
        "tuesday" => Some(Weekday::Tuesday),
        "wednesday" => Some(Weekday::Wednesday),
        "thursday" => Some(Weekday::Thursday),
        "friday" => Some(Weekday::Friday),
        "saturday" => Some(Weekday::Saturday),
        "sunday" => Some(Weekday::Sunday),
        _ => None,
    }
}

const fn day_kind_str(kind: DayKind) -> &'static str {
    match kind {
        DayKind::Regular => "regular",
        DayKind::Closure => "closure",
        DayKind::Special => "special",
        DayKind::SmallTeam => "small-team",
    }
}

fn parse_day_kind(s: &str) -> Option<DayKind> {
    match s {
        "regular" => Some(DayKind::Regular),
        "closure" => Some(DayKind::Closure),
        "special" => Some(DayKind::Special),
        "small-team" => Some(DayKind::SmallTeam),
        _ => None,
    }
}

fn join_names(names: &[StaffName]) -> String {
    names
        .iter()
        .map(StaffName::value)
        .collect::<Vec<&str>>()
        .join(", ")
}

fn split_names(cell: &str) -> Vec<StaffName> {
    cell.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(StaffName::new)
        .collect()
}

/// Renders a date list as an ISO date spec, collapsing consecutive runs
/// into inclusive `~` ranges.
fn encode_date_spec(dates: &[Date]) -> String {
    let mut sorted: Vec<Date> = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut parts: Vec<String> = Vec::new();
    let mut run: Option<(Date, Date)> = None;
    for date in sorted {
        run = match run {
            Some((start, end)) if end.next_day() == Some(date) => Some((start, date)),
            Some((start, end)) => {
                parts.push(format_date_run(start, end));
                Some((date, date))
            }
            None => Some((date, date)),
        };
    }
    if let Some((start, end)) = run {
        parts.push(format_date_run(start, end));
    }
    parts.join(", ")
}

fn format_date_run(start: Date, end: Date) -> String {
    if start == end {
        format_iso(start)
    } else {
        format!("{} ~ {}", format_iso(start), format_iso(end))
    }
}

/// Encodes the availability pattern.
#[must_use]
pub fn encode_pattern(pattern: &AvailabilityPattern) -> Table {
    let mut table: Table = Table::new(PATTERN_SHEET, to_header(&["staff", "weekday", "week", "status"]));
    for (staff, weekday, week, status) in pattern.rows() {
        table.push(vec![
            staff.value().to_owned(),
            weekday_str(weekday).to_owned(),
            week.as_string(),
            status.as_str().to_owned(),
        ]);
    }
    table
}

/// Decodes the availability pattern, skipping malformed rows.
#[must_use]
pub fn decode_pattern(table: &Table) -> (AvailabilityPattern, RunReport) {
    let mut pattern: AvailabilityPattern = AvailabilityPattern::new();
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [staff_s, weekday_s, week_s, status_s] = row.as_slice() else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        let staff: StaffName = StaffName::new(staff_s);
        if let Err(err) = validate_staff_name(&staff) {
            report.push(Tier::ParseWarning, format!("{context}: {err}"));
            continue;
        }
        let Some(weekday) = parse_weekday(weekday_s) else {
            report.push(
                Tier::ParseWarning,
                format!("{context}: invalid weekday '{weekday_s}'"),
            );
            continue;
        };
        let week: WeekTag = match week_s.parse() {
            Ok(week) => week,
            Err(err) => {
                report.push(Tier::ParseWarning, format!("{context}: {err}"));
                continue;
            }
        };
        let status: AvailabilityStatus = match status_s.parse() {
            Ok(status) => status,
            Err(err) => {
                report.push(Tier::ParseWarning, format!("{context}: {err}"));
                continue;
            }
        };
        pattern.set(staff, weekday, week, status);
    }
    (pattern, report)
}

/// Encodes the monthly shift requests. Dates persist as ISO date specs.
#[must_use]
pub fn encode_requests(requests: &[ShiftRequest], month: RosterMonth) -> Table {
    let mut table: Table =
        Table::new(requests_sheet(month), to_header(&["staff", "category", "dates"]));
    for request in requests {
        table.push(vec![
            request.staff.value().to_owned(),
            request.category.as_string(),
            encode_date_spec(&request.dates),
        ]);
    }
    table
}

/// Decodes the monthly shift requests. A row whose date spec fails to
/// parse is skipped whole; a request is never applied to half its dates.
#[must_use]
pub fn decode_requests(table: &Table) -> (Vec<ShiftRequest>, RunReport) {
    let mut requests: Vec<ShiftRequest> = Vec::new();
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [staff_s, category_s, dates_s] = row.as_slice() else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        let staff: StaffName = StaffName::new(staff_s);
        if let Err(err) = validate_staff_name(&staff) {
            report.push(Tier::ParseWarning, format!("{context}: {err}"));
            continue;
        }
        let category = match category_s.parse() {
            Ok(category) => category,
            Err(err) => {
                report.push(Tier::ParseWarning, format!("{context}: {err}"));
                continue;
            }
        };
        let dates: Vec<Date> = if dates_s.trim().is_empty() {
            Vec::new()
        } else {
            match parse_date_spec(dates_s) {
                Ok(dates) => dates,
                Err(err) => {
                    report.push(Tier::ParseWarning, format!("{context}: {err}"));
                    continue;
                }
            }
        };
        requests.push(ShiftRequest::new(staff, category, dates));
    }
    (requests, report)
}

/// Encodes the monthly room requests.
#[must_use]
pub fn encode_room_requests(requests: &[RoomRequest], month: RosterMonth) -> Table {
    let mut table: Table = Table::new(
        room_requests_sheet(month),
        to_header(&["staff", "category", "date", "period"]),
    );
    for request in requests {
        table.push(vec![
            request.staff.value().to_owned(),
            request.category.as_string(),
            format_iso(request.date),
            request.period.as_str().to_owned(),
        ]);
    }
    table
}

/// Decodes the monthly room requests.
#[must_use]
pub fn decode_room_requests(table: &Table) -> (Vec<RoomRequest>, RunReport) {
    let mut requests: Vec<RoomRequest> = Vec::new();
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [staff_s, category_s, date_s, period_s] = row.as_slice() else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        let staff: StaffName = StaffName::new(staff_s);
        let category: Result<RoomRequestCategory, _> = category_s.parse();
        let date: Result<Date, _> = parse_iso(date_s);
        let period: Result<Period, _> = period_s.parse();
        match (validate_staff_name(&staff), category, date, period) {
            (Ok(()), Ok(category), Ok(date), Ok(period)) => requests.push(RoomRequest {
                staff,
                category,
                date,
                period,
            }),
            _ => report.push(Tier::ParseWarning, format!("{context}: malformed row")),
        }
    }
    (requests, report)
}

/// Encodes the monthly special days.
#[must_use]
pub fn encode_specials(specials: &[SpecialDay], month: RosterMonth) -> Table {
    let mut table: Table =
        Table::new(specials_sheet(month), to_header(&["date", "staff", "duty"]));
    for special in specials {
        table.push(vec![
            format_iso(special.date),
            join_names(&special.staff),
            special
                .duty
                .as_ref()
                .map(|name| name.value().to_owned())
                .unwrap_or_default(),
        ]);
    }
    table
}

/// Decodes the monthly special days.
#[must_use]
pub fn decode_specials(table: &Table) -> (Vec<SpecialDay>, RunReport) {
    let mut specials: Vec<SpecialDay> = Vec::new();
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [date_s, staff_s, duty_s] = row.as_slice() else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        let date: Date = match parse_iso(date_s) {
            Ok(date) => date,
            Err(err) => {
                report.push(Tier::ParseWarning, format!("{context}: {err}"));
                continue;
            }
        };
        let staff: Vec<StaffName> = split_names(staff_s);
        let duty: Option<StaffName> = if duty_s.trim().is_empty() {
            None
        } else {
            Some(StaffName::new(duty_s))
        };
        let day: SpecialDay = SpecialDay { date, staff, duty };
        if let Err(err) = validate_special_day(&day) {
            report.push(Tier::ParseWarning, format!("{context}: {err}"));
            continue;
        }
        specials.push(day);
    }
    (specials, report)
}

/// Encodes the monthly closure dates.
#[must_use]
pub fn encode_closures(closures: &[ClosureDate], month: RosterMonth) -> Table {
    let mut table: Table = Table::new(closures_sheet(month), to_header(&["date"]));
    for closure in closures {
        table.push(vec![format_iso(closure.0)]);
    }
    table
}

/// Decodes the monthly closure dates.
#[must_use]
pub fn decode_closures(table: &Table) -> (Vec<ClosureDate>, RunReport) {
    let mut closures: Vec<ClosureDate> = Vec::new();
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [date_s] = row.as_slice() else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        match parse_iso(date_s) {
            Ok(date) => closures.push(ClosureDate(date)),
            Err(err) => report.push(Tier::ParseWarning, format!("{context}: {err}")),
        }
    }
    (closures, report)
}

const LEDGER_HEADER: [&str; 8] = [
    "staff",
    "morning",
    "afternoon",
    "early",
    "late",
    "morning-duty",
    "afternoon-duty",
    "per-slot",
];

/// Encodes a ledger into the named sheet.
///
/// # Errors
///
/// Returns a serialization error if the per-slot map cannot be encoded.
pub fn encode_ledger(ledger: &Ledger, sheet: String) -> Result<Table, crate::error::StoreError> {
    let mut table: Table = Table::new(sheet, to_header(&LEDGER_HEADER));
    for (staff, counters) in ledger.iter() {
        table.push(vec![
            staff.value().to_owned(),
            counters.morning.to_string(),
            counters.afternoon.to_string(),
            counters.early.to_string(),
            counters.late.to_string(),
            counters.morning_duty.to_string(),
            counters.afternoon_duty.to_string(),
            serde_json::to_string(&counters.per_slot)?,
        ]);
    }
    Ok(table)
}

/// Decodes a ledger sheet.
#[must_use]
pub fn decode_ledger(table: &Table) -> (Ledger, RunReport) {
    let mut ledger: Ledger = Ledger::new();
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [staff_s, morning, afternoon, early, late, morning_duty, afternoon_duty, per_slot] =
            row.as_slice()
        else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        let staff: StaffName = StaffName::new(staff_s);
        if let Err(err) = validate_staff_name(&staff) {
            report.push(Tier::ParseWarning, format!("{context}: {err}"));
            continue;
        }
        let counts: Option<[u32; 6]> = [morning, afternoon, early, late, morning_duty, afternoon_duty]
            .iter()
            .map(|cell| cell.parse().ok())
            .collect::<Option<Vec<u32>>>()
            .and_then(|v| v.try_into().ok());
        let Some([morning, afternoon, early, late, morning_duty, afternoon_duty]) = counts else {
            report.push(Tier::ParseWarning, format!("{context}: non-numeric counter"));
            continue;
        };
        let per_slot: BTreeMap<String, u32> = match serde_json::from_str(per_slot) {
            Ok(map) => map,
            Err(err) => {
                report.push(Tier::ParseWarning, format!("{context}: {err}"));
                BTreeMap::new()
            }
        };
        ledger.insert(
            staff,
            StaffCounters {
                morning,
                afternoon,
                early,
                late,
                morning_duty,
                afternoon_duty,
                per_slot,
            },
        );
    }
    (ledger, report)
}

/// Encodes a shift table into its version-scoped sheet.
#[must_use]
pub fn encode_shift_table(shifts: &ShiftTable, tag: &VersionTag) -> Table {
    let mut table: Table = Table::new(
        shift_sheet(shifts.month, tag),
        to_header(&["date", "kind", "morning", "afternoon", "on-call"]),
    );
    for (date, day) in shifts.iter() {
        table.push(vec![
            display_token(*date),
            day_kind_str(day.kind).to_owned(),
            join_names(&day.morning),
            join_names(&day.afternoon),
            day.on_call
                .as_ref()
                .map(|name| name.value().to_owned())
                .unwrap_or_default(),
        ]);
    }
    table
}

/// Decodes a shift table sheet.
#[must_use]
pub fn decode_shift_table(table: &Table, month: &RosterMonth) -> (ShiftTable, RunReport) {
    let mut shifts: ShiftTable = ShiftTable::new(*month);
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [date_s, kind_s, morning_s, afternoon_s, on_call_s] = row.as_slice() else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        let date: Date = match parse_display_token(date_s, month) {
            Ok(date) => date,
            Err(err) => {
                report.push(Tier::ParseWarning, format!("{context}: {err}"));
                continue;
            }
        };
        let Some(kind) = parse_day_kind(kind_s) else {
            report.push(
                Tier::ParseWarning,
                format!("{context}: invalid day kind '{kind_s}'"),
            );
            continue;
        };
        let mut day: ShiftDay = ShiftDay::empty(kind);
        day.morning = split_names(morning_s);
        day.afternoon = split_names(afternoon_s);
        day.on_call = if on_call_s.trim().is_empty() {
            None
        } else {
            Some(StaffName::new(on_call_s))
        };
        shifts.insert(date, day);
    }
    (shifts, report)
}

/// Encodes a room table into its version-scoped sheet, one column per
/// layout slot plus the on-call column.
#[must_use]
pub fn encode_room_table(rooms: &RoomTable, layout: &RoomLayout, tag: &VersionTag) -> Table {
    let columns: Vec<String> = layout.column_keys();
    let mut header: Vec<String> = vec![String::from("date")];
    header.extend(columns.iter().cloned());
    let mut table: Table = Table::new(rooms_sheet(rooms.month, tag), header);
    for (date, day) in rooms.iter() {
        let mut row: Vec<String> = vec![display_token(*date)];
        for key in &columns {
            row.push(
                day.occupant(key)
                    .map(|name| name.value().to_owned())
                    .unwrap_or_default(),
            );
        }
        table.push(row);
    }
    table
}

/// Decodes a room table sheet using its own header for the columns.
#[must_use]
pub fn decode_room_table(table: &Table, month: &RosterMonth) -> (RoomTable, RunReport) {
    let mut rooms: RoomTable = RoomTable::new(*month);
    let mut report: RunReport = RunReport::new();
    let columns: &[String] = table.header.get(1..).unwrap_or(&[]);
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let Some((date_s, cells)) = row.split_first() else {
            report.push(Tier::ParseWarning, format!("{context}: empty row"));
            continue;
        };
        if cells.len() != columns.len() {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        }
        let date: Date = match parse_display_token(date_s, month) {
            Ok(date) => date,
            Err(err) => {
                report.push(Tier::ParseWarning, format!("{context}: {err}"));
                continue;
            }
        };
        let mut day: RoomDay = RoomDay::new();
        for (key, cell) in columns.iter().zip(cells) {
            if cell.trim().is_empty() {
                continue;
            }
            day.assign(key, StaffName::new(cell));
        }
        rooms.insert(date, day);
    }
    (rooms, report)
}

/// Encodes a month's version index.
#[must_use]
pub fn encode_versions(records: &[VersionRecord], month: RosterMonth) -> Table {
    let mut table: Table = Table::new(
        versions_sheet(month),
        to_header(&["tag", "saved-at", "status"]),
    );
    for record in records {
        let status: &str = if record.tag.is_final() { "final" } else { "draft" };
        table.push(vec![
            record.tag.to_string(),
            record.saved_at.clone(),
            status.to_owned(),
        ]);
    }
    table
}

/// Decodes a month's version index.
#[must_use]
pub fn decode_versions(table: &Table) -> (Vec<VersionRecord>, RunReport) {
    let mut records: Vec<VersionRecord> = Vec::new();
    let mut report: RunReport = RunReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let context: String = format!("{} row {}", table.name, index + 1);
        let [tag_s, saved_at, _status] = row.as_slice() else {
            report.push(Tier::ParseWarning, format!("{context}: wrong column count"));
            continue;
        };
        match tag_s.parse::<VersionTag>() {
            Ok(tag) => records.push(VersionRecord {
                tag,
                saved_at: saved_at.clone(),
            }),
            Err(err) => report.push(Tier::ParseWarning, format!("{context}: {err}")),
        }
    }
    (records, report)
}
