// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The API operations, each generic over a [`TableStore`] backend.
//!
//! Handlers parse the string DTOs into domain types, load inputs through
//! the retry wrapper, run the engine, and persist results. Decode
//! warnings from every loaded sheet ride along in the returned report.

use crate::csv_export::table_to_csv;
use crate::error::ApiError;
use crate::request_response::{
    ApplySwapsRequest, ApplySwapsResponse, DeleteVersionRequest, ExportScheduleRequest,
    ExportScheduleResponse, FinalizeVersionRequest, GenerateScheduleRequest, ListVersionsRequest,
    ListVersionsResponse, ReportEntryDto, RoomDayDto, SaveVersionRequest, ScheduleResponse,
    ShiftDayDto, SwapDto, SwapOutcomeDto, VersionInfo,
};
use endo_rota::{
    BalanceConfig, RunContext, RunInputs, RunOutput, SwapOutcome, SwapRequest, SwapTarget,
    contribution, ensure_rerun_allowed, lifecycle_event, next_draft, roll_forward, run_schedule,
};
use endo_rota_audit::AuditEvent;
use endo_rota_domain::{
    Ledger, Period, RoomLayout, RoomTable, RosterMonth, RunReport, ShiftTable, StaffName,
    VersionTag, format_iso, parse_iso,
};
use endo_rota_store::codec::{
    self, AUDIT_SHEET, PATTERN_SHEET, VersionRecord, decode_closures, decode_ledger,
    decode_pattern, decode_requests, decode_room_requests, decode_room_table, decode_shift_table,
    decode_specials, decode_versions, encode_ledger, encode_room_table, encode_shift_table,
    encode_versions,
};
use endo_rota_store::{StoreError, Table, TableStore, with_retry};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

/// Runs the engine for a month without writing anything.
///
/// # Errors
///
/// Returns [`ApiError::VersionLocked`] if a final version exists, or an
/// error from loading the input sheets.
pub fn generate_schedule<S: TableStore + ?Sized>(
    store: &S,
    request: &GenerateScheduleRequest,
) -> Result<ScheduleResponse, ApiError> {
    let month: RosterMonth = request.month.parse()?;
    let (records, _) = load_versions(store, month)?;
    ensure_rerun_allowed(month, &tags(&records))?;

    let (inputs, base, mut report) = load_inputs(store, month)?;
    let output: RunOutput = run_schedule(make_context(month, base, request.seed), &inputs);
    report.merge(output.report.clone());

    tracing::info!(%month, "generated schedule preview");
    Ok(schedule_response(month, None, &output, report))
}

/// Runs the engine and persists the result under the next draft tag.
///
/// Writes the shift and room sheets, rolls the cumulative ledger forward
/// into the next month's sheet, updates the version index, and appends
/// one audit row.
///
/// # Errors
///
/// Returns [`ApiError::VersionLocked`] if a final version exists, or a
/// store error from any write.
pub fn save_version<S: TableStore + ?Sized>(
    store: &mut S,
    request: &SaveVersionRequest,
) -> Result<ScheduleResponse, ApiError> {
    let month: RosterMonth = request.month.parse()?;
    let (mut records, _) = load_versions(store, month)?;
    ensure_rerun_allowed(month, &tags(&records))?;
    let tag: VersionTag = next_draft(&tags(&records));

    let (inputs, base, mut report) = load_inputs(store, month)?;
    let output: RunOutput = run_schedule(make_context(month, base, request.seed), &inputs);
    report.merge(output.report.clone());

    put(store, &encode_shift_table(&output.shift_table, &tag))?;
    put(store, &encode_room_table(&output.room_table, &inputs.layout, &tag))?;
    write_forward_ledger(store, month, &output.contribution)?;

    records.push(VersionRecord {
        tag,
        saved_at: timestamp(),
    });
    put(store, &encode_versions(&records, month))?;

    let event: AuditEvent = lifecycle_event(
        &request.actor,
        "SaveVersion",
        None,
        format!("versions={}", records.len() - 1),
        format!("versions={}", records.len()),
        month,
        tag,
    );
    append_audit(store, &event)?;

    tracing::info!(%month, %tag, "saved schedule version");
    Ok(schedule_response(month, Some(tag), &output, report))
}

/// Promotes a saved draft to the final version, locking the month.
///
/// # Errors
///
/// Returns [`ApiError::VersionLocked`] if a final version already exists,
/// or [`ApiError::VersionNotFound`] if the named draft is missing.
pub fn finalize_version<S: TableStore + ?Sized>(
    store: &mut S,
    request: &FinalizeVersionRequest,
) -> Result<VersionInfo, ApiError> {
    let month: RosterMonth = request.month.parse()?;
    let (mut records, _) = load_versions(store, month)?;
    if records.iter().any(|r| r.tag.is_final()) {
        return Err(ApiError::VersionLocked { month });
    }

    let source: VersionTag = match &request.tag {
        Some(tag_s) => tag_s.parse()?,
        None => latest_draft(&records).ok_or(ApiError::VersionNotFound {
            month,
            tag: VersionTag::first(),
        })?,
    };
    if !records.iter().any(|r| r.tag == source) {
        return Err(ApiError::VersionNotFound { month, tag: source });
    }

    copy_sheet(store, &codec::shift_sheet(month, &source), codec::shift_sheet(month, &VersionTag::Final))?;
    copy_sheet(store, &codec::rooms_sheet(month, &source), codec::rooms_sheet(month, &VersionTag::Final))?;

    let record: VersionRecord = VersionRecord {
        tag: VersionTag::Final,
        saved_at: timestamp(),
    };
    records.push(record.clone());
    put(store, &encode_versions(&records, month))?;

    let event: AuditEvent = lifecycle_event(
        &request.actor,
        "FinalizeVersion",
        Some(format!("promoted {source}")),
        format!("status=draft ({source})"),
        String::from("status=final"),
        month,
        VersionTag::Final,
    );
    append_audit(store, &event)?;

    tracing::info!(%month, %source, "finalized schedule version");
    Ok(version_info(&record))
}

/// Deletes a saved version.
///
/// The month's forward ledger follows the surviving versions: when any
/// remain, it is rebuilt from the latest one's saved tables; when none
/// remain, the forward-ledger artifacts are removed with it.
///
/// # Errors
///
/// Returns [`ApiError::VersionNotFound`] if the tag is not saved.
pub fn delete_version<S: TableStore + ?Sized>(
    store: &mut S,
    request: &DeleteVersionRequest,
) -> Result<ListVersionsResponse, ApiError> {
    let month: RosterMonth = request.month.parse()?;
    let tag: VersionTag = request.tag.parse()?;
    let (mut records, _) = load_versions(store, month)?;
    if !records.iter().any(|r| r.tag == tag) {
        return Err(ApiError::VersionNotFound { month, tag });
    }

    delete(store, &codec::shift_sheet(month, &tag))?;
    delete(store, &codec::rooms_sheet(month, &tag))?;
    records.retain(|r| r.tag != tag);

    match latest_tag(&records) {
        Some(survivor) => {
            let shift_sheet: Table =
                load_required(store, &codec::shift_sheet(month, &survivor), month, survivor)?;
            let rooms_sheet: Table =
                load_required(store, &codec::rooms_sheet(month, &survivor), month, survivor)?;
            let (shifts, _): (ShiftTable, RunReport) = decode_shift_table(&shift_sheet, &month);
            let (rooms, _): (RoomTable, RunReport) = decode_room_table(&rooms_sheet, &month);
            let rebuilt: Ledger = contribution(&shifts, &rooms, &RoomLayout::reference());
            write_forward_ledger(store, month, &rebuilt)?;
        }
        None => {
            delete(store, &codec::ledger_sheet(month.next()))?;
            delete(store, &codec::ledger_contribution_sheet(month))?;
        }
    }
    put(store, &encode_versions(&records, month))?;

    let event: AuditEvent = lifecycle_event(
        &request.actor,
        "DeleteVersion",
        None,
        format!("versions={}", records.len() + 1),
        format!("versions={}", records.len()),
        month,
        tag,
    );
    append_audit(store, &event)?;

    tracing::info!(%month, %tag, "deleted schedule version");
    Ok(ListVersionsResponse {
        versions: records.iter().map(version_info).collect(),
    })
}

/// Lists the versions saved for a month, in save order.
///
/// # Errors
///
/// Returns a store error if the index cannot be read.
pub fn list_versions<S: TableStore + ?Sized>(
    store: &S,
    request: &ListVersionsRequest,
) -> Result<ListVersionsResponse, ApiError> {
    let month: RosterMonth = request.month.parse()?;
    let (records, _) = load_versions(store, month)?;
    Ok(ListVersionsResponse {
        versions: records.iter().map(version_info).collect(),
    })
}

/// Applies a batch of swaps to a saved version. Allowed even on `final`;
/// swaps are the one mutation a locked month accepts.
///
/// # Errors
///
/// Returns [`ApiError::VersionNotFound`] if the tag is not saved, or
/// [`ApiError::MonthMismatch`] if a swap date falls outside the month.
pub fn apply_swaps<S: TableStore + ?Sized>(
    store: &mut S,
    request: &ApplySwapsRequest,
) -> Result<ApplySwapsResponse, ApiError> {
    let month: RosterMonth = request.month.parse()?;
    let tag: VersionTag = request.tag.parse()?;
    let (records, _) = load_versions(store, month)?;
    if !records.iter().any(|r| r.tag == tag) {
        return Err(ApiError::VersionNotFound { month, tag });
    }

    let swaps: Vec<SwapRequest> = request
        .swaps
        .iter()
        .map(|dto| parse_swap(dto, month))
        .collect::<Result<Vec<SwapRequest>, ApiError>>()?;

    let shift_sheet: Table = load_required(store, &codec::shift_sheet(month, &tag), month, tag)?;
    let rooms_sheet: Table = load_required(store, &codec::rooms_sheet(month, &tag), month, tag)?;
    let (mut shifts, _): (ShiftTable, RunReport) = decode_shift_table(&shift_sheet, &month);
    let (mut rooms, _): (RoomTable, RunReport) = decode_room_table(&rooms_sheet, &month);

    let outcomes: Vec<SwapOutcome> = endo_rota::apply_swaps(&mut shifts, &mut rooms, &swaps);

    put(store, &encode_shift_table(&shifts, &tag))?;
    put(store, &encode_room_table(&rooms, &RoomLayout::reference(), &tag))?;

    append_swap_log(store, month, &request.swaps, &outcomes)?;

    let applied: usize = outcomes
        .iter()
        .filter(|o| matches!(o, SwapOutcome::Applied { .. }))
        .count();
    let event: AuditEvent = lifecycle_event(
        &request.actor,
        "ApplySwaps",
        Some(format!("{} requested, {applied} applied", request.swaps.len())),
        String::from("swaps=pending"),
        format!("swaps=applied:{applied}"),
        month,
        tag,
    );
    append_audit(store, &event)?;

    tracing::info!(%month, %tag, applied, "applied swap batch");
    Ok(ApplySwapsResponse {
        outcomes: request
            .swaps
            .iter()
            .zip(&outcomes)
            .map(|(dto, outcome)| outcome_dto(dto, outcome))
            .collect(),
    })
}

/// Exports one saved table as CSV, display-token dates included.
///
/// # Errors
///
/// Returns [`ApiError::VersionNotFound`] if the tag is not saved, or
/// [`ApiError::BadInput`] for an unknown table selector.
pub fn export_schedule_csv<S: TableStore + ?Sized>(
    store: &S,
    request: &ExportScheduleRequest,
) -> Result<ExportScheduleResponse, ApiError> {
    let month: RosterMonth = request.month.parse()?;
    let tag: VersionTag = request.tag.parse()?;
    let sheet: String = match request.table.as_str() {
        "shift" => codec::shift_sheet(month, &tag),
        "rooms" => codec::rooms_sheet(month, &tag),
        other => {
            return Err(ApiError::BadInput(format!(
                "unknown table '{other}', expected 'shift' or 'rooms'"
            )));
        }
    };
    let table: Table = load_required(store, &sheet, month, tag)?;
    Ok(ExportScheduleResponse {
        csv: table_to_csv(&table)?,
        sheet,
    })
}

fn make_context(month: RosterMonth, base: Ledger, seed: Option<u64>) -> RunContext {
    match seed {
        Some(seed) => RunContext::with_seed(month, base, seed),
        None => RunContext::new(month, base),
    }
}

fn tags(records: &[VersionRecord]) -> Vec<VersionTag> {
    records.iter().map(|r| r.tag).collect()
}

/// The most recent version: `final` when present, else the highest draft.
fn latest_tag(records: &[VersionRecord]) -> Option<VersionTag> {
    if records.iter().any(|r| r.tag.is_final()) {
        return Some(VersionTag::Final);
    }
    latest_draft(records)
}

fn latest_draft(records: &[VersionRecord]) -> Option<VersionTag> {
    records
        .iter()
        .filter_map(|r| match r.tag {
            VersionTag::Draft(n) => Some(n),
            VersionTag::Final => None,
        })
        .max()
        .map(VersionTag::Draft)
}

fn version_info(record: &VersionRecord) -> VersionInfo {
    VersionInfo {
        tag: record.tag.to_string(),
        saved_at: record.saved_at.clone(),
        status: if record.tag.is_final() {
            String::from("final")
        } else {
            String::from("draft")
        },
    }
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_or_else(|_| String::new(), |formatted| formatted)
}

fn load_optional<S: TableStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Option<Table>, ApiError> {
    match with_retry(name, || store.get_table(name)) {
        Ok(table) => Ok(Some(table)),
        Err(StoreError::TableNotFound(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn load_required<S: TableStore + ?Sized>(
    store: &S,
    name: &str,
    month: RosterMonth,
    tag: VersionTag,
) -> Result<Table, ApiError> {
    load_optional(store, name)?.ok_or(ApiError::VersionNotFound { month, tag })
}

fn put<S: TableStore + ?Sized>(store: &mut S, table: &Table) -> Result<(), ApiError> {
    with_retry(&table.name, || store.put_table(table))?;
    Ok(())
}

fn delete<S: TableStore + ?Sized>(store: &mut S, name: &str) -> Result<(), ApiError> {
    with_retry(name, || store.delete_table(name))?;
    Ok(())
}

fn copy_sheet<S: TableStore + ?Sized>(
    store: &mut S,
    from: &str,
    to: String,
) -> Result<(), ApiError> {
    let mut table: Table = with_retry(from, || store.get_table(from))?;
    table.name = to;
    put(store, &table)
}

fn load_versions<S: TableStore + ?Sized>(
    store: &S,
    month: RosterMonth,
) -> Result<(Vec<VersionRecord>, RunReport), ApiError> {
    let Some(table) = load_optional(store, &codec::versions_sheet(month))? else {
        return Ok((Vec::new(), RunReport::new()));
    };
    Ok(decode_versions(&table))
}

/// Loads every input sheet for a month, defaulting missing ones to empty.
fn load_inputs<S: TableStore + ?Sized>(
    store: &S,
    month: RosterMonth,
) -> Result<(RunInputs, Ledger, RunReport), ApiError> {
    let mut report: RunReport = RunReport::new();

    let pattern = match load_optional(store, PATTERN_SHEET)? {
        Some(table) => {
            let (pattern, warnings) = decode_pattern(&table);
            report.merge(warnings);
            pattern
        }
        None => endo_rota_domain::AvailabilityPattern::new(),
    };
    let requests = match load_optional(store, &codec::requests_sheet(month))? {
        Some(table) => {
            let (requests, warnings) = decode_requests(&table);
            report.merge(warnings);
            requests
        }
        None => Vec::new(),
    };
    let room_requests = match load_optional(store, &codec::room_requests_sheet(month))? {
        Some(table) => {
            let (requests, warnings) = decode_room_requests(&table);
            report.merge(warnings);
            requests
        }
        None => Vec::new(),
    };
    let specials = match load_optional(store, &codec::specials_sheet(month))? {
        Some(table) => {
            let (specials, warnings) = decode_specials(&table);
            report.merge(warnings);
            specials
        }
        None => Vec::new(),
    };
    let closures = match load_optional(store, &codec::closures_sheet(month))? {
        Some(table) => {
            let (closures, warnings) = decode_closures(&table);
            report.merge(warnings);
            closures
        }
        None => Vec::new(),
    };
    let base = match load_optional(store, &codec::ledger_sheet(month))? {
        Some(table) => {
            let (ledger, warnings) = decode_ledger(&table);
            report.merge(warnings);
            ledger
        }
        None => Ledger::new(),
    };

    let inputs: RunInputs = RunInputs {
        pattern,
        requests,
        room_requests,
        specials,
        closures,
        config: BalanceConfig::default(),
        layout: RoomLayout::reference(),
    };
    Ok((inputs, base, report))
}

/// Rolls the cumulative ledger into the next month's sheet.
fn write_forward_ledger<S: TableStore + ?Sized>(
    store: &mut S,
    month: RosterMonth,
    contribution: &Ledger,
) -> Result<(), ApiError> {
    let next: RosterMonth = month.next();
    let saved: Ledger = match load_optional(store, &codec::ledger_sheet(next))? {
        Some(table) => decode_ledger(&table).0,
        None => match load_optional(store, &codec::ledger_sheet(month))? {
            Some(table) => decode_ledger(&table).0,
            None => Ledger::new(),
        },
    };
    let saved_contribution: Ledger =
        match load_optional(store, &codec::ledger_contribution_sheet(month))? {
            Some(table) => decode_ledger(&table).0,
            None => Ledger::new(),
        };

    let rolled: Ledger = roll_forward(&saved, &saved_contribution, contribution);
    put(store, &encode_ledger(&rolled, codec::ledger_sheet(next))?)?;
    put(
        store,
        &encode_ledger(contribution, codec::ledger_contribution_sheet(month))?,
    )?;
    Ok(())
}

fn append_audit<S: TableStore + ?Sized>(
    store: &mut S,
    event: &AuditEvent,
) -> Result<(), ApiError> {
    if load_optional(store, AUDIT_SHEET)?.is_none() {
        put(store, &Table::new(AUDIT_SHEET, codec::audit_log_header()))?;
    }
    let row: Vec<String> = vec![
        event.actor.id.clone(),
        event.cause.description.clone(),
        event.action.name.clone(),
        event.action.details.clone().unwrap_or_default(),
        event.before.data.clone(),
        event.after.data.clone(),
        event.month.to_string(),
        event.version.to_string(),
    ];
    with_retry(AUDIT_SHEET, || store.append_rows(AUDIT_SHEET, &[row.clone()]))?;
    Ok(())
}

fn append_swap_log<S: TableStore + ?Sized>(
    store: &mut S,
    month: RosterMonth,
    swaps: &[SwapDto],
    outcomes: &[SwapOutcome],
) -> Result<(), ApiError> {
    let sheet: String = codec::swap_log_sheet(month);
    if load_optional(store, &sheet)?.is_none() {
        put(store, &Table::new(sheet.clone(), codec::swap_log_header()))?;
    }
    let rows: Vec<Vec<String>> = swaps
        .iter()
        .zip(outcomes)
        .map(|(dto, outcome)| {
            vec![
                dto.id.clone(),
                dto.requester.clone(),
                dto.person_before.clone(),
                dto.person_after.clone(),
                dto.date.clone(),
                format!("{}:{}", dto.target_kind, dto.target_value),
                outcome_summary(outcome),
            ]
        })
        .collect();
    with_retry(&sheet, || store.append_rows(&sheet, &rows))?;
    Ok(())
}

fn parse_swap(dto: &SwapDto, month: RosterMonth) -> Result<SwapRequest, ApiError> {
    let date: Date = parse_iso(&dto.date)?;
    if !month.contains(date) {
        return Err(ApiError::MonthMismatch {
            month,
            date: dto.date.clone(),
        });
    }
    let target: SwapTarget = match dto.target_kind.as_str() {
        "slot" => SwapTarget::Slot(dto.target_value.clone()),
        "period" => {
            let period: Period = dto.target_value.parse()?;
            SwapTarget::Period(period)
        }
        other => {
            return Err(ApiError::BadInput(format!(
                "unknown swap target '{other}', expected 'slot' or 'period'"
            )));
        }
    };
    Ok(SwapRequest {
        id: dto.id.clone(),
        requester: StaffName::new(&dto.requester),
        person_before: StaffName::new(&dto.person_before),
        person_after: StaffName::new(&dto.person_after),
        date,
        target,
    })
}

fn outcome_summary(outcome: &SwapOutcome) -> String {
    match outcome {
        SwapOutcome::Applied { changes } => format!("applied ({} changes)", changes.len()),
        SwapOutcome::Rejected { reason } => format!("rejected: {reason}"),
    }
}

fn outcome_dto(dto: &SwapDto, outcome: &SwapOutcome) -> SwapOutcomeDto {
    SwapOutcomeDto {
        id: dto.id.clone(),
        applied: matches!(outcome, SwapOutcome::Applied { .. }),
        detail: outcome_summary(outcome),
    }
}

fn schedule_response(
    month: RosterMonth,
    tag: Option<VersionTag>,
    output: &RunOutput,
    report: RunReport,
) -> ScheduleResponse {
    ScheduleResponse {
        month: month.to_string(),
        tag: tag.map(|t| t.to_string()),
        shift_days: output
            .shift_table
            .iter()
            .map(|(date, day)| ShiftDayDto {
                date: format_iso(*date),
                kind: day_kind_label(day.kind).to_owned(),
                morning: day.morning.iter().map(ToString::to_string).collect(),
                afternoon: day.afternoon.iter().map(ToString::to_string).collect(),
                on_call: day.on_call.as_ref().map(ToString::to_string),
            })
            .collect(),
        room_days: output
            .room_table
            .iter()
            .map(|(date, day)| RoomDayDto {
                date: format_iso(*date),
                cells: day
                    .iter()
                    .map(|(key, staff)| (key.clone(), staff.to_string()))
                    .collect(),
            })
            .collect(),
        report: report
            .entries()
            .iter()
            .map(|entry| ReportEntryDto {
                tier: entry.tier.as_str().to_owned(),
                message: entry.message.clone(),
            })
            .collect(),
    }
}

const fn day_kind_label(kind: endo_rota_domain::DayKind) -> &'static str {
    match kind {
        endo_rota_domain::DayKind::Regular => "regular",
        endo_rota_domain::DayKind::Closure => "closure",
        endo_rota_domain::DayKind::Special => "special",
        endo_rota_domain::DayKind::SmallTeam => "small-team",
    }
}
