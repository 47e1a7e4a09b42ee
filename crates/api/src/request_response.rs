// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire DTOs for the API operations.
//!
//! Months travel as `"YYYY-MM"`, dates as ISO `YYYY-MM-DD`, every other
//! token in its persisted string form. Parsing into domain types happens
//! in the handlers so a malformed payload becomes a 400, never a panic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Asks for a preview run of the engine. Nothing is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    /// The target month, `"YYYY-MM"`.
    pub month: String,
    /// Optional seed for a reproducible run.
    pub seed: Option<u64>,
}

/// Asks for an engine run to be persisted under the next draft tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveVersionRequest {
    /// The target month, `"YYYY-MM"`.
    pub month: String,
    /// Optional seed for a reproducible run.
    pub seed: Option<u64>,
    /// Who is saving, for the audit trail.
    pub actor: String,
}

/// Asks for a saved draft to be promoted to the final version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeVersionRequest {
    /// The target month, `"YYYY-MM"`.
    pub month: String,
    /// The draft to promote; the latest draft when omitted.
    pub tag: Option<String>,
    /// Who is finalizing, for the audit trail.
    pub actor: String,
}

/// Asks for a saved version to be deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteVersionRequest {
    /// The target month, `"YYYY-MM"`.
    pub month: String,
    /// The version to delete.
    pub tag: String,
    /// Who is deleting, for the audit trail.
    pub actor: String,
}

/// Asks which versions exist for a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVersionsRequest {
    /// The target month, `"YYYY-MM"`.
    pub month: String,
}

/// One saved version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// The version tag, e.g. `"ver2.0"` or `"final"`.
    pub tag: String,
    /// When it was saved, RFC 3339.
    pub saved_at: String,
    /// `"draft"` or `"final"`.
    pub status: String,
}

/// The response to a version listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVersionsResponse {
    /// The versions saved for the month, in save order.
    pub versions: Vec<VersionInfo>,
}

/// One swap to apply to a saved version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapDto {
    /// A caller-chosen identifier, echoed in the outcome and audit rows.
    pub id: String,
    /// Who filed the swap.
    pub requester: String,
    /// The person currently holding the assignment.
    pub person_before: String,
    /// The person taking it over.
    pub person_after: String,
    /// The day, ISO `YYYY-MM-DD`.
    pub date: String,
    /// `"slot"` or `"period"`.
    pub target_kind: String,
    /// The slot key (`"9:00(4)"`) or period (`"morning"`).
    pub target_value: String,
}

/// Asks for a batch of swaps against a saved version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplySwapsRequest {
    /// The target month, `"YYYY-MM"`.
    pub month: String,
    /// The version to modify.
    pub tag: String,
    /// The swaps, applied in order.
    pub swaps: Vec<SwapDto>,
    /// Who is applying them, for the audit trail.
    pub actor: String,
}

/// The outcome of one swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapOutcomeDto {
    /// The request identifier this outcome answers.
    pub id: String,
    /// Whether the swap was applied.
    pub applied: bool,
    /// Human-readable detail: the changes made, or the rejection reason.
    pub detail: String,
}

/// The response to a swap batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplySwapsResponse {
    /// One outcome per swap, in request order.
    pub outcomes: Vec<SwapOutcomeDto>,
}

/// Asks for a CSV export of a saved version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportScheduleRequest {
    /// The target month, `"YYYY-MM"`.
    pub month: String,
    /// The version to export.
    pub tag: String,
    /// Which table: `"shift"` or `"rooms"`.
    pub table: String,
}

/// A CSV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportScheduleResponse {
    /// The exported sheet name.
    pub sheet: String,
    /// The CSV payload, display-token dates included.
    pub csv: String,
}

/// One shift-table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDayDto {
    /// The date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// `"regular"`, `"closure"`, `"special"` or `"small-team"`.
    pub kind: String,
    /// Morning workers.
    pub morning: Vec<String>,
    /// Afternoon workers.
    pub afternoon: Vec<String>,
    /// The on-call person, if assigned.
    pub on_call: Option<String>,
}

/// One room-table row: slot key to occupant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDayDto {
    /// The date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Occupants keyed by slot token (plus the on-call column).
    pub cells: BTreeMap<String, String>,
}

/// One run-report entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntryDto {
    /// `"applied"`, `"soft-skip"`, `"hard-skip"` or `"parse-warning"`.
    pub tier: String,
    /// What happened.
    pub message: String,
}

/// A generated (or saved) schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// The month, `"YYYY-MM"`.
    pub month: String,
    /// The version tag the run was saved under, if it was saved.
    pub tag: Option<String>,
    /// The shift table, in calendar order.
    pub shift_days: Vec<ShiftDayDto>,
    /// The room table, in calendar order.
    pub room_days: Vec<RoomDayDto>,
    /// Everything applied or skipped during the run.
    pub report: Vec<ReportEntryDto>,
}
