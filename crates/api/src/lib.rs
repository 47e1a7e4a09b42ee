// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! The API layer: string-typed DTOs and the operation handlers that sit
//! between the HTTP server and the engine/store.

mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_export::table_to_csv;
pub use error::ApiError;
pub use handlers::{
    apply_swaps, delete_version, export_schedule_csv, finalize_version, generate_schedule,
    list_versions, save_version,
};
pub use request_response::{
    ApplySwapsRequest, ApplySwapsResponse, DeleteVersionRequest, ExportScheduleRequest,
    ExportScheduleResponse, FinalizeVersionRequest, GenerateScheduleRequest, ListVersionsRequest,
    ListVersionsResponse, ReportEntryDto, RoomDayDto, SaveVersionRequest, ScheduleResponse,
    ShiftDayDto, SwapDto, SwapOutcomeDto, VersionInfo,
};
