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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
mod dates;
mod error;
mod ledger;
mod month;
mod pattern;
mod report;
mod requests;
mod rooms;
mod types;
mod validation;
mod version;

#[cfg(test)]
mod tests;

pub use assignment::{DayKind, RoomDay, RoomTable, ShiftDay, ShiftTable};
pub use dates::{display_token, format_iso, parse_date_spec, parse_display_token, parse_iso};
pub use error::DomainError;
pub use ledger::{Ledger, StaffCounters};
pub use month::RosterMonth;
pub use pattern::AvailabilityPattern;
pub use report::{ReportEntry, RunReport, Tier};
pub use requests::{
    RequestCategory, RoomRequest, RoomRequestCategory, ShiftRequest, collapse_no_request,
};
pub use rooms::{ON_CALL_KEY, RoomLayout, RoomSlot, SlotTime, parse_slot_key, slot_period};
pub use types::{AvailabilityStatus, ClosureDate, Period, SpecialDay, StaffName, WeekTag};
pub use validation::{validate_room_layout, validate_special_day, validate_staff_name};
pub use version::VersionTag;
