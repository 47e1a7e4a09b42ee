// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The full engine run: resolve, balance, allocate, count.

use crate::allocate::allocate;
use crate::balance::{BalanceConfig, balance};
use crate::context::RunContext;
use crate::ledger::contribution;
use crate::resolve::{Availability, resolve_month};
use endo_rota_domain::{
    AvailabilityPattern, ClosureDate, Ledger, RoomLayout, RoomRequest, RoomTable, RunReport,
    ShiftRequest, ShiftTable, SpecialDay, collapse_no_request,
};
use time::Date;

/// Everything a schedule run consumes.
#[derive(Debug, Clone)]
pub struct RunInputs {
    /// The master weekly availability pattern.
    pub pattern: AvailabilityPattern,
    /// The month's leave/preference requests.
    pub requests: Vec<ShiftRequest>,
    /// The month's room-preference requests.
    pub room_requests: Vec<RoomRequest>,
    /// Special (Saturday/holiday) rosters.
    pub specials: Vec<SpecialDay>,
    /// Institution-wide closure dates.
    pub closures: Vec<ClosureDate>,
    /// Balancing knobs.
    pub config: BalanceConfig,
    /// The deployment's room layout.
    pub layout: RoomLayout,
}

/// Everything a schedule run produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The balanced shift table.
    pub shift_table: ShiftTable,
    /// The allocated room table.
    pub room_table: RoomTable,
    /// The month's contribution to the fairness ledger.
    pub contribution: Ledger,
    /// Diagnostics for everything applied or skipped.
    pub report: RunReport,
}

/// Runs the whole pipeline for one month.
///
/// The no-request sentinel is collapsed first, then availability is
/// resolved, shifts balanced, rooms allocated, and the contribution
/// counted from the finished tables.
#[must_use]
pub fn run_schedule(mut ctx: RunContext, inputs: &RunInputs) -> RunOutput {
    let requests: Vec<ShiftRequest> = collapse_no_request(inputs.requests.clone());
    let availability: Availability =
        resolve_month(&ctx.month, &inputs.pattern, &requests, &inputs.closures);

    let closure_dates: Vec<Date> = inputs.closures.iter().map(|c| c.0).collect();
    let shift_table: ShiftTable = balance(
        &mut ctx,
        &inputs.config,
        &availability,
        &requests,
        &inputs.specials,
        &closure_dates,
    );
    let room_table: RoomTable =
        allocate(&mut ctx, &inputs.layout, &shift_table, &inputs.room_requests);
    let contribution: Ledger = contribution(&shift_table, &room_table, &inputs.layout);

    RunOutput {
        shift_table,
        room_table,
        contribution,
        report: ctx.report,
    }
}
