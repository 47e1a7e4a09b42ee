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

//! The assignment engine.
//!
//! Takes the month's inputs (pattern, requests, specials, closures) plus
//! the cumulative fairness ledger and produces the shift table, the room
//! table, the ledger contribution, and a run report. Version lifecycle
//! rules and post-hoc swaps live here as well.

mod allocate;
mod balance;
mod context;
mod error;
mod ledger;
mod resolve;
mod run;
mod swap;
mod version;

#[cfg(test)]
mod tests;

pub use allocate::allocate;
pub use balance::{BalanceConfig, balance};
pub use context::RunContext;
pub use error::CoreError;
pub use ledger::{contribution, roll_forward};
pub use resolve::{Availability, DayAvailability, DayCandidates, resolve_day, resolve_month};
pub use run::{RunInputs, RunOutput, run_schedule};
pub use swap::{
    SwapChange, SwapOutcome, SwapRejection, SwapRequest, SwapTarget, apply_swaps,
};
pub use version::{ensure_rerun_allowed, lifecycle_event, next_draft};
