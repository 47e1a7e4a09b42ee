// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The swap resolver.
//!
//! Applies post-hoc staff swaps to a saved (possibly final) version. Swaps
//! are the only mutation a final version accepts. A swap that touches the
//! day's on-call person exchanges the two parties' entire day; any other
//! swap transfers a single room slot or shift membership.

use endo_rota_domain::{Period, RoomDay, RoomTable, ShiftTable, StaffName, display_token};
use serde::{Deserialize, Serialize};
use time::Date;

/// What a swap request targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapTarget {
    /// One room-table column on the day, by slot key.
    Slot(String),
    /// The staff's whole shift membership for the period.
    Period(Period),
}

/// A request to hand one person's assignment to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// A caller-chosen identifier, echoed in audit records.
    pub id: String,
    /// Who filed the swap.
    pub requester: StaffName,
    /// The person currently holding the assignment.
    pub person_before: StaffName,
    /// The person taking it over.
    pub person_after: StaffName,
    /// The day the swap applies to.
    pub date: Date,
    /// The assignment being handed over.
    pub target: SwapTarget,
}

/// One concrete cell or membership change a swap produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapChange {
    /// The slot key or period label that changed.
    pub slot: String,
    /// The previous holder.
    pub previous: Option<StaffName>,
    /// The new holder.
    pub current: Option<StaffName>,
}

/// Why a swap was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapRejection {
    /// The outgoing person does not hold the targeted assignment.
    SourceNotFound,
    /// The incoming person already works the targeted period.
    AlreadyAssigned,
    /// The date has no assignment row at all.
    NoAssignmentRow,
}

impl std::fmt::Display for SwapRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceNotFound => {
                write!(f, "the outgoing person does not hold the targeted assignment")
            }
            Self::AlreadyAssigned => {
                write!(f, "the incoming person already works the targeted period")
            }
            Self::NoAssignmentRow => write!(f, "the date has no assignment row"),
        }
    }
}

/// The result of one swap request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// The swap was applied; every change is listed.
    Applied {
        /// The cell and membership changes made.
        changes: Vec<SwapChange>,
    },
    /// The swap was refused and the tables were left untouched.
    Rejected {
        /// Why it was refused.
        reason: SwapRejection,
    },
}

/// Applies a batch of swaps in order, each seeing its predecessors'
/// effects. Returns one outcome per request, in request order.
pub fn apply_swaps(
    shifts: &mut ShiftTable,
    rooms: &mut RoomTable,
    swaps: &[SwapRequest],
) -> Vec<SwapOutcome> {
    swaps
        .iter()
        .map(|swap| apply_swap(shifts, rooms, swap))
        .collect()
}

fn apply_swap(shifts: &mut ShiftTable, rooms: &mut RoomTable, swap: &SwapRequest) -> SwapOutcome {
    let Some(shift_day) = shifts.day(swap.date) else {
        return SwapOutcome::Rejected {
            reason: SwapRejection::NoAssignmentRow,
        };
    };

    if shift_day.on_call.as_ref() == Some(&swap.person_before) {
        return swap_on_call(shifts, rooms, swap);
    }

    match &swap.target {
        SwapTarget::Slot(key) => swap_slot(shifts, rooms, swap, key),
        SwapTarget::Period(period) => swap_period(shifts, rooms, swap, *period),
    }
}

/// The symmetric whole-day exchange used when the outgoing person is the
/// day's on-call. Both parties trade their room cells, their shift
/// memberships, and the on-call marker itself.
fn swap_on_call(
    shifts: &mut ShiftTable,
    rooms: &mut RoomTable,
    swap: &SwapRequest,
) -> SwapOutcome {
    let mut changes: Vec<SwapChange> = Vec::new();

    if let Some(room_day) = rooms.day_mut(swap.date) {
        let before_keys: Vec<String> = room_day.keys_for(&swap.person_before);
        let after_keys: Vec<String> = room_day.keys_for(&swap.person_after);
        for key in &before_keys {
            room_day.assign(key, swap.person_after.clone());
            changes.push(SwapChange {
                slot: key.clone(),
                previous: Some(swap.person_before.clone()),
                current: Some(swap.person_after.clone()),
            });
        }
        for key in &after_keys {
            room_day.assign(key, swap.person_before.clone());
            changes.push(SwapChange {
                slot: key.clone(),
                previous: Some(swap.person_after.clone()),
                current: Some(swap.person_before.clone()),
            });
        }
    }

    if let Some(day) = shifts.day_mut(swap.date) {
        for period in [Period::Morning, Period::Afternoon] {
            let workers: &mut Vec<StaffName> = day.workers_mut(period);
            let had_before: bool = workers.contains(&swap.person_before);
            let had_after: bool = workers.contains(&swap.person_after);
            if had_before == had_after {
                continue;
            }
            let (from, to): (&StaffName, &StaffName) = if had_before {
                (&swap.person_before, &swap.person_after)
            } else {
                (&swap.person_after, &swap.person_before)
            };
            for slot in workers.iter_mut().filter(|s| *s == from) {
                *slot = to.clone();
            }
            changes.push(SwapChange {
                slot: format!("{}:{period}", display_token(swap.date)),
                previous: Some(from.clone()),
                current: Some(to.clone()),
            });
        }
        day.on_call = Some(swap.person_after.clone());
        changes.push(SwapChange {
            slot: String::from("on-call"),
            previous: Some(swap.person_before.clone()),
            current: Some(swap.person_after.clone()),
        });
    }

    SwapOutcome::Applied { changes }
}

/// Hands one room-table cell over, keeping the shift lists consistent.
fn swap_slot(
    shifts: &mut ShiftTable,
    rooms: &mut RoomTable,
    swap: &SwapRequest,
    key: &str,
) -> SwapOutcome {
    let Some(room_day) = rooms.day_mut(swap.date) else {
        return SwapOutcome::Rejected {
            reason: SwapRejection::NoAssignmentRow,
        };
    };
    if room_day.occupant(key) != Some(&swap.person_before) {
        return SwapOutcome::Rejected {
            reason: SwapRejection::SourceNotFound,
        };
    }
    let Some(period) = endo_rota_domain::slot_period(key) else {
        return SwapOutcome::Rejected {
            reason: SwapRejection::SourceNotFound,
        };
    };
    if room_day.occupied_in_period(&swap.person_after, period) {
        return SwapOutcome::Rejected {
            reason: SwapRejection::AlreadyAssigned,
        };
    }

    room_day.assign(key, swap.person_after.clone());
    let still_seated: bool = !room_day.keys_for(&swap.person_before).is_empty();
    let mut changes: Vec<SwapChange> = vec![SwapChange {
        slot: key.to_owned(),
        previous: Some(swap.person_before.clone()),
        current: Some(swap.person_after.clone()),
    }];

    if let Some(day) = shifts.day_mut(swap.date) {
        let workers: &mut Vec<StaffName> = day.workers_mut(period);
        if !workers.contains(&swap.person_after) {
            workers.push(swap.person_after.clone());
            changes.push(membership_change(period, None, Some(&swap.person_after)));
        }
        if !still_seated {
            workers.retain(|s| s != &swap.person_before);
            changes.push(membership_change(period, Some(&swap.person_before), None));
        }
    }

    SwapOutcome::Applied { changes }
}

/// Hands the whole period membership over, carrying any room cells along.
fn swap_period(
    shifts: &mut ShiftTable,
    rooms: &mut RoomTable,
    swap: &SwapRequest,
    period: Period,
) -> SwapOutcome {
    let Some(day) = shifts.day_mut(swap.date) else {
        return SwapOutcome::Rejected {
            reason: SwapRejection::NoAssignmentRow,
        };
    };
    let workers: &mut Vec<StaffName> = day.workers_mut(period);
    if !workers.contains(&swap.person_before) {
        return SwapOutcome::Rejected {
            reason: SwapRejection::SourceNotFound,
        };
    }
    if workers.contains(&swap.person_after) {
        return SwapOutcome::Rejected {
            reason: SwapRejection::AlreadyAssigned,
        };
    }

    for slot in workers.iter_mut().filter(|s| **s == swap.person_before) {
        *slot = swap.person_after.clone();
    }
    let mut changes: Vec<SwapChange> = vec![membership_change(
        period,
        Some(&swap.person_before),
        Some(&swap.person_after),
    )];

    if let Some(room_day) = rooms.day_mut(swap.date) {
        for key in carried_keys(room_day, &swap.person_before, period) {
            room_day.assign(&key, swap.person_after.clone());
            changes.push(SwapChange {
                slot: key,
                previous: Some(swap.person_before.clone()),
                current: Some(swap.person_after.clone()),
            });
        }
    }

    SwapOutcome::Applied { changes }
}

fn carried_keys(room_day: &RoomDay, staff: &StaffName, period: Period) -> Vec<String> {
    room_day
        .keys_for(staff)
        .into_iter()
        .filter(|key| endo_rota_domain::slot_period(key) == Some(period))
        .collect()
}

fn membership_change(
    period: Period,
    previous: Option<&StaffName>,
    current: Option<&StaffName>,
) -> SwapChange {
    SwapChange {
        slot: period.to_string(),
        previous: previous.cloned(),
        current: current.cloned(),
    }
}
