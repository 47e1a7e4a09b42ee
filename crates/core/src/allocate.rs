// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The room allocator.
//!
//! Seats each day's shift workers into the configured procedure-room
//! slots. Room requests are honored best-effort and every skip lands in
//! the run report; the fill itself is greedy, always giving a slot to
//! whoever has held it (and its early/late/duty character) least often.

use crate::context::RunContext;
use endo_rota_domain::{
    DayKind, Ledger, ON_CALL_KEY, Period, RoomDay, RoomLayout, RoomRequest, RoomRequestCategory,
    RoomSlot, RoomTable, ShiftDay, ShiftTable, StaffCounters, StaffName, Tier, display_token,
};
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use time::Date;

/// Allocates procedure rooms for every day of the shift table.
#[must_use]
pub fn allocate(
    ctx: &mut RunContext,
    layout: &RoomLayout,
    shifts: &ShiftTable,
    requests: &[RoomRequest],
) -> RoomTable {
    let mut table: RoomTable = RoomTable::new(ctx.month);
    let mut run: Ledger = Ledger::new();
    let mut handled: Vec<bool> = vec![false; requests.len()];

    for (date, day) in shifts.iter() {
        let mut room_day: RoomDay = RoomDay::new();
        match day.kind {
            DayKind::Closure => {}
            DayKind::SmallTeam => {
                skip_day_requests(ctx, requests, &mut handled, *date, "a small-team day");
                ctx.report.push(
                    Tier::SoftSkip,
                    format!(
                        "{}: small-team day, no room assignments made",
                        display_token(*date)
                    ),
                );
            }
            DayKind::Special => {
                fill_special(ctx, layout, day, requests, &mut handled, *date, &mut room_day, &mut run);
            }
            DayKind::Regular => {
                for period in [Period::Morning, Period::Afternoon] {
                    fill_period(
                        ctx, layout, day, requests, &mut handled, *date, period, &mut room_day,
                        &mut run,
                    );
                }
                if let Some(on_call) = &day.on_call {
                    room_day.assign(ON_CALL_KEY, on_call.clone());
                }
            }
        }
        table.insert(*date, room_day);
    }

    for (request, handled) in requests.iter().zip(&handled) {
        if !handled {
            ctx.report.push(
                Tier::HardSkip,
                format!(
                    "{}: room request {} from {} targets a day with no room schedule",
                    display_token(request.date),
                    request.category,
                    request.staff
                ),
            );
        }
    }

    table
}

/// Seats one period of a regular day.
#[allow(clippy::too_many_arguments)]
fn fill_period(
    ctx: &mut RunContext,
    layout: &RoomLayout,
    day: &ShiftDay,
    requests: &[RoomRequest],
    handled: &mut [bool],
    date: Date,
    period: Period,
    room_day: &mut RoomDay,
    run: &mut Ledger,
) {
    let slots: Vec<RoomSlot> = layout.slots_for(period);
    let workers: Vec<StaffName> = day.workers(period).to_vec();
    let mut remaining: Vec<StaffName> = workers.clone();

    // The on-call person takes the morning duty room when they also work
    // the morning.
    if period == Period::Morning {
        if let (Some(duty), Some(on_call)) = (layout.duty_slot(Period::Morning), &day.on_call) {
            if remaining.contains(on_call) {
                seat(room_day, run, &duty, on_call);
                remaining.retain(|s| s != on_call);
            }
        }
    }

    apply_pinned_requests(
        ctx, layout, requests, handled, date, period, &workers, &mut remaining, room_day, run,
    );
    let exclusions: HashMap<StaffName, HashSet<String>> =
        build_exclusions(requests, handled, date, period, &slots);

    for slot in &slots {
        let key: String = slot.key();
        if room_day.occupant(&key).is_some() {
            continue;
        }
        if remaining.is_empty() {
            ctx.report.push(
                Tier::SoftSkip,
                format!("{}: room slot {key} left empty, no workers left", display_token(date)),
            );
            continue;
        }
        let mut candidates: Vec<StaffName> = remaining
            .iter()
            .filter(|staff| {
                !exclusions
                    .get(*staff)
                    .is_some_and(|keys| keys.contains(&key))
            })
            .cloned()
            .collect();
        let violated: bool = candidates.is_empty();
        if violated {
            candidates.clone_from(&remaining);
        }
        // The afternoon duty room goes to someone whose duty allowance is
        // still open, when anyone qualifies.
        if slot.duty && slot.period() == Period::Afternoon {
            let with_allowance: Vec<StaffName> = candidates
                .iter()
                .filter(|staff| remaining_afternoon_duty(&ctx.base, run, staff) > 0)
                .cloned()
                .collect();
            if !with_allowance.is_empty() {
                candidates = with_allowance;
            }
        }
        candidates.shuffle(ctx.rng());
        candidates.sort_by_key(|staff| score(&ctx.base, run, staff, slot));
        let Some(chosen) = candidates.into_iter().next() else {
            continue;
        };
        if violated {
            ctx.report.push(
                Tier::SoftSkip,
                format!(
                    "{}: seated {} in {key} despite their exclusion request, nobody else left",
                    display_token(date),
                    chosen
                ),
            );
        }
        seat(room_day, run, slot, &chosen);
        remaining.retain(|s| s != &chosen);
    }

    for staff in remaining {
        ctx.report.push(
            Tier::SoftSkip,
            format!(
                "{}: {staff} works the {period} but every room is taken",
                display_token(date)
            ),
        );
    }
}

/// Applies numbered-room and start-time requests for one (date, period).
#[allow(clippy::too_many_arguments)]
fn apply_pinned_requests(
    ctx: &mut RunContext,
    layout: &RoomLayout,
    requests: &[RoomRequest],
    handled: &mut [bool],
    date: Date,
    period: Period,
    workers: &[StaffName],
    remaining: &mut Vec<StaffName>,
    room_day: &mut RoomDay,
    run: &mut Ledger,
) {
    for (index, request) in requests.iter().enumerate() {
        if request.date != date || request.period != period {
            continue;
        }
        let token: String = display_token(date);
        match request.category {
            RoomRequestCategory::Room(room) => {
                handled[index] = true;
                let Some(slot) = layout.slot_for_room(period, room) else {
                    ctx.report.push(
                        Tier::HardSkip,
                        format!("{token}: {} asked for room {room}, which is not configured for the {period}", request.staff),
                    );
                    continue;
                };
                if slot.duty {
                    ctx.report.push(
                        Tier::HardSkip,
                        format!("{token}: {} asked for room {room}, but the duty room is filled by rotation", request.staff),
                    );
                    continue;
                }
                pin(ctx, &slot, request, workers, remaining, room_day, run, &token);
            }
            RoomRequestCategory::StartTime(time) => {
                handled[index] = true;
                if time.period() != period {
                    ctx.report.push(
                        Tier::HardSkip,
                        format!("{token}: {} asked for a {time} start in the {period}", request.staff),
                    );
                    continue;
                }
                let open: Option<RoomSlot> = layout
                    .slots_for(period)
                    .into_iter()
                    .find(|s| s.time == time && !s.duty && room_day.occupant(&s.key()).is_none());
                let Some(slot) = open else {
                    ctx.report.push(
                        Tier::SoftSkip,
                        format!("{token}: no open {time} room left for {}", request.staff),
                    );
                    continue;
                };
                pin(ctx, &slot, request, workers, remaining, room_day, run, &token);
            }
            _ => {}
        }
    }
}

/// Seats one pinned request if the requester is working and free.
#[allow(clippy::too_many_arguments)]
fn pin(
    ctx: &mut RunContext,
    slot: &RoomSlot,
    request: &RoomRequest,
    workers: &[StaffName],
    remaining: &mut Vec<StaffName>,
    room_day: &mut RoomDay,
    run: &mut Ledger,
    token: &str,
) {
    if !workers.contains(&request.staff) {
        ctx.report.push(
            Tier::SoftSkip,
            format!(
                "{token}: {} asked for {} but does not work the {}",
                request.staff,
                slot.key(),
                request.period
            ),
        );
        return;
    }
    if room_day.occupied_in_period(&request.staff, request.period) {
        ctx.report.push(
            Tier::SoftSkip,
            format!("{token}: {} already holds a {} room", request.staff, request.period),
        );
        return;
    }
    if room_day.occupant(&slot.key()).is_some() {
        ctx.report.push(
            Tier::SoftSkip,
            format!("{token}: {} is already taken, skipping {}'s request", slot.key(), request.staff),
        );
        return;
    }
    seat(room_day, run, slot, &request.staff);
    remaining.retain(|s| s != &request.staff);
    ctx.report.push(
        Tier::Applied,
        format!("{token}: honored {}'s request for {}", request.staff, slot.key()),
    );
}

/// Collects per-staff excluded slot keys for one (date, period).
fn build_exclusions(
    requests: &[RoomRequest],
    handled: &mut [bool],
    date: Date,
    period: Period,
    slots: &[RoomSlot],
) -> HashMap<StaffName, HashSet<String>> {
    let mut exclusions: HashMap<StaffName, HashSet<String>> = HashMap::new();
    for (index, request) in requests.iter().enumerate() {
        if request.date != date || request.period != period {
            continue;
        }
        let keys: Vec<String> = match request.category {
            RoomRequestCategory::NoEarlyRooms => slots
                .iter()
                .filter(|s| s.time.is_early())
                .map(RoomSlot::key)
                .collect(),
            RoomRequestCategory::NoLateRooms => slots
                .iter()
                .filter(|s| s.time.is_late())
                .map(RoomSlot::key)
                .collect(),
            RoomRequestCategory::NoDutyEarlyRoom => slots
                .iter()
                .filter(|s| s.duty && s.period() == Period::Morning)
                .map(RoomSlot::key)
                .collect(),
            RoomRequestCategory::NoAfternoonDuty => slots
                .iter()
                .filter(|s| s.duty && s.period() == Period::Afternoon)
                .map(RoomSlot::key)
                .collect(),
            _ => continue,
        };
        handled[index] = true;
        exclusions
            .entry(request.staff.clone())
            .or_default()
            .extend(keys);
    }
    exclusions
}

/// Seats a special day: the duty person takes the duty room, numbered-room
/// requests are honored where feasible, everyone else is shuffled in.
#[allow(clippy::too_many_arguments)]
fn fill_special(
    ctx: &mut RunContext,
    layout: &RoomLayout,
    day: &ShiftDay,
    requests: &[RoomRequest],
    handled: &mut [bool],
    date: Date,
    room_day: &mut RoomDay,
    run: &mut Ledger,
) {
    let slots: Vec<RoomSlot> = layout.special_slots();
    let mut remaining: Vec<StaffName> = day.morning.clone();
    let token: String = display_token(date);

    if let Some(duty_person) = &day.on_call {
        if let Some(duty_slot) = slots.iter().find(|s| s.duty) {
            if remaining.contains(duty_person) {
                seat(room_day, run, duty_slot, duty_person);
                remaining.retain(|s| s != duty_person);
            }
        }
    }

    for (index, request) in requests.iter().enumerate() {
        if request.date != date {
            continue;
        }
        handled[index] = true;
        let RoomRequestCategory::Room(room) = request.category else {
            ctx.report.push(
                Tier::HardSkip,
                format!(
                    "{token}: only numbered-room requests are honored on special days, skipping {} from {}",
                    request.category, request.staff
                ),
            );
            continue;
        };
        let Some(slot) = slots.iter().find(|s| s.room == room) else {
            ctx.report.push(
                Tier::HardSkip,
                format!("{token}: {} asked for room {room}, which is not part of the special-day layout", request.staff),
            );
            continue;
        };
        if slot.duty {
            ctx.report.push(
                Tier::HardSkip,
                format!("{token}: {} asked for room {room}, but the duty room goes to the duty person", request.staff),
            );
            continue;
        }
        if !remaining.contains(&request.staff) {
            ctx.report.push(
                Tier::SoftSkip,
                format!("{token}: {} is not on the special-day roster or already seated", request.staff),
            );
            continue;
        }
        if room_day.occupant(&slot.key()).is_some() {
            ctx.report.push(
                Tier::SoftSkip,
                format!("{token}: {} is already taken, skipping {}'s request", slot.key(), request.staff),
            );
            continue;
        }
        seat(room_day, run, slot, &request.staff);
        remaining.retain(|s| s != &request.staff);
        ctx.report.push(
            Tier::Applied,
            format!("{token}: honored {}'s request for {}", request.staff, slot.key()),
        );
    }

    remaining.shuffle(ctx.rng());
    let mut leftovers: Vec<StaffName> = remaining;
    for slot in &slots {
        let key: String = slot.key();
        if room_day.occupant(&key).is_some() {
            continue;
        }
        if leftovers.is_empty() {
            break;
        }
        let chosen: StaffName = leftovers.remove(0);
        seat(room_day, run, slot, &chosen);
    }
    for staff in leftovers {
        ctx.report.push(
            Tier::SoftSkip,
            format!("{token}: {staff} is rostered but every special-day room is taken"),
        );
    }
}

/// Assigns a slot and records it in the in-run fairness accumulator.
fn seat(room_day: &mut RoomDay, run: &mut Ledger, slot: &RoomSlot, staff: &StaffName) {
    room_day.assign(&slot.key(), staff.clone());
    let counters: &mut StaffCounters = run.entry(staff);
    counters.bump_slot(&slot.key());
    if slot.duty {
        match slot.period() {
            Period::Morning => counters.morning_duty += 1,
            Period::Afternoon => counters.afternoon_duty += 1,
        }
    }
    if slot.time.is_early() {
        counters.early += 1;
    }
    if slot.time.is_late() {
        counters.late += 1;
    }
}

/// Scores a candidate for a slot: fewest holds of this exact slot first,
/// then fewest holds of its early/late/duty character.
fn score(base: &Ledger, run: &Ledger, staff: &StaffName, slot: &RoomSlot) -> (u32, u32) {
    let key: String = slot.key();
    let base_counters: StaffCounters = base.get(staff);
    let run_counters: StaffCounters = run.get(staff);
    let primary: u32 = base_counters.slot(&key) + run_counters.slot(&key);
    let secondary: u32 = if slot.duty {
        match slot.period() {
            Period::Morning => base_counters.morning_duty + run_counters.morning_duty,
            Period::Afternoon => base_counters.afternoon_duty + run_counters.afternoon_duty,
        }
    } else if slot.time.is_early() {
        base_counters.early + run_counters.early
    } else if slot.time.is_late() {
        base_counters.late + run_counters.late
    } else {
        0
    };
    (primary, secondary)
}

/// How much of a worker's afternoon-duty allowance this run has not yet
/// consumed. The allowance is the ledger's afternoon-duty column.
fn remaining_afternoon_duty(base: &Ledger, run: &Ledger, staff: &StaffName) -> u32 {
    base.get(staff)
        .afternoon_duty
        .saturating_sub(run.get(staff).afternoon_duty)
}

/// Hard-skips every request aimed at a day that gets no room schedule.
fn skip_day_requests(
    ctx: &mut RunContext,
    requests: &[RoomRequest],
    handled: &mut [bool],
    date: Date,
    reason: &str,
) {
    for (index, request) in requests.iter().enumerate() {
        if request.date == date {
            handled[index] = true;
            ctx.report.push(
                Tier::HardSkip,
                format!(
                    "{}: room request {} from {} skipped, {reason}",
                    display_token(date),
                    request.category,
                    request.staff
                ),
            );
        }
    }
}
