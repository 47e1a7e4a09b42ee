// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shift balancer.
//!
//! Turns resolved availability into a [`ShiftTable`] whose regular days
//! sit as close to the per-period headcount targets as the month allows.
//! Over-target days shed their highest-cumulative workers, under-target
//! days are topped up from the supplement pool, and every adjustment is
//! written to the run report.

use crate::context::RunContext;
use crate::resolve::Availability;
use endo_rota_domain::{
    DayKind, Period, RequestCategory, ShiftDay, ShiftRequest, ShiftTable, SpecialDay, StaffName,
    Tier, display_token,
};
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use time::{Date, Weekday};

/// Tunable knobs for the balancing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceConfig {
    /// Target headcount for the morning shift.
    pub target_morning: usize,
    /// Target headcount for the afternoon shift.
    pub target_afternoon: usize,
    /// Mornings with fewer candidates than this are listed verbatim
    /// instead of balanced.
    pub small_team_threshold: usize,
    /// Upper bound on balancing iterations per period.
    pub max_iterations: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            target_morning: 12,
            target_afternoon: 5,
            small_team_threshold: 13,
            max_iterations: 100,
        }
    }
}

/// Builds the month's shift table from resolved availability.
///
/// Day routing, in order: a closure date gets an empty row; a date with a
/// special-day roster gets that roster verbatim; weekends without one get
/// no row at all; a weekday whose morning candidate count falls below the
/// small-team threshold is listed verbatim; everything else is balanced
/// toward the configured targets.
#[must_use]
pub fn balance(
    ctx: &mut RunContext,
    config: &BalanceConfig,
    availability: &Availability,
    requests: &[ShiftRequest],
    specials: &[SpecialDay],
    closures: &[Date],
) -> ShiftTable {
    let closure_set: HashSet<Date> = closures.iter().copied().collect();
    let special_map: BTreeMap<Date, &SpecialDay> =
        specials.iter().map(|day| (day.date, day)).collect();

    let mut table: ShiftTable = ShiftTable::new(ctx.month);
    let mut regular_days: Vec<Date> = Vec::new();

    for date in ctx.month.days() {
        if closure_set.contains(&date) {
            table.insert(date, ShiftDay::empty(DayKind::Closure));
            continue;
        }
        if let Some(special) = special_map.get(&date) {
            let mut day: ShiftDay = ShiftDay::empty(DayKind::Special);
            day.morning = special.staff.clone();
            day.on_call = special.duty.clone();
            table.insert(date, day);
            continue;
        }
        if matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
            continue;
        }
        let Some(candidates) = availability.days.get(&date) else {
            continue;
        };
        if candidates.morning.len() < config.small_team_threshold {
            let mut day: ShiftDay = ShiftDay::empty(DayKind::SmallTeam);
            day.morning = candidates.morning.clone();
            day.afternoon = candidates.afternoon.clone();
            table.insert(date, day);
            ctx.report.push(
                Tier::SoftSkip,
                format!(
                    "{}: only {} morning candidates, listed verbatim without balancing",
                    display_token(date),
                    candidates.morning.len()
                ),
            );
            continue;
        }
        table.insert(date, ShiftDay::empty(DayKind::Regular));
        regular_days.push(date);
    }

    balance_period(
        ctx,
        config,
        availability,
        requests,
        &regular_days,
        Period::Morning,
        config.target_morning,
        &mut table,
    );
    balance_period(
        ctx,
        config,
        availability,
        requests,
        &regular_days,
        Period::Afternoon,
        config.target_afternoon,
        &mut table,
    );
    assign_on_call(ctx, &regular_days, &mut table);

    table
}

/// Balances one period across all regular days: seed, move, top up, trim.
#[allow(clippy::too_many_arguments)]
fn balance_period(
    ctx: &mut RunContext,
    config: &BalanceConfig,
    availability: &Availability,
    requests: &[ShiftRequest],
    regular_days: &[Date],
    period: Period,
    target: usize,
    table: &mut ShiftTable,
) {
    // Seed every day with its resolved candidates. Afternoon seeds are
    // limited to people still working that morning (the morning phase may
    // have trimmed them) or pinned by a must-work request.
    let mut seeded: BTreeMap<Date, BTreeSet<StaffName>> = BTreeMap::new();
    for date in regular_days {
        let candidates: Vec<StaffName> = availability
            .days
            .get(date)
            .map(|day| day.for_period(period).to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter(|staff| {
                period == Period::Morning
                    || table.works(*date, Period::Morning, staff)
                    || has_must_work(requests, staff, *date, Period::Afternoon)
            })
            .collect();
        seeded.insert(*date, candidates.iter().cloned().collect());
        if let Some(day) = table.day_mut(*date) {
            *day.workers_mut(period) = candidates;
        }
    }

    // Move workers from over-target days to under-target days. Each
    // person moves at most once per run so the loop cannot ping-pong.
    let mut moved: HashSet<StaffName> = HashSet::new();
    for _ in 0..config.max_iterations {
        let Some(over) = pick_extreme(table, regular_days, period, target, true) else {
            break;
        };
        let Some(under) = pick_extreme(table, regular_days, period, target, false) else {
            break;
        };
        let Some(mover) = pick_mover(
            ctx, availability, requests, table, &seeded, &moved, over, under, period,
        ) else {
            break;
        };
        remove_worker(table, over, period, &mover);
        if period == Period::Morning {
            cascade_afternoon_removal(ctx, requests, table, over, &mover);
        }
        if let Some(day) = table.day_mut(under) {
            day.workers_mut(period).push(mover.clone());
        }
        moved.insert(mover.clone());
        ctx.report.push(
            Tier::Applied,
            format!(
                "moved {} from {} to {} ({})",
                mover,
                display_token(over),
                display_token(under),
                period
            ),
        );
    }

    top_up(ctx, availability, requests, regular_days, period, target, table);
    trim(ctx, requests, regular_days, period, target, table);
}

/// Returns the day furthest over (or under) target, earliest date winning
/// ties. Returns `None` when no day is on the requested side.
fn pick_extreme(
    table: &ShiftTable,
    regular_days: &[Date],
    period: Period,
    target: usize,
    over: bool,
) -> Option<Date> {
    let mut best: Option<(Date, usize)> = None;
    for date in regular_days {
        let count: usize = table.day(*date).map_or(0, |d| d.workers(period).len());
        let qualifies: bool = if over { count > target } else { count < target };
        if !qualifies {
            continue;
        }
        let better: bool = best.is_none_or(|(_, best_count)| {
            if over {
                count > best_count
            } else {
                count < best_count
            }
        });
        if better {
            best = Some((*date, count));
        }
    }
    best.map(|(date, _)| date)
}

/// Picks who moves from an over-target day to an under-target one.
///
/// The mover must not be locked to the source day by a must-work request,
/// must not have moved already this run, must be eligible at the
/// destination (in the weekday pool, not already present, not on leave,
/// no cannot-supplement block, and for afternoons either working that
/// morning or carrying a must-work-afternoon request). Among eligible
/// movers the one with the highest running count goes first, with
/// hard-to-supplement staff deferred to last resort.
#[allow(clippy::too_many_arguments)]
fn pick_mover(
    ctx: &mut RunContext,
    availability: &Availability,
    requests: &[ShiftRequest],
    table: &ShiftTable,
    seeded: &BTreeMap<Date, BTreeSet<StaffName>>,
    moved: &HashSet<StaffName>,
    from: Date,
    to: Date,
    period: Period,
) -> Option<StaffName> {
    let source: Vec<StaffName> = table.day(from)?.workers(period).to_vec();
    let pool: &[StaffName] = availability.pool_for(to.weekday(), period);

    let mut eligible: Vec<StaffName> = source
        .into_iter()
        .filter(|staff| !moved.contains(staff))
        .filter(|staff| !has_must_work(requests, staff, from, period))
        .filter(|staff| pool.contains(staff))
        .filter(|staff| seeded.get(&to).is_none_or(|set| !set.contains(staff)))
        .filter(|staff| {
            !table
                .day(to)
                .is_some_and(|day| day.workers(period).contains(staff))
        })
        .filter(|staff| !on_leave(requests, staff, to))
        .filter(|staff| !has_cannot_supplement(requests, staff, to, period))
        .filter(|staff| {
            period == Period::Morning
                || table.works(to, Period::Morning, staff)
                || has_must_work(requests, staff, to, Period::Afternoon)
        })
        .collect();
    if eligible.is_empty() {
        return None;
    }

    eligible.shuffle(ctx.rng());
    eligible.sort_by(|a, b| {
        let hard_a: bool = has_hard_to_supplement(requests, a, to, period);
        let hard_b: bool = has_hard_to_supplement(requests, b, to, period);
        hard_a
            .cmp(&hard_b)
            .then_with(|| running_count(ctx, table, b, period).cmp(&running_count(ctx, table, a, period)))
    });
    eligible.into_iter().next()
}

/// Tops up every still-under day from the supplement pool, lowest running
/// count first.
fn top_up(
    ctx: &mut RunContext,
    availability: &Availability,
    requests: &[ShiftRequest],
    regular_days: &[Date],
    period: Period,
    target: usize,
    table: &mut ShiftTable,
) {
    for date in regular_days {
        loop {
            let count: usize = table.day(*date).map_or(0, |d| d.workers(period).len());
            if count >= target {
                break;
            }
            let mut candidates: Vec<StaffName> = availability
                .pool_for(date.weekday(), period)
                .iter()
                .filter(|staff| {
                    !table
                        .day(*date)
                        .is_some_and(|day| day.workers(period).contains(staff))
                })
                .filter(|staff| !on_leave(requests, staff, *date))
                .filter(|staff| !has_cannot_supplement(requests, staff, *date, period))
                .filter(|staff| {
                    period == Period::Morning
                        || table.works(*date, Period::Morning, staff)
                        || has_must_work(requests, staff, *date, Period::Afternoon)
                })
                .cloned()
                .collect();
            if candidates.is_empty() {
                ctx.report.push(
                    Tier::SoftSkip,
                    format!(
                        "{}: {} shift stays at {count} of {target}, supplement pool exhausted",
                        display_token(*date),
                        period
                    ),
                );
                break;
            }
            candidates.shuffle(ctx.rng());
            candidates.sort_by(|a, b| {
                let hard_a: bool = has_hard_to_supplement(requests, a, *date, period);
                let hard_b: bool = has_hard_to_supplement(requests, b, *date, period);
                hard_a.cmp(&hard_b).then_with(|| {
                    running_count(ctx, table, a, period)
                        .cmp(&running_count(ctx, table, b, period))
                })
            });
            if let Some(chosen) = candidates.into_iter().next() {
                if has_hard_to_supplement(requests, &chosen, *date, period) {
                    ctx.report.push(
                        Tier::SoftSkip,
                        format!(
                            "{}: supplemented {} despite a hard-to-supplement request",
                            display_token(*date),
                            chosen
                        ),
                    );
                } else {
                    ctx.report.push(
                        Tier::Applied,
                        format!(
                            "{}: supplemented {} ({})",
                            display_token(*date),
                            chosen,
                            period
                        ),
                    );
                }
                if let Some(day) = table.day_mut(*date) {
                    day.workers_mut(period).push(chosen);
                }
            }
        }
    }
}

/// Trims every still-over day down to target, highest running count first,
/// sparing anyone locked in by a must-work request.
fn trim(
    ctx: &mut RunContext,
    requests: &[ShiftRequest],
    regular_days: &[Date],
    period: Period,
    target: usize,
    table: &mut ShiftTable,
) {
    for date in regular_days {
        loop {
            let count: usize = table.day(*date).map_or(0, |d| d.workers(period).len());
            if count <= target {
                break;
            }
            let mut removable: Vec<StaffName> = table
                .day(*date)
                .map(|day| day.workers(period).to_vec())
                .unwrap_or_default()
                .into_iter()
                .filter(|staff| !has_must_work(requests, staff, *date, period))
                .collect();
            if removable.is_empty() {
                ctx.report.push(
                    Tier::SoftSkip,
                    format!(
                        "{}: {} shift stays at {count} of {target}, everyone is locked by must-work",
                        display_token(*date),
                        period
                    ),
                );
                break;
            }
            removable.shuffle(ctx.rng());
            removable.sort_by(|a, b| {
                running_count(ctx, table, b, period).cmp(&running_count(ctx, table, a, period))
            });
            if let Some(chosen) = removable.into_iter().next() {
                remove_worker(table, *date, period, &chosen);
                ctx.report.push(
                    Tier::Applied,
                    format!("{}: trimmed {} ({})", display_token(*date), chosen, period),
                );
                if period == Period::Morning {
                    cascade_afternoon_removal(ctx, requests, table, *date, &chosen);
                }
            }
        }
    }
}

/// Picks the on-call person for every regular day.
///
/// Each worker's on-call allowance is the morning-duty column of the
/// cumulative ledger. Workers with a positive allowance are served first,
/// highest allowance first with fewest afternoon days as the tie-break,
/// each taking up to their allowance among the days they work the
/// afternoon. Days still open afterwards get a random pick among that
/// day's afternoon workers, and anyone pushed past their allowance that
/// way is reported. A day with no afternoon workers is left without
/// on-call and reported.
fn assign_on_call(ctx: &mut RunContext, regular_days: &[Date], table: &mut ShiftTable) {
    let mut open: Vec<Date> = Vec::new();
    for date in regular_days {
        let has_afternoon: bool = table
            .day(*date)
            .is_some_and(|day| !day.afternoon.is_empty());
        if has_afternoon {
            open.push(*date);
        } else {
            ctx.report.push(
                Tier::SoftSkip,
                format!(
                    "{}: no afternoon workers, on-call left unassigned",
                    display_token(*date)
                ),
            );
        }
    }

    let mut quotas: Vec<(StaffName, u32)> = ctx
        .base
        .staff_names()
        .into_iter()
        .map(|staff| {
            let quota: u32 = ctx.base.get(&staff).morning_duty;
            (staff, quota)
        })
        .filter(|(_, quota)| *quota > 0)
        .collect();
    quotas.shuffle(ctx.rng());
    quotas.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| afternoon_days(table, &a.0).cmp(&afternoon_days(table, &b.0)))
    });

    let mut taken: BTreeMap<StaffName, u32> = BTreeMap::new();
    for (staff, quota) in quotas {
        let mut eligible: Vec<Date> = open
            .iter()
            .copied()
            .filter(|date| table.works(*date, Period::Afternoon, &staff))
            .collect();
        eligible.shuffle(ctx.rng());
        for date in eligible
            .into_iter()
            .take(usize::try_from(quota).unwrap_or(usize::MAX))
        {
            if let Some(day) = table.day_mut(date) {
                day.on_call = Some(staff.clone());
            }
            open.retain(|d| *d != date);
            *taken.entry(staff.clone()).or_insert(0) += 1;
        }
    }

    for date in open {
        let mut afternoon: Vec<StaffName> = table
            .day(date)
            .map(|day| day.afternoon.clone())
            .unwrap_or_default();
        afternoon.shuffle(ctx.rng());
        let Some(chosen) = afternoon.into_iter().next() else {
            continue;
        };
        *taken.entry(chosen.clone()).or_insert(0) += 1;
        if let Some(day) = table.day_mut(date) {
            day.on_call = Some(chosen);
        }
    }

    for (staff, count) in &taken {
        let quota: u32 = ctx.base.get(staff).morning_duty;
        if *count > quota {
            ctx.report.push(
                Tier::SoftSkip,
                format!("{staff} took {count} on-call days against an allowance of {quota}"),
            );
        }
    }
}

fn afternoon_days(table: &ShiftTable, staff: &StaffName) -> usize {
    table
        .iter()
        .filter(|(_, day)| day.kind == DayKind::Regular)
        .filter(|(_, day)| day.afternoon.contains(staff))
        .count()
}

/// The running count for one period: cumulative ledger total plus the
/// assignments already made in this run.
fn running_count(ctx: &RunContext, table: &ShiftTable, staff: &StaffName, period: Period) -> u32 {
    let base: u32 = match period {
        Period::Morning => ctx.base.get(staff).morning,
        Period::Afternoon => ctx.base.get(staff).afternoon,
    };
    let run: u32 = u32::try_from(
        table
            .iter()
            .filter(|(_, day)| day.kind == DayKind::Regular)
            .filter(|(_, day)| day.workers(period).contains(staff))
            .count(),
    )
    .unwrap_or(u32::MAX);
    base.saturating_add(run)
}

fn remove_worker(table: &mut ShiftTable, date: Date, period: Period, staff: &StaffName) {
    if let Some(day) = table.day_mut(date) {
        day.workers_mut(period).retain(|s| s != staff);
    }
}

/// Removing someone from a morning also removes their same-day afternoon,
/// unless a must-work-afternoon request pins it.
fn cascade_afternoon_removal(
    ctx: &mut RunContext,
    requests: &[ShiftRequest],
    table: &mut ShiftTable,
    date: Date,
    staff: &StaffName,
) {
    if !table.works(date, Period::Afternoon, staff) {
        return;
    }
    if has_must_work(requests, staff, date, Period::Afternoon) {
        return;
    }
    remove_worker(table, date, Period::Afternoon, staff);
    ctx.report.push(
        Tier::Applied,
        format!(
            "{}: dropped {}'s afternoon along with the morning",
            display_token(date),
            staff
        ),
    );
}

fn has_must_work(requests: &[ShiftRequest], staff: &StaffName, date: Date, period: Period) -> bool {
    requests.iter().any(|r| {
        &r.staff == staff && r.category == RequestCategory::MustWork(period) && r.covers(date)
    })
}

fn has_cannot_supplement(
    requests: &[ShiftRequest],
    staff: &StaffName,
    date: Date,
    period: Period,
) -> bool {
    requests.iter().any(|r| {
        &r.staff == staff
            && r.category == RequestCategory::CannotSupplement(period)
            && r.covers(date)
    })
}

fn has_hard_to_supplement(
    requests: &[ShiftRequest],
    staff: &StaffName,
    date: Date,
    period: Period,
) -> bool {
    requests.iter().any(|r| {
        &r.staff == staff
            && r.category == RequestCategory::HardToSupplement(period)
            && r.covers(date)
    })
}

fn on_leave(requests: &[ShiftRequest], staff: &StaffName, date: Date) -> bool {
    requests
        .iter()
        .any(|r| &r.staff == staff && r.category.removes_availability() && r.covers(date))
}
