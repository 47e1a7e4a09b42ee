// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::rooms::SlotTime;
use crate::types::{Period, StaffName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use time::Date;

/// The category of a monthly leave/preference request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestCategory {
    /// Vacation: removes the staff from the day's availability entirely.
    Vacation,
    /// Conference: removes the staff from the day's availability entirely.
    Conference,
    /// The staff would rather not be supplemented into this day/period.
    /// Advisory only; the balancer may still move them.
    HardToSupplement(Period),
    /// The balancer must not supplement the staff into this day/period.
    CannotSupplement(Period),
    /// The staff must work this day/period regardless of their pattern.
    MustWork(Period),
    /// Sentinel: clears every other request the staff submitted for the
    /// period.
    NoRequest,
}

impl RequestCategory {
    /// Converts this category to its persisted string representation.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Vacation => String::from("vacation"),
            Self::Conference => String::from("conference"),
            Self::HardToSupplement(p) => format!("hard-to-supplement-{p}"),
            Self::CannotSupplement(p) => format!("cannot-supplement-{p}"),
            Self::MustWork(p) => format!("must-work-{p}"),
            Self::NoRequest => String::from("no-request"),
        }
    }

    /// Returns whether this category removes the staff from availability.
    #[must_use]
    pub const fn removes_availability(&self) -> bool {
        matches!(self, Self::Vacation | Self::Conference)
    }
}

impl FromStr for RequestCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "vacation" {
            return Ok(Self::Vacation);
        }
        if s == "conference" {
            return Ok(Self::Conference);
        }
        if s == "no-request" {
            return Ok(Self::NoRequest);
        }
        for (prefix, build) in [
            (
                "hard-to-supplement-",
                Self::HardToSupplement as fn(Period) -> Self,
            ),
            ("cannot-supplement-", Self::CannotSupplement as fn(Period) -> Self),
            ("must-work-", Self::MustWork as fn(Period) -> Self),
        ] {
            if let Some(period_s) = s.strip_prefix(prefix) {
                let period: Period = period_s.parse()?;
                return Ok(build(period));
            }
        }
        Err(DomainError::InvalidCategory(s.to_owned()))
    }
}

impl std::fmt::Display for RequestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// A monthly leave/preference request for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// The requesting staff member.
    pub staff: StaffName,
    /// The request category.
    pub category: RequestCategory,
    /// The dates covered by the request.
    pub dates: Vec<Date>,
}

impl ShiftRequest {
    /// Creates a new `ShiftRequest`.
    #[must_use]
    pub const fn new(staff: StaffName, category: RequestCategory, dates: Vec<Date>) -> Self {
        Self {
            staff,
            category,
            dates,
        }
    }

    /// Returns whether the request covers the given date.
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }
}

/// Drops every request of any staff member who submitted the `no-request`
/// sentinel, including the sentinel itself.
#[must_use]
pub fn collapse_no_request(requests: Vec<ShiftRequest>) -> Vec<ShiftRequest> {
    let cleared: HashSet<StaffName> = requests
        .iter()
        .filter(|r| r.category == RequestCategory::NoRequest)
        .map(|r| r.staff.clone())
        .collect();
    requests
        .into_iter()
        .filter(|r| !cleared.contains(&r.staff))
        .collect()
}

/// The category of a room-preference request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomRequestCategory {
    /// A specific numbered room.
    Room(u8),
    /// A specific start time.
    StartTime(SlotTime),
    /// Do not seat in the duty slot of the earliest start time.
    NoDutyEarlyRoom,
    /// Exclude every earliest-start-time slot.
    NoEarlyRooms,
    /// Exclude every latest-start-time slot.
    NoLateRooms,
    /// Exclude the afternoon duty slot.
    NoAfternoonDuty,
}

impl RoomRequestCategory {
    /// Converts this category to its persisted string representation.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Room(n) => format!("room-{n}"),
            Self::StartTime(t) => format!("time-{}", t.as_str()),
            Self::NoDutyEarlyRoom => String::from("no-duty-early-room"),
            Self::NoEarlyRooms => String::from("no-early-rooms"),
            Self::NoLateRooms => String::from("no-late-rooms"),
            Self::NoAfternoonDuty => String::from("no-afternoon-duty"),
        }
    }
}

impl FromStr for RoomRequestCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-duty-early-room" => return Ok(Self::NoDutyEarlyRoom),
            "no-early-rooms" => return Ok(Self::NoEarlyRooms),
            "no-late-rooms" => return Ok(Self::NoLateRooms),
            "no-afternoon-duty" => return Ok(Self::NoAfternoonDuty),
            _ => {}
        }
        if let Some(room_s) = s.strip_prefix("room-") {
            let room: u8 = room_s
                .parse()
                .map_err(|_| DomainError::InvalidCategory(s.to_owned()))?;
            return Ok(Self::Room(room));
        }
        if let Some(time_s) = s.strip_prefix("time-") {
            let time: SlotTime = time_s.parse()?;
            return Ok(Self::StartTime(time));
        }
        Err(DomainError::InvalidCategory(s.to_owned()))
    }
}

impl std::fmt::Display for RoomRequestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// A room-preference request for one staff member on one day.
///
/// Consumed only by the room allocator, best-effort: an infeasible request
/// is skipped and the skip reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    /// The requesting staff member.
    pub staff: StaffName,
    /// The request category.
    pub category: RoomRequestCategory,
    /// The date the request applies to.
    pub date: Date,
    /// The time period the request applies to.
    pub period: Period,
}
