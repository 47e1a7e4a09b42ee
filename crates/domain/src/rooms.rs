// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Period;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// The column key for the morning on-call assignment.
pub const ON_CALL_KEY: &str = "on-call";

/// A procedure-room start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotTime {
    /// 8:30 (morning, earliest).
    M0830,
    /// 9:00 (morning).
    M0900,
    /// 9:30 (morning).
    M0930,
    /// 10:00 (morning, latest).
    M1000,
    /// 13:30 (afternoon).
    A1330,
}

impl SlotTime {
    /// Converts this start time to its display representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::M0830 => "8:30",
            Self::M0900 => "9:00",
            Self::M0930 => "9:30",
            Self::M1000 => "10:00",
            Self::A1330 => "13:30",
        }
    }

    /// Returns the shift period this start time belongs to.
    #[must_use]
    pub const fn period(&self) -> Period {
        match self {
            Self::A1330 => Period::Afternoon,
            _ => Period::Morning,
        }
    }

    /// Returns whether this is the earliest morning start time.
    ///
    /// Early-slot assignments are tracked in the fairness ledger.
    #[must_use]
    pub const fn is_early(&self) -> bool {
        matches!(self, Self::M0830)
    }

    /// Returns whether this is the latest morning start time.
    #[must_use]
    pub const fn is_late(&self) -> bool {
        matches!(self, Self::M1000)
    }
}

impl FromStr for SlotTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8:30" => Ok(Self::M0830),
            "9:00" => Ok(Self::M0900),
            "9:30" => Ok(Self::M0930),
            "10:00" => Ok(Self::M1000),
            "13:30" => Ok(Self::A1330),
            _ => Err(DomainError::InvalidSlotTime(s.to_owned())),
        }
    }
}

impl std::fmt::Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One (start time, room) seat that a single staff member occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSlot {
    /// The start time.
    pub time: SlotTime,
    /// The room number.
    pub room: u8,
    /// Whether this is the period's designated duty slot.
    pub duty: bool,
}

impl RoomSlot {
    /// Creates a new non-duty slot.
    #[must_use]
    pub const fn new(time: SlotTime, room: u8) -> Self {
        Self {
            time,
            room,
            duty: false,
        }
    }

    /// Creates a new duty slot.
    #[must_use]
    pub const fn new_duty(time: SlotTime, room: u8) -> Self {
        Self {
            time,
            room,
            duty: true,
        }
    }

    /// Returns the slot key token used as a table column, e.g. `"8:30(3)"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}({})", self.time.as_str(), self.room)
    }

    /// Returns the shift period this slot belongs to.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.time.period()
    }
}

/// Parses a slot key token (`"8:30(3)"`) into its start time and room.
///
/// # Errors
///
/// Returns [`DomainError::InvalidSlotKey`] if the token is malformed.
pub fn parse_slot_key(key: &str) -> Result<(SlotTime, u8), DomainError> {
    let bad = || DomainError::InvalidSlotKey(key.to_owned());
    let (time_s, rest) = key.split_once('(').ok_or_else(bad)?;
    let room_s: &str = rest.strip_suffix(')').ok_or_else(bad)?;
    let time: SlotTime = time_s.parse().map_err(|_| bad())?;
    let room: u8 = room_s.parse().map_err(|_| bad())?;
    Ok((time, room))
}

/// Returns the shift period a room-table column key belongs to.
///
/// The on-call column counts as morning.
#[must_use]
pub fn slot_period(key: &str) -> Option<Period> {
    if key == ON_CALL_KEY {
        return Some(Period::Morning);
    }
    parse_slot_key(key).map(|(time, _)| time.period()).ok()
}

/// The admin-configured room layout for a deployment.
///
/// Regular weekdays draw from `slots`; special days (Saturday/holiday) draw
/// from the smaller `special_slots` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomLayout {
    /// The regular-weekday slots.
    slots: Vec<RoomSlot>,
    /// The special-day slots.
    special_slots: Vec<RoomSlot>,
}

impl RoomLayout {
    /// Creates a validated `RoomLayout`.
    ///
    /// # Errors
    ///
    /// Returns an error if a room number repeats within a period, or a
    /// period with slots does not have exactly one duty slot.
    pub fn new(slots: Vec<RoomSlot>, special_slots: Vec<RoomSlot>) -> Result<Self, DomainError> {
        let layout: Self = Self {
            slots,
            special_slots,
        };
        crate::validation::validate_room_layout(&layout)?;
        Ok(layout)
    }

    /// The reference deployment layout.
    ///
    /// Morning: rooms 1-3 at 8:30, 4-6 at 9:00, 7-9 at 9:30, 10-12 at
    /// 10:00; room 1 is the morning duty room. Afternoon: rooms 1-5 at
    /// 13:30; room 1 is the afternoon duty room. Special days: rooms 1-4
    /// at 9:00; room 1 is the duty room.
    #[must_use]
    pub fn reference() -> Self {
        let mut slots: Vec<RoomSlot> = vec![RoomSlot::new_duty(SlotTime::M0830, 1)];
        slots.extend((2..=3).map(|room| RoomSlot::new(SlotTime::M0830, room)));
        slots.extend((4..=6).map(|room| RoomSlot::new(SlotTime::M0900, room)));
        slots.extend((7..=9).map(|room| RoomSlot::new(SlotTime::M0930, room)));
        slots.extend((10..=12).map(|room| RoomSlot::new(SlotTime::M1000, room)));
        slots.push(RoomSlot::new_duty(SlotTime::A1330, 1));
        slots.extend((2..=5).map(|room| RoomSlot::new(SlotTime::A1330, room)));

        let mut special_slots: Vec<RoomSlot> = vec![RoomSlot::new_duty(SlotTime::M0900, 1)];
        special_slots.extend((2..=4).map(|room| RoomSlot::new(SlotTime::M0900, room)));

        Self {
            slots,
            special_slots,
        }
    }

    /// Returns the regular-weekday slots for a period, duty slot first.
    #[must_use]
    pub fn slots_for(&self, period: Period) -> Vec<RoomSlot> {
        let mut slots: Vec<RoomSlot> = self
            .slots
            .iter()
            .copied()
            .filter(|s| s.period() == period)
            .collect();
        slots.sort_by_key(|s| (!s.duty, s.time, s.room));
        slots
    }

    /// Returns the special-day slots, duty slot first.
    #[must_use]
    pub fn special_slots(&self) -> Vec<RoomSlot> {
        let mut slots: Vec<RoomSlot> = self.special_slots.clone();
        slots.sort_by_key(|s| (!s.duty, s.time, s.room));
        slots
    }

    /// Returns the duty slot for a period, if one is configured.
    #[must_use]
    pub fn duty_slot(&self, period: Period) -> Option<RoomSlot> {
        self.slots
            .iter()
            .copied()
            .find(|s| s.duty && s.period() == period)
    }

    /// Returns the regular slot for a (period, room) pair, if configured.
    #[must_use]
    pub fn slot_for_room(&self, period: Period, room: u8) -> Option<RoomSlot> {
        self.slots
            .iter()
            .copied()
            .find(|s| s.period() == period && s.room == room)
    }

    /// Returns the raw slot lists for validation.
    #[must_use]
    pub(crate) fn raw_slots(&self) -> (&[RoomSlot], &[RoomSlot]) {
        (&self.slots, &self.special_slots)
    }

    /// Returns the ordered column keys for the regular room table.
    #[must_use]
    pub fn column_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .slots_for(Period::Morning)
            .iter()
            .map(RoomSlot::key)
            .collect();
        keys.push(String::from(ON_CALL_KEY));
        keys.extend(self.slots_for(Period::Afternoon).iter().map(RoomSlot::key));
        keys
    }
}

/// Checks that no room repeats within a period of a slot list.
pub(crate) fn unique_rooms(slots: &[RoomSlot]) -> Result<(), DomainError> {
    let mut seen: HashSet<(Period, u8)> = HashSet::new();
    for slot in slots {
        if !seen.insert((slot.period(), slot.room)) {
            return Err(DomainError::DuplicateRoom {
                room: slot.room,
                period: slot.period(),
            });
        }
    }
    Ok(())
}
