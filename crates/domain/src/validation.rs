// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::rooms::{RoomLayout, RoomSlot, unique_rooms};
use crate::types::{Period, SpecialDay, StaffName};

/// Validates that a staff name is non-empty after trimming.
///
/// # Errors
///
/// Returns [`DomainError::EmptyStaffName`] if the name is empty.
pub fn validate_staff_name(name: &StaffName) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::EmptyStaffName);
    }
    Ok(())
}

/// Validates a special day: non-empty staff list, and the duty person (if
/// any) is one of the listed staff.
///
/// # Errors
///
/// Returns [`DomainError::EmptySpecialDay`] if no staff are listed or the
/// duty person is not among them.
pub fn validate_special_day(day: &SpecialDay) -> Result<(), DomainError> {
    if day.staff.is_empty() {
        return Err(DomainError::EmptySpecialDay { date: day.date });
    }
    if let Some(duty) = &day.duty {
        if !day.staff.contains(duty) {
            return Err(DomainError::EmptySpecialDay { date: day.date });
        }
    }
    Ok(())
}

/// Validates a room layout.
///
/// Every room appears at most once per period, and each period with any
/// slots configured has exactly one duty slot.
///
/// # Errors
///
/// Returns [`DomainError::DuplicateRoom`] or [`DomainError::DutySlotCount`].
pub fn validate_room_layout(layout: &RoomLayout) -> Result<(), DomainError> {
    let (slots, special_slots) = layout.raw_slots();
    unique_rooms(slots)?;
    unique_rooms(special_slots)?;
    for period in [Period::Morning, Period::Afternoon] {
        let in_period: Vec<&RoomSlot> =
            slots.iter().filter(|s| s.period() == period).collect();
        if in_period.is_empty() {
            continue;
        }
        let duty_count: usize = in_period.iter().filter(|s| s.duty).count();
        if duty_count != 1 {
            return Err(DomainError::DutySlotCount {
                period,
                count: duty_count,
            });
        }
    }
    let special_duty: usize = special_slots.iter().filter(|s| s.duty).count();
    if !special_slots.is_empty() && special_duty != 1 {
        return Err(DomainError::DutySlotCount {
            period: Period::Morning,
            count: special_duty,
        });
    }
    Ok(())
}
