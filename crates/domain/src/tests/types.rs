// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AvailabilityStatus, DomainError, Period, RequestCategory, RoomRequestCategory, ShiftRequest,
    SlotTime, StaffName, WeekTag, collapse_no_request, parse_date_spec, parse_slot_key,
    slot_period,
};

#[test]
fn test_staff_name_is_trimmed() {
    let name: StaffName = StaffName::new("  Kim ");
    assert_eq!(name.value(), "Kim");
    assert_eq!(name, StaffName::new("Kim"));
}

#[test]
fn test_availability_status_round_trip() {
    for status in [
        AvailabilityStatus::Morning,
        AvailabilityStatus::Afternoon,
        AvailabilityStatus::Both,
        AvailabilityStatus::Off,
    ] {
        assert_eq!(status.as_str().parse::<AvailabilityStatus>().unwrap(), status);
    }
    assert!("Mornings".parse::<AvailabilityStatus>().is_err());
}

#[test]
fn test_availability_status_covers() {
    assert!(AvailabilityStatus::Both.covers(Period::Morning));
    assert!(AvailabilityStatus::Both.covers(Period::Afternoon));
    assert!(AvailabilityStatus::Morning.covers(Period::Morning));
    assert!(!AvailabilityStatus::Morning.covers(Period::Afternoon));
    assert!(!AvailabilityStatus::Off.covers(Period::Morning));
}

#[test]
fn test_week_tag_parsing() {
    assert_eq!("every".parse::<WeekTag>().unwrap(), WeekTag::EveryWeek);
    assert_eq!("week3".parse::<WeekTag>().unwrap(), WeekTag::Week(3));
    assert!(matches!(
        "week6".parse::<WeekTag>(),
        Err(DomainError::WeekOutOfRange { week: 6 })
    ));
    assert!("weekly".parse::<WeekTag>().is_err());
}

#[test]
fn test_request_category_round_trip() {
    let categories: Vec<RequestCategory> = vec![
        RequestCategory::Vacation,
        RequestCategory::Conference,
        RequestCategory::HardToSupplement(Period::Morning),
        RequestCategory::CannotSupplement(Period::Afternoon),
        RequestCategory::MustWork(Period::Morning),
        RequestCategory::NoRequest,
    ];
    for category in categories {
        let parsed: RequestCategory = category.as_string().parse().unwrap();
        assert_eq!(parsed, category);
    }
}

#[test]
fn test_no_request_sentinel_clears_other_requests() {
    let kim: StaffName = StaffName::new("Kim");
    let lee: StaffName = StaffName::new("Lee");
    let requests: Vec<ShiftRequest> = vec![
        ShiftRequest::new(
            kim.clone(),
            RequestCategory::Vacation,
            parse_date_spec("2025-11-03").unwrap(),
        ),
        ShiftRequest::new(kim.clone(), RequestCategory::NoRequest, Vec::new()),
        ShiftRequest::new(
            lee.clone(),
            RequestCategory::Vacation,
            parse_date_spec("2025-11-04").unwrap(),
        ),
    ];

    let collapsed: Vec<ShiftRequest> = collapse_no_request(requests);

    assert_eq!(collapsed.len(), 1);
    assert_eq!(collapsed[0].staff, lee);
}

#[test]
fn test_room_request_category_round_trip() {
    let categories: Vec<RoomRequestCategory> = vec![
        RoomRequestCategory::Room(3),
        RoomRequestCategory::StartTime(SlotTime::M0930),
        RoomRequestCategory::NoDutyEarlyRoom,
        RoomRequestCategory::NoEarlyRooms,
        RoomRequestCategory::NoLateRooms,
        RoomRequestCategory::NoAfternoonDuty,
    ];
    for category in categories {
        let parsed: RoomRequestCategory = category.as_string().parse().unwrap();
        assert_eq!(parsed, category);
    }
}

#[test]
fn test_slot_key_round_trip() {
    let (time, room) = parse_slot_key("8:30(3)").unwrap();
    assert_eq!(time, SlotTime::M0830);
    assert_eq!(room, 3);
    assert!(parse_slot_key("8:30[3]").is_err());
}

#[test]
fn test_slot_period_classifies_keys() {
    assert_eq!(slot_period("8:30(1)"), Some(Period::Morning));
    assert_eq!(slot_period("13:30(2)"), Some(Period::Afternoon));
    assert_eq!(slot_period("on-call"), Some(Period::Morning));
    assert_eq!(slot_period("nonsense"), None);
}
