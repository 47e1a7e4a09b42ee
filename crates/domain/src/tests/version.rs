// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, VersionTag};

#[test]
fn test_version_tag_round_trip() {
    assert_eq!("ver1.0".parse::<VersionTag>().unwrap(), VersionTag::Draft(1));
    assert_eq!("ver12.0".parse::<VersionTag>().unwrap(), VersionTag::Draft(12));
    assert_eq!("final".parse::<VersionTag>().unwrap(), VersionTag::Final);
    assert_eq!(VersionTag::Draft(2).to_string(), "ver2.0");
    assert_eq!(VersionTag::Final.to_string(), "final");
}

#[test]
fn test_version_tag_rejects_malformed() {
    assert!(matches!(
        "ver0.0".parse::<VersionTag>(),
        Err(DomainError::InvalidVersionTag(_))
    ));
    assert!("ver1.1".parse::<VersionTag>().is_err());
    assert!("v1.0".parse::<VersionTag>().is_err());
}

#[test]
fn test_draft_next_increments() {
    assert_eq!(VersionTag::first().next(), VersionTag::Draft(2));
    assert_eq!(VersionTag::Final.next(), VersionTag::Final);
    assert!(VersionTag::Final.is_final());
    assert!(!VersionTag::Draft(3).is_final());
}
