// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::november;
use crate::error::CoreError;
use crate::version::{ensure_rerun_allowed, lifecycle_event, next_draft};
use endo_rota_audit::AuditEvent;
use endo_rota_domain::VersionTag;

#[test]
fn test_first_draft_is_ver_one() {
    assert_eq!(next_draft(&[]), VersionTag::Draft(1));
}

#[test]
fn test_drafts_number_upward() {
    let existing: Vec<VersionTag> = vec![VersionTag::Draft(1), VersionTag::Draft(2)];
    assert_eq!(next_draft(&existing), VersionTag::Draft(3));
}

#[test]
fn test_final_tag_does_not_feed_the_sequence() {
    let existing: Vec<VersionTag> = vec![VersionTag::Draft(1), VersionTag::Final];
    assert_eq!(next_draft(&existing), VersionTag::Draft(2));
}

#[test]
fn test_rerun_allowed_without_final() {
    let existing: Vec<VersionTag> = vec![VersionTag::Draft(1), VersionTag::Draft(2)];
    assert!(ensure_rerun_allowed(november(), &existing).is_ok());
}

#[test]
fn test_final_version_locks_the_month() {
    let existing: Vec<VersionTag> = vec![VersionTag::Draft(1), VersionTag::Final];
    let err: CoreError = ensure_rerun_allowed(november(), &existing).unwrap_err();
    assert_eq!(err, CoreError::VersionLocked { month: november() });
}

#[test]
fn test_lifecycle_event_is_scoped() {
    let event: AuditEvent = lifecycle_event(
        "admin-1",
        "FinalizeVersion",
        None,
        String::from("status=draft"),
        String::from("status=final"),
        november(),
        VersionTag::Final,
    );

    assert_eq!(event.month, november());
    assert_eq!(event.version, VersionTag::Final);
    assert_eq!(event.actor.id, "admin-1");
    assert_eq!(event.action.name, "FinalizeVersion");
}
