// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Version lifecycle rules and the audit events that record them.

use crate::error::CoreError;
use endo_rota_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use endo_rota_domain::{RosterMonth, VersionTag};

/// Checks that the month accepts algorithmic re-runs.
///
/// # Errors
///
/// Returns [`CoreError::VersionLocked`] when a final version exists.
pub fn ensure_rerun_allowed(month: RosterMonth, existing: &[VersionTag]) -> Result<(), CoreError> {
    if existing.iter().any(VersionTag::is_final) {
        return Err(CoreError::VersionLocked { month });
    }
    Ok(())
}

/// Returns the tag the next saved draft should carry.
///
/// Drafts number upward from `ver1.0`; the final tag never feeds the
/// sequence.
#[must_use]
pub fn next_draft(existing: &[VersionTag]) -> VersionTag {
    existing
        .iter()
        .filter_map(|tag| match tag {
            VersionTag::Draft(n) => Some(*n),
            VersionTag::Final => None,
        })
        .max()
        .map_or_else(VersionTag::first, |n| VersionTag::Draft(n + 1))
}

/// Builds the audit event for a version-lifecycle transition.
///
/// # Arguments
///
/// * `actor_id` - Who performed the transition
/// * `action` - The operation name (e.g. "`SaveVersion`")
/// * `details` - Optional operation details
/// * `before` / `after` - Compact state summaries
/// * `month` / `version` - The scope of the transition
#[must_use]
pub fn lifecycle_event(
    actor_id: &str,
    action: &str,
    details: Option<String>,
    before: String,
    after: String,
    month: RosterMonth,
    version: VersionTag,
) -> AuditEvent {
    AuditEvent::new(
        Actor::new(actor_id.to_owned(), String::from("admin")),
        Cause::new(
            format!("{action}:{month}:{version}"),
            format!("{action} on {month} {version}"),
        ),
        Action::new(action.to_owned(), details),
        StateSnapshot::new(before),
        StateSnapshot::new(after),
        month,
        version,
    )
}
