// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use endo_rota_domain::{RosterMonth, VersionTag};

/// Who changed the roster.
///
/// In practice this is the unit administrator driving the engine, but
/// scheduled jobs record themselves here too under a "system" type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    /// "admin" or "system".
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// What prompted the change, usually the id of the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The operation itself, named after the handler that ran it
/// (e.g. "`SaveVersion`", "`ApplySwaps`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A summary of assignment state on one side of a transition.
///
/// A compact string is sufficient: the full shift and room tables live in
/// the store under their version tag, the snapshot only needs enough to
/// see what a transition touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// One entry in the roster's audit trail.
///
/// Every successful mutating operation produces exactly one event, scoped
/// to the roster month and version it touched, recording who acted, why,
/// what ran, and the state on both sides of the transition. Events are
/// append-only; nothing edits one after it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    pub month: RosterMonth,
    pub version: VersionTag,
}

impl AuditEvent {
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        month: RosterMonth,
        version: VersionTag,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            month,
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("admin-1"), String::from("admin"));

        assert_eq!(actor.id, "admin-1");
        assert_eq!(actor.actor_type, "admin");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Monthly run"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Monthly run");
    }

    #[test]
    fn test_audit_event_is_scoped_to_month_and_version() {
        let event: AuditEvent = AuditEvent::new(
            Actor::new(String::from("admin-1"), String::from("admin")),
            Cause::new(String::from("req-1"), String::from("Save draft")),
            Action::new(String::from("SaveVersion"), None),
            StateSnapshot::new(String::from("versions=0")),
            StateSnapshot::new(String::from("versions=1")),
            RosterMonth::new(2025, Month::November),
            VersionTag::first(),
        );

        assert_eq!(event.month.to_string(), "2025-11");
        assert_eq!(event.version.to_string(), "ver1.0");
        assert_eq!(event.action.name, "SaveVersion");
    }
}
