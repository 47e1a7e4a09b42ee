// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The severity tier of a run diagnostic.
///
/// Infeasibility is never an error: requests the engine could not honor
/// degrade to a reported skip, and processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// The request or constraint was honored.
    Applied,
    /// Skipped as a balancing tradeoff; a later run may satisfy it.
    SoftSkip,
    /// Structurally impossible; requires a manual fix.
    HardSkip,
    /// An input row failed to parse and was ignored.
    ParseWarning,
}

impl Tier {
    /// Converts this tier to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::SoftSkip => "soft-skip",
            Self::HardSkip => "hard-skip",
            Self::ParseWarning => "parse-warning",
        }
    }
}

/// One diagnostic message produced during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The severity tier.
    pub tier: Tier,
    /// The human-readable message.
    pub message: String,
}

/// The accumulated diagnostics of one engine run.
///
/// Returned alongside the primary result, never thrown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    entries: Vec<ReportEntry>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends one entry.
    pub fn push(&mut self, tier: Tier, message: impl Into<String>) {
        self.entries.push(ReportEntry {
            tier,
            message: message.into(),
        });
    }

    /// Appends every entry of another report.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Returns every entry, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Returns the messages of one tier, in insertion order.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.tier == tier)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Returns whether the report is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
