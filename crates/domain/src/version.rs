// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifies a saved assignment version.
///
/// Draft versions are numbered (`"ver1.0"`, `"ver2.0"`, ...). `"final"` is
/// terminal: once a final version exists for a period, no algorithmic
/// re-run may overwrite it; only the swap resolver may still mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionTag {
    /// A numbered draft version.
    Draft(u32),
    /// The terminal, locked version.
    Final,
}

impl VersionTag {
    /// Returns the first draft tag.
    #[must_use]
    pub const fn first() -> Self {
        Self::Draft(1)
    }

    /// Returns the draft tag following this one.
    ///
    /// `Final` has no successor and returns itself.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Draft(n) => Self::Draft(*n + 1),
            Self::Final => Self::Final,
        }
    }

    /// Returns whether this is the terminal version.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Final)
    }

    /// Converts this tag to its persisted string representation.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Draft(n) => format!("ver{n}.0"),
            Self::Final => String::from("final"),
        }
    }
}

impl FromStr for VersionTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "final" {
            return Ok(Self::Final);
        }
        let invalid = || DomainError::InvalidVersionTag(s.to_owned());
        let num: &str = s
            .strip_prefix("ver")
            .and_then(|rest| rest.strip_suffix(".0"))
            .ok_or_else(invalid)?;
        let n: u32 = num.parse().map_err(|_| invalid())?;
        if n == 0 {
            return Err(invalid());
        }
        Ok(Self::Draft(n))
    }
}

impl std::fmt::Display for VersionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
