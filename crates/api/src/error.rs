// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use endo_rota::CoreError;
use endo_rota_domain::{DomainError, RosterMonth, VersionTag};
use endo_rota_store::StoreError;
use thiserror::Error;

/// Errors returned by the API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The engine refused the operation.
    #[error("Engine error: {0}")]
    Core(#[from] CoreError),

    /// The store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A final version exists for the month; the operation is locked out.
    #[error("A final version exists for {month}; only swaps may modify it")]
    VersionLocked {
        /// The locked month.
        month: RosterMonth,
    },

    /// The named version does not exist for the month.
    #[error("Version {tag} not found for {month}")]
    VersionNotFound {
        /// The month searched.
        month: RosterMonth,
        /// The missing tag.
        tag: VersionTag,
    },

    /// A request referenced a date outside the month it targets.
    #[error("Date {date} is outside {month}")]
    MonthMismatch {
        /// The month the operation targets.
        month: RosterMonth,
        /// The out-of-range date, in ISO form.
        date: String,
    },

    /// The request payload could not be understood.
    #[error("Invalid input: {0}")]
    BadInput(String),

    /// A CSV export failed to serialize.
    #[error("Export failed: {0}")]
    Export(String),
}

impl ApiError {
    /// Returns whether this error is a version conflict (locked or
    /// missing), as opposed to bad input or a backend failure.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::VersionLocked { .. }
                | Self::VersionNotFound { .. }
                | Self::Core(CoreError::VersionLocked { .. })
        )
    }
}
