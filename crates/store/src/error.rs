// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors from the roster store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend refused the call transiently; retrying may succeed.
    RateLimited(String),
    /// Every retry attempt failed transiently.
    RetryExhausted {
        /// How many attempts were made.
        attempts: u32,
    },
    /// The named table does not exist.
    TableNotFound(String),
    /// The backend failed in a non-transient way.
    Backend(String),
    /// A stored payload could not be encoded or decoded.
    Serialization(String),
}

impl StoreError {
    /// Returns whether retrying the operation may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimited(msg) => write!(f, "Rate limited: {msg}"),
            Self::RetryExhausted { attempts } => {
                write!(f, "Store call still failing after {attempts} attempts")
            }
            Self::TableNotFound(name) => write!(f, "Table not found: '{name}'"),
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
            Self::Serialization(msg) => write!(f, "Store serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
