// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use std::time::Duration;

/// How many times a transiently failing call is attempted in total.
pub const MAX_ATTEMPTS: u32 = 4;

const BASE_DELAY: Duration = Duration::from_millis(50);

/// Runs a store call with exponential backoff on transient failures.
///
/// The delay starts at 50ms and doubles between attempts. Non-transient
/// errors pass straight through.
///
/// # Errors
///
/// Returns [`StoreError::RetryExhausted`] when every attempt failed
/// transiently, or the first non-transient error encountered.
pub fn with_retry<T>(
    label: &str,
    mut op: impl FnMut() -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let mut delay: Duration = BASE_DELAY;
    for attempt in 1..=MAX_ATTEMPTS {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() => {
                tracing::warn!(label, attempt, error = %err, "transient store failure");
                if attempt < MAX_ATTEMPTS {
                    std::thread::sleep(delay);
                    delay *= 2;
                }
            }
            Err(err) => return Err(err),
        }
    }
    Err(StoreError::RetryExhausted {
        attempts: MAX_ATTEMPTS,
    })
}
