// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use endo_rota_domain::{Ledger, RosterMonth, RunReport};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The explicit per-run state threaded through every engine phase.
///
/// Carries the target month, the starting fairness ledger, the accumulated
/// run report, and the tie-break random source. There is no process-wide
/// mutable state: everything a phase needs travels in the context.
#[derive(Debug)]
pub struct RunContext {
    /// The month being scheduled.
    pub month: RosterMonth,
    /// The cumulative fairness counters at the start of the run.
    pub base: Ledger,
    /// The diagnostics accumulated so far.
    pub report: RunReport,
    rng: StdRng,
}

impl RunContext {
    /// Creates a context with an OS-seeded random source.
    ///
    /// This is the production default: tie-breaks are intentionally not
    /// reproducible run-to-run, which spreads assignments more evenly
    /// over time.
    #[must_use]
    pub fn new(month: RosterMonth, base: Ledger) -> Self {
        Self {
            month,
            base,
            report: RunReport::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a context with a pinned seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(month: RosterMonth, base: Ledger, seed: u64) -> Self {
        Self {
            month,
            base,
            report: RunReport::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the random source for tie-breaks.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
