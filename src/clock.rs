//! Wall-clock to regime mapping
//!
//! Regime selection is a pure function of time: elapsed seconds modulo the
//! cycle's total duration, walked against the cumulative regime durations.
//! No simulation state is stored, so any number of independent processes
//! observing the same clock converge on the same regime.
//!
//! The time source is always passed in. `rem_euclid` keeps the arithmetic
//! valid for pre-epoch instants and clocks that step backward; a stale
//! regime is the worst a misbehaving clock can produce.

use chrono::{DateTime, Utc};

use crate::types::regime::{Cycle, RegimeProfile};

/// Seconds into the current cycle iteration, in `[0, total_duration)`.
fn elapsed_in_cycle(cycle: &Cycle, now: DateTime<Utc>) -> u64 {
    let total = cycle.total_duration() as i64;
    now.timestamp().rem_euclid(total) as u64
}

/// The regime active at `now`. Walks the cycle accumulating durations and
/// returns the first regime whose cumulative end exceeds the elapsed time;
/// falls back to the first regime at the exact wrap boundary.
pub fn current_regime<'a>(cycle: &'a Cycle, now: DateTime<Utc>) -> &'a RegimeProfile {
    let elapsed = elapsed_in_cycle(cycle, now);

    let mut cumulative = 0;
    for regime in cycle.regimes() {
        cumulative += regime.duration_seconds;
        if elapsed < cumulative {
            return regime;
        }
    }

    cycle.first()
}

/// Whole seconds until the active regime hands over to the next one.
/// Always in `[1, total_duration]`: at the instant of a transition the
/// countdown shows the incoming regime's full duration.
pub fn seconds_until_next_transition(cycle: &Cycle, now: DateTime<Utc>) -> u64 {
    let elapsed = elapsed_in_cycle(cycle, now);

    let mut cumulative = 0;
    for regime in cycle.regimes() {
        cumulative += regime.duration_seconds;
        if elapsed < cumulative {
            return cumulative - elapsed;
        }
    }

    cycle.total_duration() - elapsed
}
