//! Engine simulation session
//!
//! Owns the validated cycle, the synthesizer, and the rolling history, and
//! exposes the tick-driven interface the host consumes. All state lives in
//! this explicitly passed object; there are no process globals, so one
//! process can run any number of independent sessions. Single-writer by
//! contract: the host's tick driver is the only mutator.
//!
//! The wall clock is always a parameter. The session never reads time
//! itself, which keeps regime selection and countdowns testable against a
//! synthetic clock.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::clock;
use crate::config::{ConfigError, EngineConfig};
use crate::health;
use crate::synthesizer::ReadingSynthesizer;
use crate::telemetry::TelemetryHistory;
use crate::types::health::HealthAssessment;
use crate::types::regime::{Cycle, RegimeName, RegimeProfile};
use crate::types::sensor::SensorReading;

/// Result of one complete tick: the regime that produced the reading, the
/// reading itself, and the assessment derived from it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TickOutcome {
    pub regime: RegimeName,
    pub reading: SensorReading,
    pub assessment: HealthAssessment,
}

/// One simulated engine: cycle + synthesizer + rolling history.
#[derive(Debug)]
pub struct EngineSession {
    cycle: Cycle,
    synthesizer: ReadingSynthesizer,
    history: TelemetryHistory,
    tick_period: Duration,
}

impl EngineSession {
    /// Session over a validated cycle, live entropy RNG, default capacity.
    pub fn new(cycle: Cycle) -> Self {
        Self::with_synthesizer(cycle, ReadingSynthesizer::from_entropy())
    }

    /// Session with an injected synthesizer. Tests pass a seeded one to
    /// make whole tick streams reproducible.
    pub fn with_synthesizer(cycle: Cycle, synthesizer: ReadingSynthesizer) -> Self {
        Self {
            cycle,
            synthesizer,
            history: TelemetryHistory::new(),
            tick_period: Duration::seconds(crate::config::defaults::TICK_SECONDS as i64),
        }
    }

    /// Build a session from configuration, validating the cycle table.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cycle = config.build_cycle()?;
        Ok(Self {
            cycle,
            synthesizer: ReadingSynthesizer::from_entropy(),
            history: TelemetryHistory::with_capacity(config.simulation.history_capacity),
            tick_period: Duration::seconds(config.simulation.tick_seconds as i64),
        })
    }

    /// Replace the history with `n` synthetic readings ending at `now`.
    /// Called once at session start so charts have a trace to draw.
    pub fn seed_history(&mut self, n: usize, seed: u64, now: DateTime<Utc>) {
        let span = n.saturating_sub(1) as i32;
        let start = now - self.tick_period * span;
        let mut history = TelemetryHistory::with_capacity(self.history.capacity());
        for reading in ReadingSynthesizer::synthesize_series(n, seed, start, self.tick_period) {
            history.push(reading);
        }
        tracing::info!(points = history.len(), seed, "Seeded telemetry history");
        self.history = history;
    }

    /// One complete simulation step: synthesize a reading under the regime
    /// active at `now`, append it, and assess it. Self-contained; there is
    /// no partial state to roll back if the driver stops ticking.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let regime = clock::current_regime(&self.cycle, now);
        let regime_name = regime.name;
        let reading = self.synthesizer.synthesize(regime, now);
        self.history.push(reading.clone());
        let assessment = health::evaluate(&reading);

        tracing::debug!(
            regime = %regime_name,
            status = %assessment.status,
            rul_hours = assessment.rul_hours,
            history_len = self.history.len(),
            "Tick complete"
        );

        TickOutcome {
            regime: regime_name,
            reading,
            assessment,
        }
    }

    /// The regime active at `now`.
    pub fn current_regime(&self, now: DateTime<Utc>) -> &RegimeProfile {
        clock::current_regime(&self.cycle, now)
    }

    /// Whole seconds until the next regime transition.
    pub fn seconds_until_next_transition(&self, now: DateTime<Utc>) -> u64 {
        clock::seconds_until_next_transition(&self.cycle, now)
    }

    /// The owned rolling history.
    pub fn history(&self) -> &TelemetryHistory {
        &self.history
    }

    /// Most recent `k` readings, oldest first, for charting.
    pub fn tail(&self, k: usize) -> Vec<SensorReading> {
        self.history.tail(k)
    }

    /// Assessment of the latest reading; `None` before any data exists.
    pub fn latest_assessment(&self) -> Option<HealthAssessment> {
        health::evaluate_latest(&self.history)
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }
}
