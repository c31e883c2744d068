//! Operating regimes and the repeating regime cycle
//!
//! The simulated engine walks a fixed, ordered sequence of operating
//! regimes (NORMAL → DEGRADED → CRITICAL → RECOVERY → repeat). Each regime
//! carries its own per-channel noise statistics, so the regime active at a
//! given instant fully determines the distribution of live readings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::types::sensor::{NoiseParams, SensorKind};

// ============================================================================
// Regime Identity
// ============================================================================

/// Named operating condition of the simulated engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeName {
    Normal,
    Degraded,
    Critical,
    Recovery,
}

impl RegimeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegimeName::Normal => "NORMAL",
            RegimeName::Degraded => "DEGRADED",
            RegimeName::Critical => "CRITICAL",
            RegimeName::Recovery => "RECOVERY",
        }
    }
}

impl std::fmt::Display for RegimeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Regime Profile
// ============================================================================

/// One regime's slice of the cycle: duration, presentation metadata, and
/// the Normal-distribution parameters for every sensor channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegimeProfile {
    pub name: RegimeName,
    /// Allotted slice of the cycle, in seconds. Must be positive.
    pub duration_seconds: u64,
    /// Presentation metadata, opaque to the core.
    pub display_color: String,
    pub display_emoji: String,
    /// Per-channel (mean, std_dev). Validated to cover exactly the fixed
    /// channel set when the cycle is built.
    pub sensor_params: BTreeMap<SensorKind, NoiseParams>,
}

impl RegimeProfile {
    /// Noise parameters for one channel. Coverage is enforced by
    /// [`Cycle::new`]; the mid-range fallback only exists so a hand-built
    /// profile cannot panic the synthesizer.
    pub fn params(&self, kind: SensorKind) -> NoiseParams {
        self.sensor_params
            .get(&kind)
            .copied()
            .unwrap_or_else(|| NoiseParams::centered(kind))
    }
}

// ============================================================================
// Cycle
// ============================================================================

/// The fixed, repeating ordered sequence of regimes. Immutable once built;
/// construction validates every invariant the simulation relies on.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cycle {
    regimes: Vec<RegimeProfile>,
    total_duration: u64,
}

impl Cycle {
    /// Build a cycle, rejecting malformed tables up front. A cycle that
    /// passes here can drive the simulation without further checks.
    pub fn new(regimes: Vec<RegimeProfile>) -> Result<Self, ConfigError> {
        if regimes.is_empty() {
            return Err(ConfigError::EmptyCycle);
        }

        for regime in &regimes {
            if regime.duration_seconds == 0 {
                return Err(ConfigError::NonPositiveDuration { regime: regime.name });
            }

            for kind in SensorKind::ALL {
                let Some(params) = regime.sensor_params.get(&kind) else {
                    return Err(ConfigError::MissingSensorParams {
                        regime: regime.name,
                        sensor: kind,
                    });
                };
                if !params.mean.is_finite() || !params.std_dev.is_finite() || params.std_dev < 0.0
                {
                    return Err(ConfigError::InvalidNoiseParams {
                        regime: regime.name,
                        sensor: kind,
                    });
                }
            }
        }

        let total_duration = regimes.iter().map(|r| r.duration_seconds).sum();
        Ok(Self {
            regimes,
            total_duration,
        })
    }

    /// Regimes in transition order.
    pub fn regimes(&self) -> &[RegimeProfile] {
        &self.regimes
    }

    /// Sum of all regime durations, in seconds. Always positive.
    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    /// First regime in the sequence. Used as the exact-boundary fallback
    /// when walking the cycle.
    pub fn first(&self) -> &RegimeProfile {
        &self.regimes[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults;

    #[test]
    fn default_table_builds_a_valid_cycle() {
        let cycle = Cycle::new(defaults::default_regimes()).unwrap();
        assert_eq!(cycle.regimes().len(), 4);
        assert_eq!(cycle.total_duration(), 90);
        assert_eq!(cycle.first().name, RegimeName::Normal);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(Cycle::new(Vec::new()), Err(ConfigError::EmptyCycle)));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut regimes = defaults::default_regimes();
        regimes[1].duration_seconds = 0;
        assert!(matches!(
            Cycle::new(regimes),
            Err(ConfigError::NonPositiveDuration {
                regime: RegimeName::Degraded
            })
        ));
    }

    #[test]
    fn missing_channel_is_rejected() {
        let mut regimes = defaults::default_regimes();
        regimes[2].sensor_params.remove(&SensorKind::Vibration);
        assert!(matches!(
            Cycle::new(regimes),
            Err(ConfigError::MissingSensorParams {
                regime: RegimeName::Critical,
                sensor: SensorKind::Vibration
            })
        ));
    }

    #[test]
    fn negative_std_dev_is_rejected() {
        let mut regimes = defaults::default_regimes();
        regimes[0]
            .sensor_params
            .insert(SensorKind::Rpm, NoiseParams::new(1500.0, -1.0));
        assert!(matches!(
            Cycle::new(regimes),
            Err(ConfigError::InvalidNoiseParams {
                regime: RegimeName::Normal,
                sensor: SensorKind::Rpm
            })
        ));
    }
}
