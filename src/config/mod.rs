//! Engine Configuration Module
//!
//! Provides the regime cycle table and session parameters, loaded from a
//! TOML file or falling back to the built-in defaults. Configuration
//! problems are the only fatal errors in this crate: a malformed cycle
//! table cannot safely drive the simulation, so validation halts
//! initialization instead of limping along.
//!
//! Runtime range problems are handled elsewhere by clamping, and querying
//! an empty history is an ordinary "no data yet" answer, not an error.

pub mod defaults;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::regime::{Cycle, RegimeName, RegimeProfile};
use crate::types::sensor::SensorKind;

// ============================================================================
// Errors
// ============================================================================

/// Fatal startup configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("regime cycle table is empty")]
    EmptyCycle,

    #[error("regime {regime} has a non-positive duration")]
    NonPositiveDuration { regime: RegimeName },

    #[error("regime {regime} is missing noise parameters for {sensor}")]
    MissingSensorParams {
        regime: RegimeName,
        sensor: SensorKind,
    },

    #[error("regime {regime} has invalid noise parameters for {sensor} (std_dev must be finite and non-negative)")]
    InvalidNoiseParams {
        regime: RegimeName,
        sensor: SensorKind,
    },

    #[error("history capacity must be positive")]
    ZeroCapacity,

    #[error("tick period must be positive")]
    ZeroTickPeriod,
}

// ============================================================================
// Config Sections
// ============================================================================

/// Identity of the simulated engine. Display metadata only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSection {
    pub name: String,
    pub serial: String,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            name: "CAT C4.4".to_string(),
            serial: "C44-0001".to_string(),
        }
    }
}

/// Session simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSection {
    /// Rolling history capacity (readings kept before FIFO eviction).
    pub history_capacity: usize,
    /// Number of synthetic readings seeded at session start.
    pub seed_points: usize,
    /// Seed for the reproducible startup history.
    pub seed: u64,
    /// Simulated seconds between ticks.
    pub tick_seconds: u64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            history_capacity: defaults::HISTORY_CAPACITY,
            seed_points: defaults::SEED_POINTS,
            seed: defaults::HISTORY_SEED,
            tick_seconds: defaults::TICK_SECONDS,
        }
    }
}

// ============================================================================
// Engine Config
// ============================================================================

/// Complete engine twin configuration. `Default` yields the built-in
/// NORMAL → DEGRADED → CRITICAL → RECOVERY table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub engine: EngineSection,
    pub simulation: SimulationSection,
    /// Ordered regime cycle table.
    pub regimes: Vec<RegimeProfile>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: EngineSection::default(),
            simulation: SimulationSection::default(),
            regimes: defaults::default_regimes(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file. Any failure here is fatal to
    /// startup; there is no partial fallback to defaults for a file the
    /// operator explicitly pointed at.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            regimes = config.regimes.len(),
            capacity = config.simulation.history_capacity,
            "Loaded engine config"
        );
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every startup invariant. Called on load; also callable on
    /// a hand-assembled config before handing it to a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.simulation.tick_seconds == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        // Cycle::new owns the regime-table invariants.
        self.build_cycle().map(|_| ())
    }

    /// Build the validated, immutable cycle this config describes.
    pub fn build_cycle(&self) -> Result<Cycle, ConfigError> {
        Cycle::new(self.regimes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.history_capacity, 1000);
        assert_eq!(config.simulation.tick_seconds, 10);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = EngineConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let back = EngineConfig::from_toml_str(&raw).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn zero_capacity_is_fatal() {
        let mut config = EngineConfig::default();
        config.simulation.history_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
