//! Built-in defaults: session parameters and the regime cycle table.
//!
//! The CRITICAL profile intentionally centers its tripwire channels past
//! the health thresholds (oil pressure 175 kPa is already below the
//! 200 kPa floor): the critical regime is supposed to produce critical
//! health. Do not "fix" these means toward nominal.

use std::collections::BTreeMap;

use crate::types::regime::{RegimeName, RegimeProfile};
use crate::types::sensor::{NoiseParams, SensorKind};

// === Session defaults ===
/// Rolling history capacity (readings).
pub const HISTORY_CAPACITY: usize = 1000;
/// Synthetic readings seeded at session start.
pub const SEED_POINTS: usize = 1000;
/// Seed for the reproducible startup history.
pub const HISTORY_SEED: u64 = 42;
/// Simulated seconds between ticks (reference deployment refresh period).
pub const TICK_SECONDS: u64 = 10;

// === Cycle durations (seconds) ===
pub const NORMAL_DURATION: u64 = 30;
pub const DEGRADED_DURATION: u64 = 20;
pub const CRITICAL_DURATION: u64 = 20;
pub const RECOVERY_DURATION: u64 = 20;

/// The built-in NORMAL → DEGRADED → CRITICAL → RECOVERY cycle table.
pub fn default_regimes() -> Vec<RegimeProfile> {
    vec![
        RegimeProfile {
            name: RegimeName::Normal,
            duration_seconds: NORMAL_DURATION,
            display_color: "#28a745".to_string(),
            display_emoji: "🟢".to_string(),
            sensor_params: params([
                (SensorKind::OilTemperature, 78.0, 2.0),
                (SensorKind::CoolantTemperature, 85.0, 1.5),
                (SensorKind::Egt, 370.0, 10.0),
                (SensorKind::OilPressure, 340.0, 15.0),
                (SensorKind::FuelPressure, 1800.0, 50.0),
                (SensorKind::Vibration, 2.2, 0.2),
                (SensorKind::Rpm, 1500.0, 50.0),
            ]),
        },
        RegimeProfile {
            name: RegimeName::Degraded,
            duration_seconds: DEGRADED_DURATION,
            display_color: "#ffc107".to_string(),
            display_emoji: "🟠".to_string(),
            sensor_params: params([
                (SensorKind::OilTemperature, 102.0, 3.0),
                (SensorKind::CoolantTemperature, 94.0, 2.0),
                (SensorKind::Egt, 505.0, 15.0),
                (SensorKind::OilPressure, 230.0, 20.0),
                (SensorKind::FuelPressure, 1650.0, 60.0),
                (SensorKind::Vibration, 4.2, 0.5),
                (SensorKind::Rpm, 1400.0, 60.0),
            ]),
        },
        RegimeProfile {
            name: RegimeName::Critical,
            duration_seconds: CRITICAL_DURATION,
            display_color: "#dc3545".to_string(),
            display_emoji: "🔴".to_string(),
            sensor_params: params([
                (SensorKind::OilTemperature, 108.0, 4.0),
                (SensorKind::CoolantTemperature, 103.0, 2.5),
                (SensorKind::Egt, 545.0, 20.0),
                (SensorKind::OilPressure, 175.0, 25.0),
                (SensorKind::FuelPressure, 1450.0, 80.0),
                (SensorKind::Vibration, 6.5, 0.8),
                (SensorKind::Rpm, 1250.0, 80.0),
            ]),
        },
        RegimeProfile {
            name: RegimeName::Recovery,
            duration_seconds: RECOVERY_DURATION,
            display_color: "#1f77b4".to_string(),
            display_emoji: "🔵".to_string(),
            sensor_params: params([
                (SensorKind::OilTemperature, 96.0, 3.0),
                (SensorKind::CoolantTemperature, 92.0, 2.0),
                (SensorKind::Egt, 475.0, 15.0),
                (SensorKind::OilPressure, 265.0, 20.0),
                (SensorKind::FuelPressure, 1700.0, 60.0),
                (SensorKind::Vibration, 3.5, 0.4),
                (SensorKind::Rpm, 1420.0, 60.0),
            ]),
        },
    ]
}

fn params(entries: [(SensorKind, f64, f64); 7]) -> BTreeMap<SensorKind, NoiseParams> {
    entries
        .into_iter()
        .map(|(kind, mean, std_dev)| (kind, NoiseParams::new(mean, std_dev)))
        .collect()
}
