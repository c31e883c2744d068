//! Sensor channels, physical ranges, and multi-sensor readings
//!
//! The CAT C4.4 twin monitors a fixed set of seven channels. Simulated
//! values are always clamped to the channel's physical range before they
//! leave the synthesizer: a physical sensor cannot report a value outside
//! what it can represent, so out-of-band draws are corrected, not rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Sensor Channels
// ============================================================================

/// One of the engine's monitored sensor channels.
///
/// Serialized as its snake_case name. The serde impls are written by hand
/// because `SensorKind` doubles as a map key in the TOML config, where
/// keys must serialize as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensorKind {
    OilTemperature,
    CoolantTemperature,
    /// Exhaust gas temperature
    Egt,
    OilPressure,
    FuelPressure,
    Vibration,
    Rpm,
}

impl SensorKind {
    /// All channels, in canonical order. Iteration order is stable, which
    /// keeps seeded generation reproducible.
    pub const ALL: [SensorKind; 7] = [
        SensorKind::OilTemperature,
        SensorKind::CoolantTemperature,
        SensorKind::Egt,
        SensorKind::OilPressure,
        SensorKind::FuelPressure,
        SensorKind::Vibration,
        SensorKind::Rpm,
    ];

    /// Snake-case channel name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::OilTemperature => "oil_temperature",
            SensorKind::CoolantTemperature => "coolant_temperature",
            SensorKind::Egt => "egt",
            SensorKind::OilPressure => "oil_pressure",
            SensorKind::FuelPressure => "fuel_pressure",
            SensorKind::Vibration => "vibration",
            SensorKind::Rpm => "rpm",
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SensorKind::OilTemperature => "Oil Temperature",
            SensorKind::CoolantTemperature => "Coolant Temperature",
            SensorKind::Egt => "EGT",
            SensorKind::OilPressure => "Oil Pressure",
            SensorKind::FuelPressure => "Fuel Pressure",
            SensorKind::Vibration => "Vibration",
            SensorKind::Rpm => "RPM",
        }
    }

    /// Measurement unit for display
    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::OilTemperature | SensorKind::CoolantTemperature | SensorKind::Egt => "°C",
            SensorKind::OilPressure | SensorKind::FuelPressure => "kPa",
            SensorKind::Vibration => "g",
            SensorKind::Rpm => "rpm",
        }
    }

    /// Physical range `(min, max)` the channel can report.
    pub fn range(&self) -> (f64, f64) {
        match self {
            SensorKind::OilTemperature => (20.0, 120.0),
            SensorKind::CoolantTemperature => (30.0, 110.0),
            SensorKind::Egt => (200.0, 650.0),
            SensorKind::OilPressure => (0.0, 600.0),
            SensorKind::FuelPressure => (0.0, 2500.0),
            SensorKind::Vibration => (0.0, 50.0),
            SensorKind::Rpm => (600.0, 2200.0),
        }
    }

    /// Clamp a raw value into the channel's physical range.
    pub fn clamp(&self, value: f64) -> f64 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SensorKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SensorKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KindVisitor;

        impl serde::de::Visitor<'_> for KindVisitor {
            type Value = SensorKind;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a sensor channel name")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<SensorKind, E> {
                SensorKind::ALL
                    .iter()
                    .find(|kind| kind.as_str() == value)
                    .copied()
                    .ok_or_else(|| {
                        E::unknown_variant(
                            value,
                            &[
                                "oil_temperature",
                                "coolant_temperature",
                                "egt",
                                "oil_pressure",
                                "fuel_pressure",
                                "vibration",
                                "rpm",
                            ],
                        )
                    })
            }
        }

        deserializer.deserialize_str(KindVisitor)
    }
}

// ============================================================================
// Noise Parameters
// ============================================================================

/// Normal-distribution parameters for one channel under one regime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NoiseParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl NoiseParams {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Noiseless parameters centered mid-range. Fallback for hand-built
    /// profiles that slipped past validation; never hit on configured cycles.
    pub fn centered(kind: SensorKind) -> Self {
        let (min, max) = kind.range();
        Self {
            mean: (min + max) / 2.0,
            std_dev: 0.0,
        }
    }
}

// ============================================================================
// Sensor Readings
// ============================================================================

/// One timestamped snapshot across all channels. Immutable once created;
/// values are already clamped to their physical ranges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub oil_temperature: f64,
    pub coolant_temperature: f64,
    pub egt: f64,
    pub oil_pressure: f64,
    pub fuel_pressure: f64,
    pub vibration: f64,
    pub rpm: f64,
}

impl SensorReading {
    /// Build a reading by sampling each channel in canonical order.
    pub fn from_fn(timestamp: DateTime<Utc>, mut sample: impl FnMut(SensorKind) -> f64) -> Self {
        Self {
            timestamp,
            oil_temperature: sample(SensorKind::OilTemperature),
            coolant_temperature: sample(SensorKind::CoolantTemperature),
            egt: sample(SensorKind::Egt),
            oil_pressure: sample(SensorKind::OilPressure),
            fuel_pressure: sample(SensorKind::FuelPressure),
            vibration: sample(SensorKind::Vibration),
            rpm: sample(SensorKind::Rpm),
        }
    }

    /// Value of a single channel.
    pub fn value(&self, kind: SensorKind) -> f64 {
        match kind {
            SensorKind::OilTemperature => self.oil_temperature,
            SensorKind::CoolantTemperature => self.coolant_temperature,
            SensorKind::Egt => self.egt,
            SensorKind::OilPressure => self.oil_pressure,
            SensorKind::FuelPressure => self.fuel_pressure,
            SensorKind::Vibration => self.vibration,
            SensorKind::Rpm => self.rpm,
        }
    }

    /// True when every channel sits inside its physical range.
    pub fn in_physical_ranges(&self) -> bool {
        SensorKind::ALL.iter().all(|kind| {
            let (min, max) = kind.range();
            let v = self.value(*kind);
            v >= min && v <= max
        })
    }
}
