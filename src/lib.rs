//! Engine Twin: Digital Twin Telemetry Core
//!
//! Simulates a CAT C4.4 diesel engine's sensor telemetry and derives a live
//! health/maintenance signal for display hosts.
//!
//! ## Architecture
//!
//! - **Clock**: pure wall-clock → operating-regime mapping over a repeating
//!   NORMAL → DEGRADED → CRITICAL → RECOVERY cycle
//! - **Synthesizer**: regime-keyed noisy readings (live) and reproducible
//!   smooth startup histories (seeded)
//! - **Telemetry**: bounded rolling history with FIFO eviction
//! - **Health**: threshold-count classification, anomaly score, RUL
//!   estimate, and maintenance recommendation
//! - **Session**: the owned per-engine state driven one tick at a time

pub mod clock;
pub mod config;
pub mod health;
pub mod session;
pub mod synthesizer;
pub mod telemetry;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, EngineConfig};

// Re-export commonly used types
pub use types::{
    Cycle, HealthAssessment, HealthStatus, MaintenanceAction, NoiseParams, RegimeName,
    RegimeProfile, SensorKind, SensorReading,
};

// Re-export the session-facing surface
pub use session::{EngineSession, TickOutcome};
pub use synthesizer::ReadingSynthesizer;
pub use telemetry::TelemetryHistory;
