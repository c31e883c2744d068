//! Core domain types for the engine digital twin
//!
//! - `sensor`: the fixed sensor channel set, physical ranges, and readings
//! - `regime`: operating regimes and the repeating regime cycle
//! - `health`: derived health status, RUL, and maintenance recommendation

pub mod health;
pub mod regime;
pub mod sensor;

pub use health::{HealthAssessment, HealthStatus, MaintenanceAction};
pub use regime::{Cycle, RegimeName, RegimeProfile};
pub use sensor::{NoiseParams, SensorKind, SensorReading};
