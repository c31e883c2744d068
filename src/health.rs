//! Health Evaluation Module
//!
//! Deterministic, rule-based classification of the latest sensor reading
//! into a health status, anomaly score, RUL estimate, and maintenance
//! recommendation. The rules are fixed tripwire thresholds with
//! order-independent counting; the whole evaluation is a pure function of
//! the reading, so identical readings always yield identical assessments.

use crate::telemetry::TelemetryHistory;
use crate::types::health::{HealthAssessment, HealthStatus, MaintenanceAction};
use crate::types::sensor::SensorReading;

/// Fixed health tripwires and score bands.
pub mod thresholds {
    /// Oil temperature above this counts one anomaly (°C).
    pub const OIL_TEMP_HIGH_C: f64 = 100.0;
    /// Exhaust gas temperature above this counts one anomaly (°C).
    pub const EGT_HIGH_C: f64 = 500.0;
    /// Vibration above this counts one anomaly (g).
    pub const VIBRATION_HIGH_G: f64 = 4.0;
    /// Oil pressure below this counts one anomaly (kPa).
    pub const OIL_PRESSURE_LOW_KPA: f64 = 200.0;

    /// Anomaly score when three or more tripwires fire.
    pub const SCORE_CRITICAL: f64 = 0.90;
    /// Anomaly score when exactly two tripwires fire.
    pub const SCORE_DEGRADED_TWO: f64 = 0.60;
    /// Anomaly score when exactly one tripwire fires.
    pub const SCORE_DEGRADED_ONE: f64 = 0.45;
    /// Anomaly score with no tripwires fired.
    pub const SCORE_NOMINAL: f64 = 0.15;

    /// RUL at a zero anomaly score (hours).
    pub const BASE_RUL_HOURS: f64 = 500.0;

    /// RUL below this demands immediate maintenance (hours).
    pub const RUL_IMMEDIATE_HOURS: f64 = 50.0;
    /// RUL below this warrants scheduling maintenance soon (hours).
    pub const RUL_SCHEDULE_HOURS: f64 = 150.0;
    /// RUL below this warrants close monitoring (hours).
    pub const RUL_MONITOR_HOURS: f64 = 300.0;
}

/// Number of tripwire thresholds a reading exceeds, 0..=4. Strict
/// comparisons: a value exactly on a threshold does not count.
pub fn anomaly_count(reading: &SensorReading) -> u32 {
    let mut count = 0;
    if reading.oil_temperature > thresholds::OIL_TEMP_HIGH_C {
        count += 1;
    }
    if reading.egt > thresholds::EGT_HIGH_C {
        count += 1;
    }
    if reading.vibration > thresholds::VIBRATION_HIGH_G {
        count += 1;
    }
    if reading.oil_pressure < thresholds::OIL_PRESSURE_LOW_KPA {
        count += 1;
    }
    count
}

/// Classify one reading. Pure and stateless.
pub fn evaluate(reading: &SensorReading) -> HealthAssessment {
    let count = anomaly_count(reading);

    let (status, anomaly_score) = match count {
        c if c >= 3 => (HealthStatus::Critical, thresholds::SCORE_CRITICAL),
        2 => (HealthStatus::Degraded, thresholds::SCORE_DEGRADED_TWO),
        1 => (HealthStatus::Degraded, thresholds::SCORE_DEGRADED_ONE),
        _ => (HealthStatus::Normal, thresholds::SCORE_NOMINAL),
    };

    // Linear decay from the base RUL; floored at zero, nothing above.
    // Written as a subtraction so the band values come out exact in f64
    // (500·(1−0.9) rounds just below 50 and would fall into the wrong
    // recommendation band).
    let rul_hours = (thresholds::BASE_RUL_HOURS - anomaly_score * thresholds::BASE_RUL_HOURS)
        .max(0.0);
    let recommendation = recommendation_for_rul(rul_hours);

    tracing::debug!(
        anomaly_count = count,
        status = %status,
        anomaly_score,
        rul_hours,
        "Evaluated reading"
    );

    HealthAssessment {
        status,
        anomaly_score,
        rul_hours,
        recommendation,
    }
}

/// Assess the most recent reading in a history. `None` on an empty
/// history: no data yet means no assessment, not an error.
pub fn evaluate_latest(history: &TelemetryHistory) -> Option<HealthAssessment> {
    history.latest().map(evaluate)
}

/// Lowest matching RUL band wins.
fn recommendation_for_rul(rul_hours: f64) -> MaintenanceAction {
    if rul_hours < thresholds::RUL_IMMEDIATE_HOURS {
        MaintenanceAction::ImmediateMaintenance
    } else if rul_hours < thresholds::RUL_SCHEDULE_HOURS {
        MaintenanceAction::ScheduleSoon
    } else if rul_hours < thresholds::RUL_MONITOR_HOURS {
        MaintenanceAction::MonitorClosely
    } else {
        MaintenanceAction::ContinueNormal
    }
}
