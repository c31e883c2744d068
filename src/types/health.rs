//! Derived health classification, RUL estimate, and maintenance advice
//!
//! Health status is a signal derived from sensor readings, deliberately
//! independent of the simulated regime: there is no RECOVERY status, so a
//! reading drawn during the RECOVERY regime classifies as NORMAL or
//! DEGRADED depending on where the noise landed.

use serde::{Deserialize, Serialize};

// ============================================================================
// Health Status
// ============================================================================

/// Engine health classification derived from the latest reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Normal,
    Degraded,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "NORMAL",
            HealthStatus::Degraded => "DEGRADED",
            HealthStatus::Critical => "CRITICAL",
        }
    }

    /// Status indicator for UI
    pub fn emoji(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "🟢",
            HealthStatus::Degraded => "🟠",
            HealthStatus::Critical => "🔴",
        }
    }

    /// Status color for UI (hex)
    pub fn color(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "#28a745",
            HealthStatus::Degraded => "#ffc107",
            HealthStatus::Critical => "#dc3545",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Maintenance Recommendation
// ============================================================================

/// Maintenance recommendation, banded by remaining useful life.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceAction {
    ImmediateMaintenance,
    ScheduleSoon,
    MonitorClosely,
    ContinueNormal,
}

impl MaintenanceAction {
    /// Get display text for UI
    pub fn display_text(&self) -> &'static str {
        match self {
            MaintenanceAction::ImmediateMaintenance => "Immediate maintenance required",
            MaintenanceAction::ScheduleSoon => "Schedule maintenance soon",
            MaintenanceAction::MonitorClosely => "Monitor closely, plan ahead",
            MaintenanceAction::ContinueNormal => "Continue normal operation",
        }
    }
}

impl std::fmt::Display for MaintenanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

// ============================================================================
// Health Assessment
// ============================================================================

/// Full assessment derived from a single reading. Recomputed fresh on
/// every evaluation; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthAssessment {
    pub status: HealthStatus,
    /// Deviation from nominal, in [0, 1].
    pub anomaly_score: f64,
    /// Remaining useful life estimate, in hours. Never negative.
    pub rul_hours: f64,
    pub recommendation: MaintenanceAction,
}
