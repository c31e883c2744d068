//! Config Validation Tests
//!
//! Exercises the TOML config layer independently of the simulation:
//! defaults, partial overrides, and every fatal startup error. A cycle
//! table that fails validation must never reach a session.

use std::io::Write;

use engine_twin::{ConfigError, EngineConfig, RegimeName, SensorKind};

// ============================================================================
// Defaults and Overrides
// ============================================================================

#[test]
fn empty_document_yields_the_default_config() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn default_cycle_table_is_the_reference_sequence() {
    let cycle = EngineConfig::default().build_cycle().unwrap();
    let names: Vec<RegimeName> = cycle.regimes().iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            RegimeName::Normal,
            RegimeName::Degraded,
            RegimeName::Critical,
            RegimeName::Recovery
        ]
    );
    assert_eq!(cycle.total_duration(), 90);
}

#[test]
fn critical_regime_centers_past_the_health_tripwires() {
    // Narrative design: the critical regime is supposed to produce
    // critical health, so its means sit beyond the thresholds.
    let cycle = EngineConfig::default().build_cycle().unwrap();
    let critical = &cycle.regimes()[2];
    assert_eq!(critical.name, RegimeName::Critical);
    assert!(critical.params(SensorKind::OilPressure).mean < 200.0);
    assert!(critical.params(SensorKind::OilTemperature).mean > 100.0);
    assert!(critical.params(SensorKind::Egt).mean > 500.0);
    assert!(critical.params(SensorKind::Vibration).mean > 4.0);
}

#[test]
fn simulation_section_overrides_apply() {
    let config = EngineConfig::from_toml_str(
        r##"
[simulation]
history_capacity = 500
seed_points = 250
seed = 7
tick_seconds = 5
"##,
    )
    .unwrap();
    assert_eq!(config.simulation.history_capacity, 500);
    assert_eq!(config.simulation.seed_points, 250);
    assert_eq!(config.simulation.seed, 7);
    assert_eq!(config.simulation.tick_seconds, 5);
    // Untouched sections keep their defaults.
    assert_eq!(config.regimes, EngineConfig::default().regimes);
}

#[test]
fn a_complete_regime_override_builds_a_cycle() {
    let config = EngineConfig::from_toml_str(
        r##"
[[regimes]]
name = "NORMAL"
duration_seconds = 60
display_color = "#28a745"
display_emoji = "OK"

[regimes.sensor_params]
oil_temperature = { mean = 78.0, std_dev = 2.0 }
coolant_temperature = { mean = 85.0, std_dev = 1.5 }
egt = { mean = 370.0, std_dev = 10.0 }
oil_pressure = { mean = 340.0, std_dev = 15.0 }
fuel_pressure = { mean = 1800.0, std_dev = 50.0 }
vibration = { mean = 2.2, std_dev = 0.2 }
rpm = { mean = 1500.0, std_dev = 50.0 }
"##,
    )
    .unwrap();
    let cycle = config.build_cycle().unwrap();
    assert_eq!(cycle.regimes().len(), 1);
    assert_eq!(cycle.total_duration(), 60);
}

// ============================================================================
// Fatal Startup Errors
// ============================================================================

#[test]
fn missing_sensor_params_halt_initialization() {
    // vibration and rpm omitted from the table below.
    let result = EngineConfig::from_toml_str(
        r##"
[[regimes]]
name = "NORMAL"
duration_seconds = 60
display_color = "#28a745"
display_emoji = "OK"

[regimes.sensor_params]
oil_temperature = { mean = 78.0, std_dev = 2.0 }
coolant_temperature = { mean = 85.0, std_dev = 1.5 }
egt = { mean = 370.0, std_dev = 10.0 }
oil_pressure = { mean = 340.0, std_dev = 15.0 }
fuel_pressure = { mean = 1800.0, std_dev = 50.0 }
"##,
    );
    assert!(matches!(
        result,
        Err(ConfigError::MissingSensorParams {
            regime: RegimeName::Normal,
            sensor: SensorKind::Vibration
        })
    ));
}

#[test]
fn zero_duration_halts_initialization() {
    let mut config = EngineConfig::default();
    config.regimes[3].duration_seconds = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositiveDuration {
            regime: RegimeName::Recovery
        })
    ));
}

#[test]
fn empty_regime_table_halts_initialization() {
    let mut config = EngineConfig::default();
    config.regimes.clear();
    assert!(matches!(config.validate(), Err(ConfigError::EmptyCycle)));
}

#[test]
fn unknown_sensor_name_fails_at_parse_time() {
    let result = EngineConfig::from_toml_str(
        r##"
[[regimes]]
name = "NORMAL"
duration_seconds = 60
display_color = "#28a745"
display_emoji = "OK"

[regimes.sensor_params]
oil_temprature = { mean = 78.0, std_dev = 2.0 }
"##,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn malformed_toml_fails_at_parse_time() {
    let result = EngineConfig::from_toml_str("[simulation\nhistory_capacity = 500");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn load_reads_and_validates_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine]\nname = \"Test Engine\"\nserial = \"T-1\"").unwrap();
    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.engine.name, "Test Engine");
    assert_eq!(config.engine.serial, "T-1");
}

#[test]
fn load_surfaces_io_errors_with_the_path() {
    let result = EngineConfig::load("/nonexistent/engine-twin.toml");
    match result {
        Err(ConfigError::Io { path, .. }) => assert!(path.contains("engine-twin.toml")),
        other => panic!("expected Io error, got {other:?}"),
    }
}
