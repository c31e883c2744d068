//! Sensor reading synthesis
//!
//! Two generation modes with deliberately different shapes:
//!
//! - **Live**: one independent Normal draw per channel from the active
//!   regime's parameters. A live reading only has to reflect what is true
//!   right now under that regime.
//! - **Seeded series**: the startup history must look like one engine's
//!   continuous physical trace, so it is a smooth sinusoid per channel plus
//!   Gaussian noise plus a slow linear wear drift on oil temperature, EGT,
//!   and vibration. Sampling regimes point-by-point would put step
//!   discontinuities at every regime boundary.
//!
//! The RNG is owned and injectable: seeded and live modes never share
//! random state, and tests construct synthesizers from a known seed.

use std::f64::consts::PI;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::types::regime::RegimeProfile;
use crate::types::sensor::{SensorKind, SensorReading};

/// Wear factor reached at the end of a seeded window (dimensionless).
const MAX_WEAR: f64 = 0.3;

// ============================================================================
// Reading Synthesizer
// ============================================================================

/// Draws sensor readings. Owns its random source.
#[derive(Debug)]
pub struct ReadingSynthesizer {
    rng: StdRng,
}

impl ReadingSynthesizer {
    /// Live-mode synthesizer seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic synthesizer for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one live reading from the regime's per-channel parameters,
    /// clamped to physical ranges.
    pub fn synthesize(
        &mut self,
        regime: &RegimeProfile,
        timestamp: DateTime<Utc>,
    ) -> SensorReading {
        SensorReading::from_fn(timestamp, |kind| {
            let p = regime.params(kind);
            (&kind).clamp(sample_normal(&mut self.rng, p.mean, p.std_dev))
        })
    }

    /// Generate a smooth synthetic history of `n` readings, timestamps
    /// advancing by `step` from `start`. Identical `seed` and `n` always
    /// reproduce the identical sequence.
    pub fn synthesize_series(
        n: usize,
        seed: u64,
        start: DateTime<Utc>,
        step: Duration,
    ) -> Vec<SensorReading> {
        let mut rng = StdRng::seed_from_u64(seed);
        // Inclusive endpoints: the window spans exactly [0, 4π] and
        // [0, MAX_WEAR], whatever the sample count.
        let denom = n.saturating_sub(1).max(1) as f64;

        (0..n)
            .map(|i| {
                let t = 4.0 * PI * i as f64 / denom;
                let wear = MAX_WEAR * i as f64 / denom;
                let timestamp = start + step * i as i32;

                SensorReading::from_fn(timestamp, |kind| {
                    let wave = wave_spec(kind);
                    let phase = if wave.cosine { t.cos() } else { t.sin() };
                    let value = wave.baseline
                        + wave.amplitude * phase
                        + sample_normal(&mut rng, 0.0, wave.noise_std)
                        + wear * wave.wear_gain;
                    (&kind).clamp(value)
                })
            })
            .collect()
    }
}

fn sample_normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    // Degenerate parameters (negative or non-finite σ) are rejected at
    // config validation; a hand-built profile falls back to the mean.
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

// ============================================================================
// Seeded-Series Wave Table
// ============================================================================

struct WaveSpec {
    baseline: f64,
    amplitude: f64,
    /// Pressures ride a cosine so they run out of phase with temperatures.
    cosine: bool,
    noise_std: f64,
    /// Scales the monotone wear drift; zero for channels that do not drift.
    wear_gain: f64,
}

const fn wave_spec(kind: SensorKind) -> WaveSpec {
    match kind {
        SensorKind::OilTemperature => WaveSpec {
            baseline: 75.0,
            amplitude: 15.0,
            cosine: false,
            noise_std: 2.0,
            wear_gain: 10.0,
        },
        SensorKind::CoolantTemperature => WaveSpec {
            baseline: 85.0,
            amplitude: 10.0,
            cosine: false,
            noise_std: 1.5,
            wear_gain: 0.0,
        },
        SensorKind::Egt => WaveSpec {
            baseline: 350.0,
            amplitude: 50.0,
            cosine: false,
            noise_std: 10.0,
            wear_gain: 30.0,
        },
        SensorKind::OilPressure => WaveSpec {
            baseline: 350.0,
            amplitude: 50.0,
            cosine: true,
            noise_std: 15.0,
            wear_gain: 0.0,
        },
        SensorKind::FuelPressure => WaveSpec {
            baseline: 1800.0,
            amplitude: 200.0,
            cosine: true,
            noise_std: 50.0,
            wear_gain: 0.0,
        },
        SensorKind::Vibration => WaveSpec {
            baseline: 2.5,
            amplitude: 0.5,
            cosine: false,
            noise_std: 0.2,
            wear_gain: 1.5,
        },
        SensorKind::Rpm => WaveSpec {
            baseline: 1500.0,
            amplitude: 300.0,
            cosine: false,
            noise_std: 50.0,
            wear_gain: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults;
    use crate::types::regime::Cycle;
    use crate::types::sensor::NoiseParams;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_735_689_600, 0).unwrap() // 2025-01-01T00:00:00Z
    }

    #[test]
    fn live_readings_respect_physical_ranges() {
        let cycle = Cycle::new(defaults::default_regimes()).unwrap();
        let mut synth = ReadingSynthesizer::seeded(7);
        for regime in cycle.regimes() {
            for _ in 0..200 {
                let reading = synth.synthesize(regime, start());
                assert!(reading.in_physical_ranges(), "{reading:?}");
            }
        }
    }

    #[test]
    fn live_draws_clamp_an_out_of_band_profile() {
        let mut regime = defaults::default_regimes().remove(0);
        regime
            .sensor_params
            .insert(SensorKind::OilTemperature, NoiseParams::new(500.0, 0.0));
        let mut synth = ReadingSynthesizer::seeded(7);
        let reading = synth.synthesize(&regime, start());
        assert_eq!(reading.oil_temperature, 120.0);
    }

    #[test]
    fn seeded_series_is_reproducible() {
        let step = Duration::seconds(10);
        let a = ReadingSynthesizer::synthesize_series(500, 42, start(), step);
        let b = ReadingSynthesizer::synthesize_series(500, 42, start(), step);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_series() {
        let step = Duration::seconds(10);
        let a = ReadingSynthesizer::synthesize_series(100, 1, start(), step);
        let b = ReadingSynthesizer::synthesize_series(100, 2, start(), step);
        assert_ne!(a, b);
    }

    #[test]
    fn series_timestamps_advance_by_step() {
        let step = Duration::seconds(10);
        let series = ReadingSynthesizer::synthesize_series(50, 42, start(), step);
        assert_eq!(series.len(), 50);
        for pair in series.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, step);
        }
        assert_eq!(series[0].timestamp, start());
    }

    #[test]
    fn series_values_respect_physical_ranges() {
        let series =
            ReadingSynthesizer::synthesize_series(1000, 42, start(), Duration::seconds(10));
        assert!(series.iter().all(SensorReading::in_physical_ranges));
    }

    #[test]
    fn wear_drift_is_visible_one_period_apart() {
        // With n = 1001 the sinusoid period is exactly 500 samples, so
        // points i and i+500 share a phase and differ only by wear + noise.
        let series =
            ReadingSynthesizer::synthesize_series(1001, 42, start(), Duration::seconds(10));
        let mean_delta = |kind: SensorKind| {
            (0..100)
                .map(|i| series[i + 500].value(kind) - series[i].value(kind))
                .sum::<f64>()
                / 100.0
        };
        // Expected drift over half a window: oil +1.5 °C, EGT +4.5 °C,
        // vibration +0.225 g.
        assert!(mean_delta(SensorKind::OilTemperature) > 0.5);
        assert!(mean_delta(SensorKind::Egt) > 1.5);
        assert!(mean_delta(SensorKind::Vibration) > 0.05);
    }

    #[test]
    fn single_point_series_is_well_defined() {
        let series = ReadingSynthesizer::synthesize_series(1, 42, start(), Duration::seconds(10));
        assert_eq!(series.len(), 1);
        assert!(series[0].in_physical_ranges());
    }
}
