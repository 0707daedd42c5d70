//! Synthetic telemetry generation.
//!
//! No sensor is read anywhere in this system: every vehicle and crew metric
//! is computed from elapsed mission time by a three-piece kinematic
//! approximation. The only non-deterministic term is the cosmetic
//! heart-rate jitter, isolated behind an optional seed so everything else
//! stays exactly testable.

use crate::phase::ASCENT_END_S;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// First ascent seam: solid booster separation (s). Matches the
/// `SRB Separation` timeline row.
pub const BOOST_END_S: f64 = 128.0;

/// Crew resting heart rate shown before liftoff (bpm).
const RESTING_HEART_RATE_BPM: f64 = 72.0;

/// One synthesized snapshot of vehicle and crew metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// Wall-clock capture time in milliseconds, for display ordering only.
    /// Does not participate in any derivation.
    pub timestamp_ms: i64,
    pub altitude_km: f64,
    pub velocity_kmh: f64,
    /// Remaining fuel as a percentage in [0, 100].
    pub fuel_fraction: f64,
    /// Cosmetic crew heart rate; carries uniform jitter in [0, 5) bpm.
    pub heart_rate_bpm: f64,
}

/// Synthesize one telemetry sample at elapsed mission time `t` seconds.
///
/// Total over all `t`. `timestamp_ms` is recorded on the sample verbatim.
/// `rng_seed` feeds only the heart-rate jitter: pass `Some` for
/// reproducible output, `None` to draw fresh entropy per call.
///
/// The velocity curve is value-continuous at the booster seam
/// (`t = 128` gives exactly 19 200 km/h from both sides). The altitude
/// curve deliberately is not: the boost-piece power law overshoots the
/// post-separation baseline of 50 km, and the drop is an inherited
/// behavior of the model, pinned by test rather than smoothed away.
pub fn synthesize(t: f64, timestamp_ms: i64, rng_seed: Option<u64>) -> TelemetrySample {
    if t < 0.0 {
        return TelemetrySample {
            timestamp_ms,
            altitude_km: 0.0,
            velocity_kmh: 0.0,
            fuel_fraction: 100.0,
            heart_rate_bpm: RESTING_HEART_RATE_BPM,
        };
    }

    let (velocity_kmh, altitude_km) = if t < BOOST_END_S {
        (150.0 * t, t.powf(2.1) / 50.0)
    } else if t < ASCENT_END_S {
        (
            19_200.0 + 30.0 * (t - BOOST_END_S),
            50.0 + 0.5 * (t - BOOST_END_S),
        )
    } else {
        (28_000.0, 200.0 + t / 1000.0)
    };

    let fuel_fraction = (100.0 - t / 100.0).max(0.0);

    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let heart_rate_bpm = 70.0 + rng.random_range(0.0..5.0);

    TelemetrySample {
        timestamp_ms,
        altitude_km,
        velocity_kmh,
        fuel_fraction,
        heart_rate_bpm,
    }
}
