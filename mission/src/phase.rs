//! Mission phase classification.
//!
//! Six coarse mission segments, derived from elapsed seconds alone via
//! fixed thresholds. The thresholds coincide with designated timeline rows
//! (MECO, translunar injection, return transit start, splashdown); a test
//! in `timeline` cross-checks them against the table so the two cannot
//! drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Elapsed seconds at main engine cutoff; closes the ascent.
pub const ASCENT_END_S: f64 = 486.0;
/// Elapsed seconds at translunar injection; closes the orbit segment.
pub const ORBIT_END_S: f64 = 92_220.0;
/// Elapsed seconds when the return transit begins; closes the flyby.
pub const FLYBY_END_S: f64 = 436_980.0;
/// Elapsed seconds at splashdown; closes the return transit.
pub const RETURN_END_S: f64 = 786_780.0;

/// One coarse mission segment.
///
/// The declaration order is the mission order, so the derived `Ord` gives
/// "how far along" comparisons and [`classify_phase`] is a non-decreasing
/// step function of elapsed time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionPhase {
    PreLaunch,
    Ascent,
    Orbit,
    LunarFlyby,
    Return,
    Splashdown,
}

impl MissionPhase {
    /// Human-readable segment name for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::PreLaunch => "Pre-Launch",
            Self::Ascent => "Ascent",
            Self::Orbit => "Orbit",
            Self::LunarFlyby => "Lunar Flyby",
            Self::Return => "Return",
            Self::Splashdown => "Splashdown",
        }
    }
}

impl fmt::Display for MissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify elapsed mission time into a phase.
///
/// Total and deterministic over all `t`. Each interval is left-closed,
/// right-open; the final branch is closed-ended, so arbitrarily large `t`
/// stays [`MissionPhase::Splashdown`].
pub fn classify_phase(t: f64) -> MissionPhase {
    if t < 0.0 {
        MissionPhase::PreLaunch
    } else if t < ASCENT_END_S {
        MissionPhase::Ascent
    } else if t < ORBIT_END_S {
        MissionPhase::Orbit
    } else if t < FLYBY_END_S {
        MissionPhase::LunarFlyby
    } else if t < RETURN_END_S {
        MissionPhase::Return
    } else {
        MissionPhase::Splashdown
    }
}
