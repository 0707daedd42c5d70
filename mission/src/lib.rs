//! Mission derivation engine.
//!
//! Everything shown on the dashboard is a function of one scalar: elapsed
//! mission time in seconds, measured from the configured launch epoch
//! (negative before liftoff). The [`clock::MissionClock`] is the only
//! component that reads wall-clock time; it recomputes elapsed time on a
//! fixed cadence and feeds it through three pure derivations:
//!
//! - [`phase::classify_phase`]: coarse mission segment
//! - [`telemetry::synthesize`]: synthetic vehicle/crew metrics
//! - [`timeline::locate`]: active and upcoming milestones
//!
//! Derived state fans out to subscribers over a broadcast channel; the
//! serving layer in the `console` crate exposes it over HTTP/SSE.

pub mod clock;
pub mod config;
pub mod phase;
pub mod telemetry;
pub mod timeline;

pub use clock::{ClockUpdate, MissionClock, MissionState};
pub use config::MissionConfig;
pub use phase::{classify_phase, MissionPhase};
pub use telemetry::{synthesize, TelemetrySample};
pub use timeline::{locate, Located, MilestoneRecord, TIMELINE};
