//! The mission clock.
//!
//! The clock is the single reader of wall-clock time. Two periodic tasks
//! run for its whole lifetime: a fast tick that recomputes elapsed time,
//! phase, and milestones, and a slow tick that synthesizes one telemetry
//! sample and appends it to the bounded history. Derived state fans out to
//! subscribers over a broadcast channel; slow subscribers skip updates and
//! never stall the producer. Both tasks are aborted when the clock is
//! dropped, so no tick fires after teardown.

use crate::config::MissionConfig;
use crate::phase::{classify_phase, MissionPhase};
use crate::telemetry::{synthesize, TelemetrySample};
use crate::timeline::{locate, MilestoneRecord, TIMELINE};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::RingBuffer;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Fast-tick period: elapsed time, phase, and milestone recomputation.
pub const FAST_TICK: Duration = Duration::from_millis(50);
/// Slow-tick period: telemetry synthesis and history append.
pub const SLOW_TICK: Duration = Duration::from_millis(1000);
/// Telemetry history retention, in slow-tick samples.
pub const HISTORY_CAPACITY: usize = 40;

/// Snapshot of everything derived from elapsed mission time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionState {
    /// Elapsed mission time in seconds; negative before liftoff.
    pub t: f64,
    pub phase: MissionPhase,
    /// Transition marker: true on the streamed update where the phase first
    /// differs from the previous tick. Always false on on-demand snapshots.
    pub phase_changed: bool,
    pub active_milestone: Option<MilestoneRecord>,
    pub next_milestone: Option<MilestoneRecord>,
}

/// One update pushed to clock subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClockUpdate {
    /// Fast-tick derivation result.
    State(MissionState),
    /// Slow-tick telemetry sample, already appended to the history.
    Telemetry(TelemetrySample),
}

/// Owns the periodic sampling of wall-clock time and the telemetry history.
///
/// Dropping the clock aborts both periodic tasks.
pub struct MissionClock {
    epoch: Arc<RwLock<DateTime<Utc>>>,
    history: Arc<Mutex<RingBuffer<TelemetrySample>>>,
    updates: broadcast::Sender<ClockUpdate>,
    fast_task: JoinHandle<()>,
    slow_task: JoinHandle<()>,
}

impl MissionClock {
    /// Start the clock at the standard cadences.
    pub fn spawn(config: &MissionConfig) -> Self {
        Self::with_cadence(config, FAST_TICK, SLOW_TICK)
    }

    /// Start the clock with explicit tick periods. Tests use short ones.
    pub fn with_cadence(config: &MissionConfig, fast: Duration, slow: Duration) -> Self {
        let epoch = Arc::new(RwLock::new(config.launch_epoch));
        let history = Arc::new(Mutex::new(RingBuffer::new(HISTORY_CAPACITY)));
        let (updates, _) = broadcast::channel(256);

        let fast_task = {
            let epoch = epoch.clone();
            let updates = updates.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(fast);
                let mut last_phase: Option<MissionPhase> = None;
                loop {
                    ticker.tick().await;
                    let state = derive_state(*epoch.read().unwrap(), last_phase);
                    if state.phase_changed {
                        log::info!("mission phase change: {}", state.phase);
                    }
                    last_phase = Some(state.phase);
                    // No subscribers is fine; state is also served on demand.
                    let _ = updates.send(ClockUpdate::State(state));
                }
            })
        };

        let slow_task = {
            let epoch = epoch.clone();
            let history = history.clone();
            let updates = updates.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(slow);
                loop {
                    ticker.tick().await;
                    let now = Utc::now();
                    let t = elapsed_seconds(*epoch.read().unwrap(), now);
                    let sample = synthesize(t, now.timestamp_millis(), None);
                    history.lock().unwrap().push(sample);
                    let _ = updates.send(ClockUpdate::Telemetry(sample));
                }
            })
        };

        Self {
            epoch,
            history,
            updates,
            fast_task,
            slow_task,
        }
    }

    /// Subscribe to streamed clock updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ClockUpdate> {
        self.updates.subscribe()
    }

    /// The configured launch epoch.
    pub fn epoch(&self) -> DateTime<Utc> {
        *self.epoch.read().unwrap()
    }

    /// Replace the launch epoch.
    ///
    /// The swap is atomic with respect to the tick tasks: the next tick
    /// observes either the old epoch or the new one, never a mixture.
    pub fn set_epoch(&self, epoch: DateTime<Utc>) {
        *self.epoch.write().unwrap() = epoch;
        log::info!("launch epoch set to {epoch}");
    }

    /// Derive the current state on demand, outside the tick cadence.
    pub fn current_state(&self) -> MissionState {
        derive_state(self.epoch(), None)
    }

    /// Synthesize a sample for the current instant without touching the
    /// history. Used by consumers that need fresher data than the last
    /// slow tick.
    pub fn current_sample(&self) -> TelemetrySample {
        let now = Utc::now();
        let t = elapsed_seconds(self.epoch(), now);
        synthesize(t, now.timestamp_millis(), None)
    }

    /// Snapshot of the telemetry history, oldest first.
    pub fn telemetry_history(&self) -> Vec<TelemetrySample> {
        self.history.lock().unwrap().to_vec()
    }

    /// The most recent telemetry sample, if a slow tick has fired yet.
    pub fn latest_telemetry(&self) -> Option<TelemetrySample> {
        self.history.lock().unwrap().latest().copied()
    }
}

impl Drop for MissionClock {
    fn drop(&mut self) {
        self.fast_task.abort();
        self.slow_task.abort();
    }
}

fn elapsed_seconds(epoch: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - epoch).num_milliseconds() as f64 / 1000.0
}

fn derive_state(epoch: DateTime<Utc>, last_phase: Option<MissionPhase>) -> MissionState {
    let t = elapsed_seconds(epoch, Utc::now());
    let phase = classify_phase(t);
    let located = locate(t, TIMELINE);

    MissionState {
        t,
        phase,
        phase_changed: last_phase.is_some_and(|previous| previous != phase),
        active_milestone: located.active.copied(),
        next_milestone: located.next.copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use tokio::time::{timeout, Duration};

    fn config_with_epoch(epoch: DateTime<Utc>) -> MissionConfig {
        MissionConfig {
            launch_epoch: epoch,
            ..MissionConfig::default()
        }
    }

    async fn next_update(rx: &mut broadcast::Receiver<ClockUpdate>) -> ClockUpdate {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("clock update within 2s")
            .expect("channel open")
    }

    #[tokio::test]
    async fn test_subscribers_receive_state_and_telemetry() {
        let clock = MissionClock::with_cadence(
            &config_with_epoch(Utc::now()),
            Duration::from_millis(5),
            Duration::from_millis(10),
        );
        let mut rx = clock.subscribe();

        let mut saw_state = false;
        let mut saw_telemetry = false;
        for _ in 0..40 {
            match next_update(&mut rx).await {
                ClockUpdate::State(_) => saw_state = true,
                ClockUpdate::Telemetry(_) => saw_telemetry = true,
            }
            if saw_state && saw_telemetry {
                break;
            }
        }

        assert!(saw_state, "no state update received");
        assert!(saw_telemetry, "no telemetry update received");
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let clock = MissionClock::with_cadence(
            &config_with_epoch(Utc::now()),
            Duration::from_millis(50),
            Duration::from_millis(1),
        );

        tokio::time::sleep(Duration::from_millis(150)).await;

        let history = clock.telemetry_history();
        assert!(!history.is_empty());
        assert!(
            history.len() <= HISTORY_CAPACITY,
            "history grew to {}",
            history.len()
        );
    }

    #[tokio::test]
    async fn test_history_orders_samples_oldest_first() {
        let clock = MissionClock::with_cadence(
            &config_with_epoch(Utc::now()),
            Duration::from_millis(50),
            Duration::from_millis(2),
        );

        tokio::time::sleep(Duration::from_millis(40)).await;

        let history = clock.telemetry_history();
        for pair in history.windows(2) {
            assert!(pair[0].timestamp_ms <= pair[1].timestamp_ms);
        }
    }

    #[tokio::test]
    async fn test_drop_stops_both_tasks() {
        let clock = MissionClock::with_cadence(
            &config_with_epoch(Utc::now()),
            Duration::from_millis(2),
            Duration::from_millis(2),
        );
        let mut rx = clock.subscribe();
        drop(clock);

        // Drain whatever was buffered before the abort; the channel must
        // then report closed rather than deliver fresh ticks.
        let closed = timeout(Duration::from_secs(2), async {
            loop {
                match rx.recv().await {
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
        .await;

        assert!(closed.is_ok(), "channel never closed after drop");
    }

    #[tokio::test]
    async fn test_epoch_swap_shifts_elapsed_time() {
        let clock = MissionClock::with_cadence(
            &config_with_epoch(Utc::now()),
            Duration::from_millis(5),
            Duration::from_millis(50),
        );

        let before = clock.current_state();
        assert!(before.t.abs() < 5.0);

        clock.set_epoch(Utc::now() - TimeDelta::seconds(200));
        let after = clock.current_state();

        assert!((after.t - 200.0).abs() < 5.0, "t = {}", after.t);
        assert_eq!(after.phase, MissionPhase::Ascent);
        assert_eq!(after.active_milestone.unwrap().label, "LAS Jettison");
        assert_eq!(after.next_milestone.unwrap().label, "MECO");
    }

    #[tokio::test]
    async fn test_phase_transition_emits_marker_once() {
        // Epoch 300 ms in the future: the clock starts in PRE_LAUNCH and
        // crosses into ASCENT while we watch.
        let clock = MissionClock::with_cadence(
            &config_with_epoch(Utc::now() + TimeDelta::milliseconds(300)),
            Duration::from_millis(5),
            Duration::from_millis(500),
        );
        let mut rx = clock.subscribe();

        let mut marked = 0;
        let mut reached_ascent = false;
        for _ in 0..200 {
            if let ClockUpdate::State(state) = next_update(&mut rx).await {
                if state.phase_changed {
                    marked += 1;
                    assert_eq!(state.phase, MissionPhase::Ascent);
                }
                if state.phase == MissionPhase::Ascent && !state.phase_changed && reached_ascent {
                    break;
                }
                if state.phase == MissionPhase::Ascent {
                    reached_ascent = true;
                }
            }
        }

        assert!(reached_ascent, "clock never reached ASCENT");
        assert_eq!(marked, 1, "transition marker fired {marked} times");
    }

    #[tokio::test]
    async fn test_current_sample_tracks_epoch() {
        let clock = MissionClock::with_cadence(
            &config_with_epoch(Utc::now() + TimeDelta::days(1)),
            Duration::from_millis(50),
            Duration::from_millis(500),
        );

        let sample = clock.current_sample();
        assert_eq!(sample.velocity_kmh, 0.0);
        assert_eq!(sample.fuel_fraction, 100.0);
    }
}
