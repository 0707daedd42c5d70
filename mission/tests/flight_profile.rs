//! Whole-profile checks across the derivation engine: a sweep of the
//! mission from countdown to recovery, exercising phase, telemetry, and
//! milestone derivation together the way the clock drives them.

use mission::{classify_phase, locate, synthesize, MissionPhase, TIMELINE};
use shared::RingBuffer;

/// The mid-ascent scenario: two hundred seconds after liftoff the vehicle
/// is past LAS jettison and climbing toward main engine cutoff.
#[test]
fn ascent_at_t_plus_200() {
    let t = 200.0;

    assert_eq!(classify_phase(t), MissionPhase::Ascent);

    let sample = synthesize(t, 0, Some(7));
    assert_eq!(sample.velocity_kmh, 19_200.0 + 30.0 * 72.0);
    assert_eq!(sample.velocity_kmh, 21_360.0);

    let located = locate(t, TIMELINE);
    assert_eq!(located.active.unwrap().label, "LAS Jettison");
    assert_eq!(located.active.unwrap().offset_seconds, 198.0);
    assert_eq!(located.next.unwrap().label, "MECO");
    assert_eq!(located.next.unwrap().offset_seconds, 486.0);
}

#[test]
fn countdown_holds_at_the_pad() {
    let t = -90.0;

    assert_eq!(classify_phase(t), MissionPhase::PreLaunch);

    let sample = synthesize(t, 0, Some(7));
    assert_eq!(sample.altitude_km, 0.0);
    assert_eq!(sample.velocity_kmh, 0.0);
    assert_eq!(sample.fuel_fraction, 100.0);

    let located = locate(t, TIMELINE);
    assert_eq!(located.active.unwrap().label, "Auto Sequence Start");
    assert_eq!(located.next.unwrap().label, "Handoff to Onboard Computers");
}

#[test]
fn phase_and_active_milestone_advance_together() {
    // Sweep the whole profile; both derivations must move forward only.
    let mut last_phase = classify_phase(-50_000.0);
    let mut last_active = None;

    let mut t = -50_000.0;
    while t < 800_000.0 {
        let phase = classify_phase(t);
        assert!(phase >= last_phase, "phase regressed at t={t}");
        last_phase = phase;

        let active = locate(t, TIMELINE)
            .active
            .map(|record| record.offset_seconds);
        assert!(
            active >= last_active,
            "active milestone regressed at t={t}"
        );
        last_active = active;

        t += 311.0;
    }
}

#[test]
fn splashdown_state_is_terminal() {
    for t in [786_780.0, 1_000_000.0, 5.0e9] {
        assert_eq!(classify_phase(t), MissionPhase::Splashdown);

        let sample = synthesize(t, 0, Some(7));
        assert_eq!(sample.velocity_kmh, 28_000.0);
        assert_eq!(sample.fuel_fraction, 0.0);
    }

    let located = locate(5.0e9, TIMELINE);
    assert_eq!(located.active.unwrap().label, "Mission Complete");
    assert!(located.next.is_none());
}

/// Forty-one simulated slow ticks through a history ring of capacity forty:
/// the first sample falls off, the forty-first is newest.
#[test]
fn history_ring_retains_last_forty_samples() {
    let mut history = RingBuffer::new(40);

    for tick in 0..41 {
        let t = tick as f64;
        history.push(synthesize(t, tick, Some(tick as u64)));
    }

    assert_eq!(history.len(), 40);
    assert_eq!(history.oldest().unwrap().timestamp_ms, 1);
    assert_eq!(history.latest().unwrap().timestamp_ms, 40);
    assert!(history.iter().all(|sample| sample.timestamp_ms != 0));
}
