//! Integration tests for the edge → corroborate → actuate pipeline.
//!
//! These run on the host (x86_64) and verify the full dispatch chain
//! from an edge token down to the actuator and modem calls, without any
//! real hardware.

use crate::mock_hw::{failed_reading, ok_reading, HwCall, LogSink, MockHardware};

use homeguard::app::service::AlarmService;
use homeguard::config::SystemConfig;
use homeguard::events::SensorSource;
use homeguard::sensors::dht11::ReadStatus;

fn make_service() -> (AlarmService, MockHardware, LogSink) {
    let config = SystemConfig::default();
    let mut service = AlarmService::new(config);
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    service.start(&mut sink);
    (service, hw, sink)
}

// ── Flame edge ────────────────────────────────────────────────

#[test]
fn flame_edge_above_threshold_sends_text_then_buzzes_once() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(51, 40);

    service.handle_edge(SensorSource::Flame, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![
            HwCall::SendText("Your house is on fire!".into()),
            HwCall::Sleep(1000),
            HwCall::Buzzer(true),
            HwCall::Sleep(1000),
            HwCall::Buzzer(false),
        ],
        "notification must precede exactly one buzzer on/off pair"
    );
    assert_eq!(hw.texts_sent().len(), 1);
    assert!(sink.events.iter().any(|e| e.contains("AlarmRaised")));
}

#[test]
fn flame_edge_at_threshold_is_not_corroborated() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(50, 40); // threshold is strictly-greater-than

    service.handle_edge(SensorSource::Flame, &mut hw, &mut sink);

    assert!(hw.calls.is_empty(), "50°C must trigger neither text nor buzzer");
    assert_eq!(hw.climate_reads, 1, "the edge still consults the decoder");
}

#[test]
fn flame_edge_with_failed_reading_is_silently_dropped() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = failed_reading(ReadStatus::Timeout);

    service.handle_edge(SensorSource::Flame, &mut hw, &mut sink);

    // The -1 sentinel never exceeds the threshold; no status check exists.
    assert!(hw.calls.is_empty());
}

// ── Water edge ────────────────────────────────────────────────

#[test]
fn water_edge_above_threshold_closes_window_and_leaves_it_energized() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(25, 81);

    service.handle_edge(SensorSource::Water, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![HwCall::Window { closing: true }, HwCall::Sleep(5000)],
        "close, hold, and no stop command afterwards"
    );
    assert!(hw.buzzer_events().is_empty(), "water path never sounds the buzzer");
    assert!(hw.texts_sent().is_empty(), "water path sends no SMS");
}

#[test]
fn water_edge_at_threshold_takes_no_action() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(25, 80);

    service.handle_edge(SensorSource::Water, &mut hw, &mut sink);

    assert!(hw.calls.is_empty());
}

#[test]
fn water_edge_with_failed_reading_is_silently_dropped() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = failed_reading(ReadStatus::ChecksumError);

    service.handle_edge(SensorSource::Water, &mut hw, &mut sink);

    assert!(hw.calls.is_empty());
}

// ── Motion edge ───────────────────────────────────────────────

#[test]
fn motion_edge_always_alarms_regardless_of_reading() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = failed_reading(ReadStatus::Timeout);

    service.handle_edge(SensorSource::Motion, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![
            HwCall::SendText("Intruder detected in your house!".into()),
            HwCall::Sleep(1000),
            HwCall::Buzzer(true),
            HwCall::Sleep(1000),
            HwCall::Buzzer(false),
        ]
    );
    assert_eq!(hw.climate_reads, 0, "PIR path needs no corroboration");
}

// ── Background poll loop ──────────────────────────────────────

#[test]
fn poll_tick_reopens_window_when_dry_and_humidity_low() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(25, 50);
    hw.lines.water_active = false;

    service.poll_tick(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![HwCall::Window { closing: false }, HwCall::Sleep(5000)]
    );
    assert!(sink.events.iter().any(|e| e.contains("Telemetry")));
}

#[test]
fn poll_tick_with_failed_reading_still_reopens() {
    // Quirk preserved from the deployed behavior: -1 satisfies the
    // `< open threshold` test, so a dry line plus an unreadable sensor
    // re-opens the window.
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = failed_reading(ReadStatus::Timeout);
    hw.lines.water_active = false;

    service.poll_tick(&mut hw, &mut sink);

    assert_eq!(hw.window_commands(), vec![false]);
}

#[test]
fn poll_tick_with_wet_line_never_opens() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(25, 50);
    hw.lines.water_active = true;

    service.poll_tick(&mut hw, &mut sink);

    assert!(hw.window_commands().is_empty());
}

#[test]
fn poll_tick_at_open_threshold_does_not_open() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(25, 60); // open requires strictly below 60
    hw.lines.water_active = false;

    service.poll_tick(&mut hw, &mut sink);

    assert!(hw.window_commands().is_empty());
}

// ── Edge bookkeeping ──────────────────────────────────────────

#[test]
fn every_edge_is_reported_to_the_sink() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.reading = ok_reading(20, 40);

    let before = sink.events.len();
    service.handle_edge(SensorSource::Flame, &mut hw, &mut sink);
    service.handle_edge(SensorSource::Water, &mut hw, &mut sink);

    let edges: Vec<_> = sink.events[before..]
        .iter()
        .filter(|e| e.contains("EdgeDetected"))
        .collect();
    assert_eq!(edges.len(), 2, "uncorroborated edges still show up in telemetry");
}
