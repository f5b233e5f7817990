//! Engine-level behaviour against a fake output line.

use actuator::config::{ActuatorConfig, SecondaryMode};
use actuator::control::failsafe::LatchChange;
use actuator::control::{Mode, Variant};
use actuator::engine::ActuatorEngine;
use actuator::sensors::SensorDocument;

use crate::mock_hw::FakeOutput;

const KEY: &str = "Temperature";

fn engine(config: ActuatorConfig) -> ActuatorEngine<FakeOutput> {
    let mut e = ActuatorEngine::new(config, FakeOutput::new(), 0);
    e.begin().unwrap();
    e.output_mut().take_writes();
    e
}

fn reading(value: f32) -> SensorDocument {
    let mut doc = SensorDocument::new();
    doc.insert_reading(KEY, value);
    doc
}

fn empty() -> SensorDocument {
    SensorDocument::new()
}

fn mixed_hour_cfg() -> ActuatorConfig {
    ActuatorConfig {
        enabled: true,
        temporal: true,
        primary_key: KEY.into(),
        secondary_mode: SecondaryMode::Hour,
        range_low: 20.0,
        range_high: 30.0,
        hour_low: 22,
        hour_high: 6,
        ..Default::default()
    }
}

// ── Dispatch ─────────────────────────────────────────────────

#[test]
fn variant_follows_reading_presence() {
    let mut e = engine(mixed_hour_cfg());
    assert_eq!(e.evaluate(&reading(25.0), 12, 0, 0).variant, Variant::Mixed);
    assert_eq!(e.evaluate(&empty(), 12, 0, 0).variant, Variant::Plain);
}

#[test]
fn at_most_one_write_per_evaluation() {
    let mut e = engine(mixed_hour_cfg());
    for hour in 0..24 {
        e.evaluate(&reading(35.0), hour, 0, 0);
        assert_eq!(e.output_mut().take_writes().len(), 1);
    }
}

#[test]
fn disabled_schedule_runs_duration_off() {
    let cfg = ActuatorConfig {
        enabled: false,
        temporal: true,
        secondary_mode: SecondaryMode::Minute,
        duration_high: 500,
        ..Default::default()
    };
    let e = engine(cfg);
    assert_eq!(e.mode(), Mode::DurationOff);
}

// ── Duration ─────────────────────────────────────────────────

#[test]
fn duration_off_switches_after_min_on() {
    let cfg = ActuatorConfig {
        enabled: false,
        temporal: true,
        duration_high: 1_000,
        ..Default::default()
    };
    let mut e = engine(cfg);
    // Bring the line up by hand through a config round-trip: run the
    // on-phase of a duration actuator first.
    let on_cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        duration_low: 0,
        duration_high: 1_000,
        ..Default::default()
    };
    e.set_config(on_cfg);
    assert_eq!(e.evaluate(&empty(), 0, 0, 100).written, Some(true));
    assert_eq!(e.timers().active_since, 100);

    let mut off_cfg = e.config().clone();
    off_cfg.enabled = false;
    assert_eq!(e.set_config(off_cfg), Some((Mode::DurationOn, Mode::DurationOff)));

    assert_eq!(e.evaluate(&empty(), 0, 0, 1_099).written, None);
    let out = e.evaluate(&empty(), 0, 0, 1_100);
    assert_eq!(out.written, Some(false));
    assert!(out.changed);
    assert_eq!(e.timers().inactive_since, 1_100);
    assert!(!e.config().enabled);
}

#[test]
fn mixed_duration_off_keeps_on_below_band() {
    let cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        primary_key: KEY.into(),
        range_low: 10.0,
        range_high: 20.0,
        duration_low: 0,
        duration_high: 500,
        ..Default::default()
    };
    let mut e = engine(cfg);
    // Mixed on: reading below low switches on.
    assert_eq!(e.evaluate(&reading(5.0), 0, 0, 0).written, Some(true));

    let mut off_cfg = e.config().clone();
    off_cfg.enabled = false;
    e.set_config(off_cfg);

    let out = e.evaluate(&reading(15.0), 0, 0, 500);
    assert_eq!(out.written, Some(true), "below high keeps the line on");
    assert!(!out.changed);
    assert_eq!(e.timers().active_since, 0);

    let out = e.evaluate(&reading(20.0), 0, 0, 600);
    assert_eq!(out.written, Some(false));
    assert_eq!(e.timers().inactive_since, 600);
}

// ── Hour schedule and failsafe ───────────────────────────────

#[test]
fn night_window_with_inversion() {
    let cfg = ActuatorConfig {
        inverted: true,
        primary_key: String::new(),
        ..mixed_hour_cfg()
    };
    let mut e = engine(cfg);
    for hour in (22..24).chain(0..6) {
        assert_eq!(e.evaluate(&empty(), hour, 0, 0).written, Some(true), "hour {hour}");
    }
    for hour in 6..22 {
        assert_eq!(e.evaluate(&empty(), hour, 0, 0).written, Some(false), "hour {hour}");
    }
}

#[test]
fn failsafe_holds_off_all_day_until_reading_drops() {
    let mut e = engine(mixed_hour_cfg());

    let out = e.evaluate(&reading(31.0), 12, 0, 0);
    assert_eq!(out.failsafe, Some(LatchChange::Engaged));

    for hour in 0..24 {
        let out = e.evaluate(&reading(25.0), hour, 0, 0);
        assert!(!out.pin, "hour {hour} must be off while latched");
        assert_eq!(out.failsafe, None);
    }

    let out = e.evaluate(&reading(20.0), 12, 0, 0);
    assert_eq!(out.failsafe, Some(LatchChange::Cleared));
    assert!(out.pin, "day hour resumes normal schedule");

    assert!(!e.evaluate(&reading(25.0), 23, 0, 0).pin);
}

#[test]
fn plain_hour_ignores_engaged_latch() {
    let mut e = engine(mixed_hour_cfg());
    e.evaluate(&reading(40.0), 12, 0, 0);
    assert!(e.failsafe_engaged());
    assert!(e.evaluate(&empty(), 12, 0, 0).pin);
}

// ── Minute and hour:minute ───────────────────────────────────

#[test]
fn minute_boundaries() {
    let cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        secondary_mode: SecondaryMode::Minute,
        minute_low: 10,
        minute_high: 50,
        ..Default::default()
    };
    let mut e = engine(cfg);
    assert_eq!(e.evaluate(&empty(), 0, 50, 0).written, Some(true));
    assert_eq!(e.evaluate(&empty(), 0, 30, 0).written, None);
    assert!(e.evaluate(&empty(), 0, 30, 0).pin);
    assert_eq!(e.evaluate(&empty(), 0, 10, 0).written, Some(false));
}

#[test]
fn minute_window_with_high_below_low_has_no_hold_region() {
    // Known gap: bounds are compared literally, no wrap-around.
    let cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        secondary_mode: SecondaryMode::Minute,
        minute_low: 50,
        minute_high: 10,
        ..Default::default()
    };
    let mut e = engine(cfg);
    for minute in 0..=50 {
        assert_eq!(e.evaluate(&empty(), 0, minute, 0).written, Some(false), "{minute}");
    }
    for minute in 51..60 {
        assert_eq!(e.evaluate(&empty(), 0, minute, 0).written, Some(true), "{minute}");
    }
}

#[test]
fn minute_schedule_ignores_inversion() {
    let cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        inverted: true,
        secondary_mode: SecondaryMode::Minute,
        minute_low: 10,
        minute_high: 50,
        ..Default::default()
    };
    let mut e = engine(cfg);
    assert_eq!(e.evaluate(&empty(), 0, 5, 0).written, Some(false));
}

#[test]
fn hour_minute_ladder() {
    let cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        secondary_mode: SecondaryMode::HourMinute,
        hour_low: 6,
        minute_low: 30,
        hour_high: 20,
        minute_high: 0,
        ..Default::default()
    };
    let mut e = engine(cfg);
    assert_eq!(e.evaluate(&empty(), 6, 30, 0).written, Some(false));
    assert_eq!(e.evaluate(&empty(), 7, 0, 0).written, Some(false));
    assert_eq!(e.evaluate(&empty(), 20, 0, 0).written, Some(true));
    assert_eq!(e.evaluate(&empty(), 21, 0, 0).written, Some(true));
    assert_eq!(e.evaluate(&empty(), 5, 59, 0).written, None);
}

#[test]
fn hour_minute_has_no_carry_over_past_midnight() {
    // Known gap: after midnight, before either boundary, nothing happens
    // even though the evening "on" boundary was the last one passed.
    let cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        secondary_mode: SecondaryMode::HourMinute,
        hour_low: 6,
        minute_low: 30,
        hour_high: 20,
        minute_high: 0,
        ..Default::default()
    };
    let mut e = engine(cfg);
    e.evaluate(&empty(), 21, 0, 0);
    let out = e.evaluate(&empty(), 1, 0, 0);
    assert_eq!(out.written, None);
    assert!(out.pin);
}

// ── Pin faults ───────────────────────────────────────────────

#[test]
fn failed_write_is_a_hold() {
    let cfg = ActuatorConfig {
        enabled: true,
        temporal: true,
        duration_low: 100,
        ..Default::default()
    };
    let mut e = engine(cfg);
    e.output_mut().fail_writes = true;
    let out = e.evaluate(&empty(), 0, 0, 200);
    assert_eq!(out.written, None);
    assert!(!out.changed);
    assert_eq!(e.timers().active_since, 0, "no transition recorded");
    assert!(!e.is_on());

    e.output_mut().fail_writes = false;
    assert_eq!(e.evaluate(&empty(), 0, 0, 300).written, Some(true));
    assert_eq!(e.timers().active_since, 300);
}

#[test]
fn failed_read_reports_commanded_level() {
    let cfg = ActuatorConfig {
        enabled: true,
        primary_key: KEY.into(),
        range_low: 18.0,
        range_high: 22.0,
        ..Default::default()
    };
    let mut e = engine(cfg);
    e.output_mut().fail_reads = true;
    let out = e.evaluate(&reading(10.0), 0, 0, 0);
    assert_eq!(out.written, Some(true));
    assert!(out.pin);
}
