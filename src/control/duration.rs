//! Duration cycling with minimum on/off dwell times.
//!
//! An enabled duration actuator switches on once it has been off for at
//! least `min_off` ms; a disabled one switches off once it has been on for
//! at least `min_on` ms.  The mixed variants gate the switch on the sensor
//! reading once the dwell has elapsed: the timer is the necessary
//! condition, the reading decides.

use log::debug;

use super::Band;

/// Timestamps of the last transitions, in monotonic milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellTimers {
    pub active_since: u64,
    pub inactive_since: u64,
}

impl DwellTimers {
    /// Both timers start at `now` (restart resets dwell).
    pub fn new(now_ms: u64) -> Self {
        Self {
            active_since: now_ms,
            inactive_since: now_ms,
        }
    }

    /// Milliseconds since the last switch on.
    pub fn on_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.active_since)
    }

    /// Milliseconds since the last switch off.
    pub fn off_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inactive_since)
    }
}

/// Result of one duration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Dwell not elapsed (or wrong phase): leave the pin alone.
    Hold,
    /// Switch on and start the on-dwell.
    SwitchOn,
    /// Switch off and start the off-dwell.
    SwitchOff,
    /// Re-drive the current level without a transition.
    Keep(bool),
}

/// Duration-On: while off, switch on once off for `min_off` ms.
pub fn on(timers: &DwellTimers, now_ms: u64, min_off: u64, is_on: bool) -> Step {
    if is_on {
        return Step::Hold;
    }
    let off_for = timers.off_for(now_ms);
    debug!("duration-on: off for {} ms (min {} ms)", off_for, min_off);
    if off_for >= min_off {
        Step::SwitchOn
    } else {
        Step::Hold
    }
}

/// Mixed-Duration-On: as [`on`], but only switch on while the reading is
/// still below the band; otherwise keep the actuator off.
pub fn mixed_on(
    timers: &DwellTimers,
    now_ms: u64,
    min_off: u64,
    is_on: bool,
    reading: f32,
    band: Band,
) -> Step {
    match on(timers, now_ms, min_off, is_on) {
        Step::SwitchOn if reading < band.low => Step::SwitchOn,
        Step::SwitchOn => {
            debug!("duration-on: reading {} >= low {}, staying off", reading, band.low);
            Step::Keep(false)
        }
        other => other,
    }
}

/// Duration-Off: while on, switch off once on for `min_on` ms.
pub fn off(timers: &DwellTimers, now_ms: u64, min_on: u64, is_on: bool) -> Step {
    if !is_on {
        return Step::Hold;
    }
    let on_for = timers.on_for(now_ms);
    debug!("duration-off: on for {} ms (min {} ms)", on_for, min_on);
    if on_for >= min_on {
        Step::SwitchOff
    } else {
        Step::Hold
    }
}

/// Mixed-Duration-Off: as [`off`], but only switch off once the reading
/// has reached the top of the band; otherwise keep the actuator on.
pub fn mixed_off(
    timers: &DwellTimers,
    now_ms: u64,
    min_on: u64,
    is_on: bool,
    reading: f32,
    band: Band,
) -> Step {
    match off(timers, now_ms, min_on, is_on) {
        Step::SwitchOff if reading >= band.high => Step::SwitchOff,
        Step::SwitchOff => {
            debug!("duration-off: reading {} < high {}, staying on", reading, band.high);
            Step::Keep(true)
        }
        other => other,
    }
}
