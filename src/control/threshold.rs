//! Threshold control with a hysteresis dead zone.
//!
//! Below the band the actuator switches on, above it switches off
//! (reversed when inverted).  Inside `[low, high]` the pin is left alone,
//! so a reading hovering near one edge cannot chatter the relay.

use log::debug;

use super::Band;

/// Normal polarity: on below `band.low`, off above `band.high`.
pub fn normal(reading: f32, band: Band) -> Option<bool> {
    decide(reading, band, false)
}

/// Inverted polarity: off below `band.low`, on above `band.high`.
pub fn inverted(reading: f32, band: Band) -> Option<bool> {
    decide(reading, band, true)
}

fn decide(reading: f32, band: Band, inverted: bool) -> Option<bool> {
    debug!(
        "threshold: reading={} band=[{}, {}] inverted={}",
        reading, band.low, band.high, inverted
    );
    if reading < band.low {
        Some(!inverted)
    } else if reading > band.high {
        Some(inverted)
    } else {
        None
    }
}
