//! Time-of-day schedules: hour window, minute window and the hour:minute
//! ladder, each with a sensor-gated "mixed" variant.
//!
//! Only the hour window understands wrap-around and inversion.  The
//! minute window and the hour:minute ladder compare bounds literally:
//! with `minute_high < minute_low` there is no hold region, and the
//! ladder never carries yesterday's last boundary past midnight.

use log::debug;

use super::Band;

// ═══════════════════════════════════════════════════════════════
//  Hour window
// ═══════════════════════════════════════════════════════════════

/// Hour window `[low, high)`.  `high < low` wraps past midnight, e.g.
/// 22..6 covers 22:00–05:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    pub low: u8,
    pub high: u8,
}

impl HourWindow {
    pub fn contains(&self, hour: u8) -> bool {
        if self.high < self.low {
            // e.g. 22..6 (overnight, wraps around midnight)
            hour >= self.low || hour < self.high
        } else {
            // e.g. 9..17 (daytime)
            hour >= self.low && hour < self.high
        }
    }
}

/// Hour schedule: off inside the window, on outside (swapped when
/// `inverted`).  Always drives the pin.
pub fn hour(hour: u8, window: HourWindow, inverted: bool) -> bool {
    let inside = window.contains(hour);
    debug!(
        "hour schedule: hour={} window={}..{} inside={} inverted={}",
        hour, window.low, window.high, inside, inverted
    );
    if inside { inverted } else { !inverted }
}

/// Mixed hour schedule: like [`hour`], but an engaged failsafe latch
/// counts as "inside", so it can only ever hold the actuator off.
pub fn mixed_hour(hour: u8, window: HourWindow, inverted: bool, latched: bool) -> bool {
    let inside = window.contains(hour);
    debug!(
        "mixed hour schedule: hour={} window={}..{} inside={} latched={} inverted={}",
        hour, window.low, window.high, inside, latched, inverted
    );
    if inside || latched { inverted } else { !inverted }
}

// ═══════════════════════════════════════════════════════════════
//  Minute window
// ═══════════════════════════════════════════════════════════════

/// Minute-of-hour bounds.  No wrap-around, no inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteWindow {
    pub low: u8,
    pub high: u8,
}

/// Minute schedule: off at or before `low`, on at or after `high`,
/// unchanged strictly between.
pub fn minute(minute: u8, window: MinuteWindow) -> Option<bool> {
    debug!(
        "minute schedule: minute={} low={} high={}",
        minute, window.low, window.high
    );
    if minute <= window.low {
        Some(false)
    } else if minute >= window.high {
        Some(true)
    } else {
        None
    }
}

/// Mixed minute schedule.  In the "off" region the actuator stays on
/// unless the reading is above the band; in the "on" region it only
/// switches on while the reading is below the band.
pub fn mixed_minute(minute: u8, window: MinuteWindow, reading: f32, band: Band) -> Option<bool> {
    debug!(
        "mixed minute schedule: minute={} low={} high={} reading={}",
        minute, window.low, window.high, reading
    );
    if minute <= window.low {
        Some(reading <= band.high)
    } else if minute >= window.high {
        Some(reading < band.low)
    } else {
        None
    }
}

// ═══════════════════════════════════════════════════════════════
//  Hour:minute ladder
// ═══════════════════════════════════════════════════════════════

/// Switch-off time (`low`) and switch-on time (`high`) of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourMinute {
    pub hour_low: u8,
    pub minute_low: u8,
    pub hour_high: u8,
    pub minute_high: u8,
}

/// Which boundary of the ladder matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// Past the switch-off time.
    Low,
    /// Past the switch-on time.
    High,
}

impl HourMinute {
    fn past_low(&self, hour: u8, minute: u8) -> bool {
        (hour == self.hour_low && minute >= self.minute_low) || hour > self.hour_low
    }

    fn past_high(&self, hour: u8, minute: u8) -> bool {
        (hour == self.hour_high && minute >= self.minute_high) || hour > self.hour_high
    }

    /// First matching rung.  The rungs of whichever boundary comes later
    /// in the day are tried first, so the boundary passed most recently
    /// today wins.
    fn edge(&self, hour: u8, minute: u8) -> Option<Edge> {
        let low = self.past_low(hour, minute).then_some(Edge::Low);
        let high = self.past_high(hour, minute).then_some(Edge::High);
        if (self.hour_low, self.minute_low) >= (self.hour_high, self.minute_high) {
            low.or(high)
        } else {
            high.or(low)
        }
    }
}

/// Hour:minute schedule: off past the low boundary, on past the high one.
pub fn hour_minute(hour: u8, minute: u8, ladder: HourMinute) -> Option<bool> {
    let edge = ladder.edge(hour, minute);
    debug!(
        "hour:minute schedule: {:02}:{:02} low={:02}:{:02} high={:02}:{:02} edge={:?}",
        hour,
        minute,
        ladder.hour_low,
        ladder.minute_low,
        ladder.hour_high,
        ladder.minute_high,
        edge
    );
    edge.map(|e| e == Edge::High)
}

/// Mixed hour:minute schedule.  Past the low boundary the actuator stays
/// on until the reading reaches the top of the band; past the high
/// boundary it only switches on while the reading is below the band.
pub fn mixed_hour_minute(
    hour: u8,
    minute: u8,
    ladder: HourMinute,
    reading: f32,
    band: Band,
) -> Option<bool> {
    let edge = ladder.edge(hour, minute);
    debug!(
        "mixed hour:minute schedule: {:02}:{:02} edge={:?} reading={}",
        hour, minute, edge, reading
    );
    edge.map(|e| match e {
        Edge::Low => reading < band.high,
        Edge::High => reading < band.low,
    })
}
