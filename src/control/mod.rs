//! Leaf control algorithms and mode selection.
//!
//! Every algorithm here is a pure function of its inputs (plus the small
//! state structs it is handed), returning the level to drive or `None` to
//! leave the pin alone.  The [`ActuatorEngine`](crate::engine::ActuatorEngine)
//! owns the state and performs the actual pin write.

pub mod duration;
pub mod failsafe;
pub mod schedule;
pub mod threshold;

use core::fmt;

use crate::config::{ActuatorConfig, SecondaryMode};

/// Sensor band `[low, high]` shared by the threshold and mixed algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f32,
    pub high: f32,
}

impl Band {
    pub fn of(config: &ActuatorConfig) -> Self {
        Self {
            low: config.range_low,
            high: config.range_high,
        }
    }
}

/// Control mode, selected once per configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Disabled, non-temporal: the pin is never written.
    Idle,
    Threshold,
    ThresholdInverted,
    /// Enabled duration actuator waiting out its minimum off time.
    DurationOn,
    /// Disabled duration actuator waiting out its minimum on time.
    DurationOff,
    HourSchedule,
    MinuteSchedule,
    HourMinuteSchedule,
}

impl Mode {
    /// Dispatch rule over `(enabled, temporal, inverted, secondary_mode)`.
    pub fn select(config: &ActuatorConfig) -> Self {
        match (config.enabled, config.temporal) {
            (true, false) if config.inverted => Self::ThresholdInverted,
            (true, false) => Self::Threshold,
            (true, true) => match config.secondary_mode {
                SecondaryMode::Hour => Self::HourSchedule,
                SecondaryMode::Minute => Self::MinuteSchedule,
                SecondaryMode::HourMinute => Self::HourMinuteSchedule,
                SecondaryMode::None => Self::DurationOn,
            },
            (false, true) => Self::DurationOff,
            (false, false) => Self::Idle,
        }
    }

    /// Whether evaluating this mode needs the wall-clock hour/minute.
    pub const fn needs_wall_clock(self) -> bool {
        matches!(
            self,
            Self::HourSchedule | Self::MinuteSchedule | Self::HourMinuteSchedule
        )
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Threshold => "threshold",
            Self::ThresholdInverted => "threshold-inverted",
            Self::DurationOn => "duration-on",
            Self::DurationOff => "duration-off",
            Self::HourSchedule => "hour",
            Self::MinuteSchedule => "minute",
            Self::HourMinuteSchedule => "hour-minute",
        };
        f.write_str(name)
    }
}

/// Whether an evaluation ran the sensor-gated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Plain,
    Mixed,
}
