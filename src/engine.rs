//! Per-actuator decision engine.
//!
//! An [`ActuatorEngine`] owns one [`ActuatorConfig`], the runtime state the
//! leaf algorithms need (dwell timers, failsafe latch, last commanded
//! level) and the output line it drives.  [`evaluate`](ActuatorEngine::evaluate)
//! runs the selected algorithm, writes the pin at most once, then reads the
//! pin back for reporting.
//!
//! ```text
//!   SensorDocument ──▶ Mode dispatch ──▶ leaf algorithm ──▶ OutputDriver
//!                                                          │
//!                            Outcome ◀── read-back ◀───────┘
//! ```

use log::{debug, info, warn};

use crate::app::ports::{OutputDriver, PinError};
use crate::config::ActuatorConfig;
use crate::control::duration::{self, DwellTimers, Step};
use crate::control::failsafe::{FailsafeLatch, LatchChange};
use crate::control::schedule::{self, HourMinute, HourWindow, MinuteWindow};
use crate::control::threshold;
use crate::control::{Band, Mode, Variant};
use crate::sensors::SensorDocument;

/// What one evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub mode: Mode,
    pub variant: Variant,
    /// Level written this call, or `None` if the pin was left alone.
    pub written: Option<bool>,
    /// The written level differs from the previously commanded one.
    pub changed: bool,
    /// Pin level read back after the decision.
    pub pin: bool,
    /// Failsafe latch transition, mixed hour schedule only.
    pub failsafe: Option<LatchChange>,
}

/// What the leaf algorithm asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Hold,
    /// Drive the level without touching the dwell timers.
    Drive(bool),
    /// Drive the level and start the matching dwell.
    Transition(bool),
}

impl From<Option<bool>> for Action {
    fn from(level: Option<bool>) -> Self {
        level.map_or(Self::Hold, Self::Drive)
    }
}

impl From<Step> for Action {
    fn from(step: Step) -> Self {
        match step {
            Step::Hold => Self::Hold,
            Step::SwitchOn => Self::Transition(true),
            Step::SwitchOff => Self::Transition(false),
            Step::Keep(level) => Self::Drive(level),
        }
    }
}

pub struct ActuatorEngine<O> {
    config: ActuatorConfig,
    mode: Mode,
    output: O,
    timers: DwellTimers,
    latch: FailsafeLatch,
    /// Last level successfully written.  Only the duration guards and
    /// change detection use it; decisions never read the pin.
    commanded: bool,
}

impl<O: OutputDriver> ActuatorEngine<O> {
    /// Build an engine.  Both dwell timers start at `now_ms`.
    pub fn new(config: ActuatorConfig, output: O, now_ms: u64) -> Self {
        let mode = Mode::select(&config);
        Self {
            config,
            mode,
            output,
            timers: DwellTimers::new(now_ms),
            latch: FailsafeLatch::new(),
            commanded: false,
        }
    }

    /// Drive the line low so the engine's idea of the level matches the pad.
    pub fn begin(&mut self) -> Result<(), PinError> {
        self.output.set_pin(false)?;
        self.commanded = false;
        Ok(())
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    /// Replace the configuration and reselect the mode.  Dwell timers and
    /// the failsafe latch carry over.  Returns `(from, to)` when the mode
    /// changed.
    pub fn set_config(&mut self, config: ActuatorConfig) -> Option<(Mode, Mode)> {
        self.config = config;
        self.reselect()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn failsafe_engaged(&self) -> bool {
        self.latch.is_engaged()
    }

    /// Last commanded level.
    pub fn is_on(&self) -> bool {
        self.commanded
    }

    pub fn timers(&self) -> DwellTimers {
        self.timers
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Read the line back, falling back to the commanded level on error.
    pub fn read_pin(&mut self) -> bool {
        match self.output.read_pin() {
            Ok(level) => level,
            Err(e) => {
                warn!("{}; reporting commanded level {}", e, self.commanded);
                self.commanded
            }
        }
    }

    /// Run one decision.
    pub fn evaluate(&mut self, doc: &SensorDocument, hour: u8, minute: u8, now_ms: u64) -> Outcome {
        let reading = doc.reading(&self.config.primary_key);
        let variant = if reading.is_some() {
            Variant::Mixed
        } else {
            Variant::Plain
        };
        let mode = self.mode;
        let band = Band::of(&self.config);
        let mut failsafe = None;

        let action = match mode {
            Mode::Idle => Action::Hold,
            Mode::Threshold | Mode::ThresholdInverted => match reading {
                Some(r) if mode == Mode::Threshold => threshold::normal(r, band).into(),
                Some(r) => threshold::inverted(r, band).into(),
                None => {
                    warn!(
                        "threshold actuator: no numeric reading for {:?}, holding",
                        self.config.primary_key
                    );
                    Action::Hold
                }
            },
            Mode::DurationOn => {
                let min_off = self.config.duration_low;
                let step = match reading {
                    Some(r) => {
                        duration::mixed_on(&self.timers, now_ms, min_off, self.commanded, r, band)
                    }
                    None => duration::on(&self.timers, now_ms, min_off, self.commanded),
                };
                step.into()
            }
            Mode::DurationOff => {
                let min_on = self.config.duration_high;
                let step = match reading {
                    Some(r) => {
                        duration::mixed_off(&self.timers, now_ms, min_on, self.commanded, r, band)
                    }
                    None => duration::off(&self.timers, now_ms, min_on, self.commanded),
                };
                step.into()
            }
            Mode::HourSchedule => {
                let window = HourWindow {
                    low: self.config.hour_low,
                    high: self.config.hour_high,
                };
                let level = match reading {
                    Some(r) => {
                        failsafe = self.latch.update(r, band);
                        schedule::mixed_hour(
                            hour,
                            window,
                            self.config.inverted,
                            self.latch.is_engaged(),
                        )
                    }
                    None => schedule::hour(hour, window, self.config.inverted),
                };
                Action::Drive(level)
            }
            Mode::MinuteSchedule => {
                let window = MinuteWindow {
                    low: self.config.minute_low,
                    high: self.config.minute_high,
                };
                let level = match reading {
                    Some(r) => schedule::mixed_minute(minute, window, r, band),
                    None => schedule::minute(minute, window),
                };
                level.into()
            }
            Mode::HourMinuteSchedule => {
                let ladder = HourMinute {
                    hour_low: self.config.hour_low,
                    minute_low: self.config.minute_low,
                    hour_high: self.config.hour_high,
                    minute_high: self.config.minute_high,
                };
                let level = match reading {
                    Some(r) => schedule::mixed_hour_minute(hour, minute, ladder, r, band),
                    None => schedule::hour_minute(hour, minute, ladder),
                };
                level.into()
            }
        };

        let previous = self.commanded;
        let written = self.apply(action, now_ms);
        let pin = self.read_pin();
        debug!(
            "evaluate: mode={} variant={:?} action={:?} pin={}",
            mode, variant, action, pin
        );

        Outcome {
            mode,
            variant,
            written,
            changed: written.is_some_and(|level| level != previous),
            pin,
            failsafe,
        }
    }

    /// Perform the single pin write for `action`.  A failed write is a hold:
    /// no commanded level, timer or flag change is recorded.
    fn apply(&mut self, action: Action, now_ms: u64) -> Option<bool> {
        let (level, transition) = match action {
            Action::Hold => return None,
            Action::Drive(level) => (level, false),
            Action::Transition(level) => (level, true),
        };

        if let Err(e) = self.output.set_pin(level) {
            warn!("{}; holding previous level", e);
            return None;
        }
        self.commanded = level;

        if transition {
            if level {
                self.timers.active_since = now_ms;
                self.config.enabled = true;
                debug!("duration: switched on at {} ms", now_ms);
            } else {
                self.timers.inactive_since = now_ms;
                self.config.enabled = false;
                debug!("duration: switched off at {} ms", now_ms);
            }
            if let Some((from, to)) = self.reselect() {
                info!("duration transition moved mode {} -> {}", from, to);
            }
        }
        Some(level)
    }

    fn reselect(&mut self) -> Option<(Mode, Mode)> {
        let from = self.mode;
        self.mode = Mode::select(&self.config);
        (from != self.mode).then_some((from, self.mode))
    }
}
