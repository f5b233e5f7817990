//! Actuator output line drivers.
//!
//! ## Dual-target design
//!
//! [`HalOutput`] wraps any `embedded-hal` stateful output pin.  On ESP-IDF
//! that is an `esp-idf-hal` `PinDriver` in input/output mode, so the level
//! can be read back from the pad.  On host/test [`SimOutput`] tracks the
//! level in memory only.

use embedded_hal::digital::StatefulOutputPin;
use log::warn;

use crate::app::ports::{OutputDriver, PinError};

// ---------------------------------------------------------------------------
// embedded-hal pin
// ---------------------------------------------------------------------------

/// Output driver over an `embedded-hal` pin.
pub struct HalOutput<P> {
    pin: P,
}

impl<P: StatefulOutputPin> HalOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the underlying pin back.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: StatefulOutputPin> OutputDriver for HalOutput<P> {
    fn set_pin(&mut self, high: bool) -> Result<(), PinError> {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|e| {
            warn!("output write failed: {:?}", e);
            PinError::WriteFailed
        })
    }

    fn read_pin(&mut self) -> Result<bool, PinError> {
        self.pin.is_set_high().map_err(|e| {
            warn!("output read-back failed: {:?}", e);
            PinError::ReadFailed
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory pin
// ---------------------------------------------------------------------------

/// Simulated output line.  Counts writes so tests can check the
/// at-most-one-write rule.
#[derive(Debug, Default)]
pub struct SimOutput {
    level: bool,
    writes: usize,
}

impl SimOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl OutputDriver for SimOutput {
    fn set_pin(&mut self, high: bool) -> Result<(), PinError> {
        self.level = high;
        self.writes += 1;
        Ok(())
    }

    fn read_pin(&mut self) -> Result<bool, PinError> {
        Ok(self.level)
    }
}
