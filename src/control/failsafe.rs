//! One-sided failsafe latch for mixed hour schedules.
//!
//! A reading at or above the top of the band engages the latch; only a
//! reading at or below the bottom of the band clears it.  While engaged the
//! schedule can never switch the actuator on.

use log::warn;

use super::Band;

/// Latch transition produced by [`FailsafeLatch::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchChange {
    Engaged,
    Cleared,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailsafeLatch {
    engaged: bool,
}

impl FailsafeLatch {
    pub const fn new() -> Self {
        Self { engaged: false }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Feed one reading. Clearing is checked before engaging.
    pub fn update(&mut self, reading: f32, band: Band) -> Option<LatchChange> {
        if self.engaged && reading <= band.low {
            self.engaged = false;
            warn!("Failsafe cleared (reading {} <= {})", reading, band.low);
            Some(LatchChange::Cleared)
        } else if !self.engaged && reading >= band.high {
            self.engaged = true;
            warn!("Failsafe engaged (reading {} >= {})", reading, band.high);
            Some(LatchChange::Engaged)
        } else {
            None
        }
    }
}
