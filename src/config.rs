//! Actuator configuration parameters.
//!
//! [`ActuatorConfig`] is the in-memory configuration of one actuator.
//! [`ConfigDocument`] is its persisted JSON shape: every key is optional on
//! the way in (load is a partial merge) and always present on the way out.
//!
//! ```json
//! {"enabled":true,"temporal":true,"inverted":false,
//!  "low":[20.0,60000,22,10],"high":[30.0,120000,6,50],
//!  "type":["Temperature","hour"]}
//! ```

use core::fmt;
use core::str::FromStr;

use log::info;
use serde::{Deserialize, Deserializer, Serialize};

use crate::app::ports::ConfigError;

/// Which schedule sub-algorithm a temporal actuator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondaryMode {
    /// Pure duration cycling.
    #[default]
    None,
    /// Hour-of-day window.
    Hour,
    /// Minute-of-hour window.
    Minute,
    /// Combined hour:minute ladder.
    HourMinute,
}

impl SecondaryMode {
    /// Wire name used in the `type` tuple.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::HourMinute => "hourMinute",
        }
    }
}

impl FromStr for SecondaryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "hourMinute" => Ok(Self::HourMinute),
            _ => Err(ConfigError::ValidationFailed(
                "type[1] must be one of \"hour\", \"minute\", \"hourMinute\", \"\"",
            )),
        }
    }
}

impl fmt::Display for SecondaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Configuration of a single actuator.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorConfig {
    // --- Dispatch flags ---
    /// Actuator is logically active.
    pub enabled: bool,
    /// Duration/schedule control instead of pure threshold control.
    pub temporal: bool,
    /// Flip polarity of threshold and hour-schedule decisions.
    pub inverted: bool,
    /// Sensor key this actuator reacts to (empty = none).
    pub primary_key: String,
    /// Schedule sub-algorithm for temporal actuators.
    pub secondary_mode: SecondaryMode,

    // --- Sensor band ---
    pub range_low: f32,
    pub range_high: f32,

    // --- Dwell (milliseconds) ---
    /// Minimum time off before a duration actuator may switch on.
    pub duration_low: u64,
    /// Minimum time on before a duration actuator may switch off.
    pub duration_high: u64,

    // --- Schedule ---
    /// 0–23. `hour_high < hour_low` wraps past midnight.
    pub hour_low: u8,
    pub hour_high: u8,
    /// 0–59.
    pub minute_low: u8,
    pub minute_high: u8,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            temporal: false,
            inverted: false,
            primary_key: String::new(),
            secondary_mode: SecondaryMode::None,

            range_low: 0.0,
            range_high: 0.0,

            duration_low: 0,
            duration_high: 0,

            hour_low: 0,
            hour_high: 0,
            minute_low: 0,
            minute_high: 0,
        }
    }
}

impl ActuatorConfig {
    /// Merge the keys present in `doc` into this config.
    ///
    /// The whole document is validated first; on error nothing is applied.
    pub fn merge(&mut self, doc: &ConfigDocument) -> Result<(), ConfigError> {
        let secondary = doc.validate()?;

        if let Some(enabled) = doc.enabled {
            self.enabled = enabled;
        }
        if let Some(temporal) = doc.temporal {
            self.temporal = temporal;
        }
        if let Some(inverted) = doc.inverted {
            self.inverted = inverted;
        }
        if let Some(low) = doc.low {
            self.range_low = low.0;
            self.duration_low = low.1;
            self.hour_low = low.2;
            self.minute_low = low.3;
        }
        if let Some(high) = doc.high {
            self.range_high = high.0;
            self.duration_high = high.1;
            self.hour_high = high.2;
            self.minute_high = high.3;
        }
        if let (Some((primary, _)), Some(secondary)) = (&doc.kind, secondary) {
            self.primary_key.clone_from(primary);
            self.secondary_mode = secondary;
        }
        Ok(())
    }

    /// Full document with every key present.
    pub fn to_document(&self) -> ConfigDocument {
        ConfigDocument {
            enabled: Some(self.enabled),
            temporal: Some(self.temporal),
            inverted: Some(self.inverted),
            low: Some(Bounds(
                self.range_low,
                self.duration_low,
                self.hour_low,
                self.minute_low,
            )),
            high: Some(Bounds(
                self.range_high,
                self.duration_high,
                self.hour_high,
                self.minute_high,
            )),
            kind: Some((
                self.primary_key.clone(),
                self.secondary_mode.as_str().to_owned(),
            )),
        }
    }

    /// Dump the configuration to the log, one field per line.
    pub fn log_summary(&self, id: &str) {
        info!("Actuator '{}' configuration:", id);
        info!("  Enabled        = {}", self.enabled);
        info!("  Temporal       = {}", self.temporal);
        info!("  Inverted       = {}", self.inverted);
        info!("  Primary key    = {:?}", self.primary_key);
        info!("  Secondary mode = {}", self.secondary_mode);
        info!("  Range low      = {}", self.range_low);
        info!("  Duration low   = {} ms", self.duration_low);
        info!("  Hour low       = {}", self.hour_low);
        info!("  Minute low     = {}", self.minute_low);
        info!("  Range high     = {}", self.range_high);
        info!("  Duration high  = {} ms", self.duration_high);
        info!("  Hour high      = {}", self.hour_high);
        info!("  Minute high    = {}", self.minute_high);
    }
}

/// One `low` or `high` tuple: `[range, duration_ms, hour, minute]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds(pub f32, pub u64, pub u8, pub u8);

/// Persisted configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(
        default,
        alias = "actif",
        deserialize_with = "flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub temporal: Option<bool>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Bounds>,
    /// `[primary_key, secondary_mode]`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<(String, String)>,
}

impl ConfigDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ConfigError> {
        serde_json::to_vec(self).map_err(|_| ConfigError::IoError)
    }

    /// Range-check every present key. Returns the parsed secondary mode
    /// when `type` is present.
    pub fn validate(&self) -> Result<Option<SecondaryMode>, ConfigError> {
        for bounds in [self.low, self.high].into_iter().flatten() {
            if !bounds.0.is_finite() {
                return Err(ConfigError::ValidationFailed("range must be finite"));
            }
            if bounds.2 > 23 {
                return Err(ConfigError::ValidationFailed("hour must be 0–23"));
            }
            if bounds.3 > 59 {
                return Err(ConfigError::ValidationFailed("minute must be 0–59"));
            }
        }
        self.kind
            .as_ref()
            .map(|(_, secondary)| secondary.parse::<SecondaryMode>())
            .transpose()
    }
}

/// Accept `true`/`false` as well as the legacy `1`/`0` encoding.
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Int(i)) => Some(i != 0),
        None => None,
    })
}
