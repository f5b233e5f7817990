//! Sensor document: the JSON object of readings handed to every engine.
//!
//! Readings arrive keyed by sensor name (`"Temperature"`, `"Humidity"`,
//! ...).  After each tick the service writes every actuator's pin level
//! back under the actuator id, so the same document can be forwarded
//! upstream as the device report.

use serde_json::{Map, Number, Value};

/// Sensor readings plus reported actuator states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorDocument {
    fields: Map<String, Value>,
}

impl SensorDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text.  Anything but an object is rejected.
    pub fn from_json(text: &str) -> Option<Self> {
        match serde_json::from_str(text).ok()? {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Insert or replace a numeric reading.  Non-finite values are stored
    /// as `null`, which reads back as absent.
    pub fn insert_reading(&mut self, key: &str, value: f32) {
        let v = Number::from_f64(f64::from(value)).map_or(Value::Null, Value::Number);
        self.fields.insert(key.to_owned(), v);
    }

    /// Numeric reading at `key`.  Missing, non-numeric and empty keys all
    /// count as absent.
    pub fn reading(&self, key: &str) -> Option<f32> {
        if key.is_empty() {
            return None;
        }
        let value = self.fields.get(key)?.as_f64()? as f32;
        Some(value)
    }

    /// Report an actuator's pin level under its id.
    pub fn set_output(&mut self, id: &str, on: bool) {
        self.fields.insert(id.to_owned(), Value::Bool(on));
    }

    /// Reported pin level for `id`, if any.
    pub fn output(&self, id: &str) -> Option<bool> {
        self.fields.get(id)?.as_bool()
    }

    pub fn remove(&mut self, key: &str) {
        self.fields.remove(key);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize for upstream reporting.
    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}
