use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Well-known attribute key for the report's event label.
pub const KEY_EVENT: &str = "event";

/// Normalized snapshot of device location, time, validity and event for one
/// report. Created fresh per decode and handed to the pipeline stage after
/// the decoder; nothing is retained across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub protocol: &'static str,
    pub device_id: i64,
    pub device_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Heuristic flag: the coordinates appear to be a real fix. See
    /// [`ReportDecoderService::decode`](crate::ReportDecoderService::decode).
    pub valid: bool,
    /// Open attribute set keyed by well-known strings such as [`KEY_EVENT`].
    pub attributes: Map<String, Value>,
}

impl Position {
    pub fn new(protocol: &'static str, device_id: i64) -> Self {
        Self {
            protocol,
            device_id,
            device_time: Utc::now(),
            latitude: 0.0,
            longitude: 0.0,
            valid: false,
            attributes: Map::new(),
        }
    }

    /// Insert a value into the open attribute set.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }
}
