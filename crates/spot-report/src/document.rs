use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{ReportError, Result};

pub const FIELD_ESN: &str = "esn";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_LATITUDE: &str = "latitude";
pub const FIELD_LONGITUDE: &str = "longitude";
pub const FIELD_MESSAGE_TYPE: &str = "messageType";

/// Parsed key/value structure carried in one inbound device message.
///
/// Transient: parsed and discarded within one decode call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    fields: Map<String, Value>,
}

impl ReportDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Field-presence rule.
    ///
    /// A field counts as present when the key exists and, for string values,
    /// the string is not the literal text `"null"`. Some SPOT firmwares emit
    /// the text `"null"` instead of omitting a key, so that sentinel is
    /// treated as absence for string fields only; a non-string value counts
    /// as present whatever it holds.
    pub fn contains(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(Value::String(text)) => text != "null",
            Some(_) => true,
            None => false,
        }
    }

    /// String view of a field, honoring the presence rule.
    pub fn string(&self, key: &str) -> Option<&str> {
        if !self.contains(key) {
            return None;
        }
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Numeric coercion, honoring the presence rule.
    ///
    /// Numbers are taken directly; strings are parsed as `f64`. A present
    /// but unparsable string is a hard error for the whole decode.
    pub fn double(&self, key: &'static str) -> Result<Option<f64>> {
        if !self.contains(key) {
            return Ok(None);
        }
        match self.fields.get(key) {
            Some(Value::Number(number)) => Ok(number.as_f64()),
            Some(Value::String(text)) => {
                let parsed = text
                    .parse::<f64>()
                    .map_err(|source| ReportError::InvalidNumber {
                        field: key,
                        value: text.clone(),
                        source,
                    })?;
                Ok(Some(parsed))
            }
            _ => Ok(None),
        }
    }

    /// Report time, honoring the presence rule.
    ///
    /// The SPOT feed timestamps reports as `2019-01-01T00:00:00.000Z`. A
    /// present but unparsable value is a hard error for the whole decode.
    pub fn timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let Some(text) = self.string(key) else {
            return Ok(None);
        };
        let parsed =
            DateTime::parse_from_rfc3339(text).map_err(|source| ReportError::InvalidTimestamp {
                value: text.to_string(),
                source,
            })?;
        Ok(Some(parsed.with_timezone(&Utc)))
    }
}
