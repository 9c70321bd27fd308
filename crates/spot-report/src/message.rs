use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::document::ReportDocument;
use crate::error::{ReportError, Result};

/// One framed inbound message as handed over by the transport layer.
///
/// The transport either forwards the request body verbatim as text or, when
/// an upstream stage has already parsed it, as a JSON value. The two shapes
/// are kept explicit so format detection is a matter of matching rather than
/// runtime type inspection.
#[derive(Debug, Clone)]
pub enum InboundMessage {
    Text(String),
    Document(Value),
}

impl InboundMessage {
    /// Resolve this message into a report document.
    ///
    /// Text starting with `{` is parsed as JSON directly. Any other text is
    /// treated as a form-urlencoded body whose first parameter name carries
    /// the report: everything before the first `=` is form-decoded and the
    /// result parsed as JSON. (The SPOT feed posts the JSON blob as the name
    /// of a single form field.)
    pub fn into_report(self) -> Result<ReportDocument> {
        match self {
            InboundMessage::Text(content) => {
                let json = if content.starts_with('{') {
                    content
                } else {
                    let first = content.split('=').next().unwrap_or_default();
                    form_decode(first)?
                };
                let value: Value = serde_json::from_str(&json)?;
                into_object(value)
            }
            InboundMessage::Document(value) => into_object(value),
        }
    }
}

fn into_object(value: Value) -> Result<ReportDocument> {
    match value {
        Value::Object(fields) => Ok(ReportDocument::new(fields)),
        other => Err(ReportError::UnsupportedShape(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `application/x-www-form-urlencoded` decoding: `+` is a space and `%XX` is
/// a percent-encoded byte.
fn form_decode(segment: &str) -> Result<String> {
    let spaced = segment.replace('+', " ");
    let decoded = percent_decode_str(&spaced).decode_utf8().map_err(|_| {
        ReportError::UnsupportedShape("form parameter is not valid UTF-8".to_string())
    })?;
    Ok(decoded.into_owned())
}
