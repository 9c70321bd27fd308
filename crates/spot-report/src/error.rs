use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed report document: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("unsupported message shape: {0}")]
    UnsupportedShape(String),

    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("invalid numeric value {value:?} for field {field}: {source}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        source: std::num::ParseFloatError,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
