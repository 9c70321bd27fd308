pub mod document;
mod error;
pub mod message;

pub use document::{
    ReportDocument, FIELD_ESN, FIELD_LATITUDE, FIELD_LONGITUDE, FIELD_MESSAGE_TYPE,
    FIELD_TIMESTAMP,
};
pub use error::{ReportError, Result};
pub use message::InboundMessage;
