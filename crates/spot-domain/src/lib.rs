pub mod decoder_service;
pub mod error;
pub mod position;
pub mod registry;
pub mod response;
pub mod session;

pub use decoder_service::{ReportDecoderService, PROTOCOL_NAME};
pub use error::{DomainError, DomainResult};
pub use position::{Position, KEY_EVENT};
pub use registry::DeviceSessionRegistry;
pub use response::{ResponseStatus, ResponseWriter};
pub use session::{ConnectionContext, DeviceSession};
