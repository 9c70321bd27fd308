use async_trait::async_trait;

use crate::error::DomainResult;
use crate::session::ConnectionContext;

/// Acknowledgement status returned over the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    BadRequest,
}

/// Acknowledgement channel back to the reporting device. The transport
/// layer implements this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseWriter: Send + Sync {
    /// Write one acknowledgement for the originating connection.
    async fn send_response(
        &self,
        connection: &ConnectionContext,
        status: ResponseStatus,
    ) -> DomainResult<()>;
}
