use async_trait::async_trait;

use crate::error::DomainResult;
use crate::session::{ConnectionContext, DeviceSession};

/// Registry mapping a reported device identifier to an active session.
/// Infrastructure implements this trait; resolving may update the
/// registry's own connection-tracking state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceSessionRegistry: Send + Sync {
    /// Resolve a reported identifier for the originating connection.
    ///
    /// `None` means the device is unknown or not authorized.
    async fn resolve(
        &self,
        identifier: &str,
        connection: &ConnectionContext,
    ) -> DomainResult<Option<DeviceSession>>;
}
