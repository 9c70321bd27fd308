use std::net::SocketAddr;

/// Registry record linking a reported device identifier to an internal
/// device and its active connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSession {
    pub device_id: i64,
}

/// Originating connection for one inbound message. Passed through opaquely
/// to the session registry and the response writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionContext {
    pub remote_addr: SocketAddr,
}
