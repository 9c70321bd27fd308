use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use spot_report::{
    InboundMessage, FIELD_ESN, FIELD_LATITUDE, FIELD_LONGITUDE, FIELD_MESSAGE_TYPE,
    FIELD_TIMESTAMP,
};

use crate::error::DomainResult;
use crate::position::{Position, KEY_EVENT};
use crate::registry::DeviceSessionRegistry;
use crate::response::{ResponseStatus, ResponseWriter};
use crate::session::ConnectionContext;

pub const PROTOCOL_NAME: &str = "spot";

/// Decoder for one inbound SPOT report.
///
/// Flow:
/// 1. Detect the message format and parse the report document
/// 2. Resolve device identity through the session registry
/// 3. Build the position record (timestamp defaulting, coordinate coercion,
///    validity derivation, event label)
/// 4. Acknowledge over the transport
///
/// Each call is stateless with respect to prior calls; collaborators are
/// shared behind `Arc`, so concurrent decodes are safe.
pub struct ReportDecoderService {
    registry: Arc<dyn DeviceSessionRegistry>,
    responder: Arc<dyn ResponseWriter>,
}

impl ReportDecoderService {
    pub fn new(registry: Arc<dyn DeviceSessionRegistry>, responder: Arc<dyn ResponseWriter>) -> Self {
        Self { registry, responder }
    }

    /// Decode one inbound message into a position record.
    ///
    /// `Ok(Some(position))` is a successful decode, acknowledged with
    /// [`ResponseStatus::Ok`]. `Ok(None)` is a rejected message (unsupported
    /// shape, missing or unresolvable device identifier), acknowledged with
    /// [`ResponseStatus::BadRequest`]. A present-but-malformed timestamp or
    /// coordinate is a hard error: it propagates and no acknowledgement is
    /// sent by this decoder; the transport layer decides how to answer.
    pub async fn decode(
        &self,
        connection: &ConnectionContext,
        message: InboundMessage,
    ) -> DomainResult<Option<Position>> {
        // 1. Format detection and parse
        let report = match message.into_report() {
            Ok(report) => report,
            Err(error) => {
                warn!(remote_addr = %connection.remote_addr, %error, "Rejecting unreadable message");
                self.reject(connection).await?;
                return Ok(None);
            }
        };

        // 2. Device identity
        let Some(identifier) = report.string(FIELD_ESN) else {
            warn!(remote_addr = %connection.remote_addr, "No esn provided");
            self.reject(connection).await?;
            return Ok(None);
        };

        let Some(session) = self.registry.resolve(identifier, connection).await? else {
            warn!(esn = %identifier, remote_addr = %connection.remote_addr, "Unresolvable device");
            self.reject(connection).await?;
            return Ok(None);
        };

        debug!(esn = %identifier, device_id = session.device_id, "Resolved device session");

        let mut position = Position::new(PROTOCOL_NAME, session.device_id);

        // 3. Report time, defaulting to the wall clock at decode time
        position.device_time = match report.timestamp(FIELD_TIMESTAMP)? {
            Some(time) => time,
            None => Utc::now(),
        };

        // 4. Coordinates, defaulting to 0.0
        if let Some(latitude) = report.double(FIELD_LATITUDE)? {
            position.latitude = latitude;
        }
        if let Some(longitude) = report.double(FIELD_LONGITUDE)? {
            position.longitude = longitude;
        }

        // 5. Validity heuristic: both coordinates non-zero. A genuine fix at
        // (0, 0) is misclassified as invalid; downstream consumers depend on
        // this behavior, so it stays as-is.
        position.valid = position.latitude != 0.0 && position.longitude != 0.0;

        // 6. Event label
        if let Some(event) = report.string(FIELD_MESSAGE_TYPE) {
            position.set(KEY_EVENT, event);
        }

        // 7. Acknowledge and hand the record to the caller
        self.responder
            .send_response(connection, ResponseStatus::Ok)
            .await?;

        info!(
            esn = %identifier,
            device_id = position.device_id,
            valid = position.valid,
            "Decoded position report"
        );

        Ok(Some(position))
    }

    async fn reject(&self, connection: &ConnectionContext) -> DomainResult<()> {
        self.responder
            .send_response(connection, ResponseStatus::BadRequest)
            .await
    }
}
