use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use spot_domain::{
    ConnectionContext, DeviceSession, DeviceSessionRegistry, DomainResult, Position,
    ReportDecoderService, ResponseStatus, ResponseWriter, KEY_EVENT,
};
use spot_report::InboundMessage;

/// In-memory registry mapping reported identifiers to device ids.
struct InMemorySessionRegistry {
    devices: HashMap<String, i64>,
}

impl InMemorySessionRegistry {
    fn with_device(esn: &str, device_id: i64) -> Self {
        let mut devices = HashMap::new();
        devices.insert(esn.to_string(), device_id);
        Self { devices }
    }
}

#[async_trait]
impl DeviceSessionRegistry for InMemorySessionRegistry {
    async fn resolve(
        &self,
        identifier: &str,
        _connection: &ConnectionContext,
    ) -> DomainResult<Option<DeviceSession>> {
        Ok(self
            .devices
            .get(identifier)
            .map(|&device_id| DeviceSession { device_id }))
    }
}

/// Response writer that records every acknowledgement it is asked to send.
#[derive(Default)]
struct RecordingResponseWriter {
    sent: Mutex<Vec<ResponseStatus>>,
}

#[async_trait]
impl ResponseWriter for RecordingResponseWriter {
    async fn send_response(
        &self,
        _connection: &ConnectionContext,
        status: ResponseStatus,
    ) -> DomainResult<()> {
        self.sent.lock().unwrap().push(status);
        Ok(())
    }
}

fn connection() -> ConnectionContext {
    ConnectionContext {
        remote_addr: "198.51.100.7:9000".parse().unwrap(),
    }
}

async fn decode_with(
    registry: InMemorySessionRegistry,
    message: InboundMessage,
) -> (DomainResult<Option<Position>>, Vec<ResponseStatus>) {
    let responder = Arc::new(RecordingResponseWriter::default());
    let service = ReportDecoderService::new(Arc::new(registry), responder.clone());
    let result = service.decode(&connection(), message).await;
    let sent = responder.sent.lock().unwrap().clone();
    (result, sent)
}

#[tokio::test]
async fn full_report_is_decoded_and_acknowledged() {
    let registry = InMemorySessionRegistry::with_device("0-1234567", 42);
    let message = InboundMessage::Text(
        r#"{"esn":"0-1234567","timestamp":"2019-01-01T00:00:00.000Z","latitude":10.5,"longitude":20.5,"messageType":"OK"}"#
            .to_string(),
    );

    let (result, sent) = decode_with(registry, message).await;

    let position = result.unwrap().unwrap();
    assert_eq!(position.device_id, 42);
    assert_eq!(position.latitude, 10.5);
    assert_eq!(position.longitude, 20.5);
    assert!(position.valid);
    assert_eq!(position.attributes.get(KEY_EVENT), Some(&json!("OK")));
    assert_eq!(sent, vec![ResponseStatus::Ok]);
}

#[tokio::test]
async fn unknown_device_is_rejected_with_bad_request() {
    let registry = InMemorySessionRegistry::with_device("0-1234567", 42);
    let message = InboundMessage::Document(json!({"esn": "0-7654321"}));

    let (result, sent) = decode_with(registry, message).await;

    assert!(result.unwrap().is_none());
    assert_eq!(sent, vec![ResponseStatus::BadRequest]);
}

#[tokio::test]
async fn form_wrapped_report_uses_first_parameter_name() {
    let registry = InMemorySessionRegistry::with_device("X", 7);
    let message = InboundMessage::Text("%7B%22esn%22%3A%22X%22%7D=&foo=bar".to_string());

    let (result, sent) = decode_with(registry, message).await;

    let position = result.unwrap().unwrap();
    assert_eq!(position.device_id, 7);
    assert_eq!(sent, vec![ResponseStatus::Ok]);
}

#[tokio::test]
async fn malformed_coordinate_propagates_without_acknowledgement() {
    let registry = InMemorySessionRegistry::with_device("0-1234567", 42);
    let message =
        InboundMessage::Document(json!({"esn": "0-1234567", "longitude": "not-a-number"}));

    let (result, sent) = decode_with(registry, message).await;

    assert!(result.is_err());
    assert!(sent.is_empty());
}

#[tokio::test]
async fn concurrent_decodes_share_collaborators() {
    let mut devices = HashMap::new();
    devices.insert("A".to_string(), 1);
    devices.insert("B".to_string(), 2);
    let registry = InMemorySessionRegistry { devices };

    let responder = Arc::new(RecordingResponseWriter::default());
    let service = Arc::new(ReportDecoderService::new(
        Arc::new(registry),
        responder.clone(),
    ));

    let first = {
        let service = service.clone();
        tokio::spawn(async move {
            let message =
                InboundMessage::Document(json!({"esn": "A", "latitude": 1.0, "longitude": 2.0}));
            service.decode(&connection(), message).await
        })
    };
    let second = {
        let service = service.clone();
        tokio::spawn(async move {
            let message =
                InboundMessage::Document(json!({"esn": "B", "latitude": 3.0, "longitude": 4.0}));
            service.decode(&connection(), message).await
        })
    };

    let first = first.await.unwrap().unwrap().unwrap();
    let second = second.await.unwrap().unwrap().unwrap();

    assert_eq!(first.device_id, 1);
    assert_eq!(second.device_id, 2);
    assert_eq!(responder.sent.lock().unwrap().len(), 2);
}
