//! Loops sender tests.

use std::time::Duration;

use loops_action::providers::LoopsSender;
use loops_action::{
    assemble, ActionSettings, DeliveryError, EmailPayload, LoopsConfig, Recipient, Sender,
    TemplateVariables,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn valid_payload() -> EmailPayload {
    let vars: TemplateVariables = [("name", "Sam"), ("entry_id", "1")].into_iter().collect();
    let settings = ActionSettings::new("tmpl1").subject_line("Hi {{ name }}");
    assemble(&settings, vars, &Recipient::parse("sam@x.com").unwrap())
}

fn config(server: &MockServer) -> LoopsConfig {
    LoopsConfig::new("loops_123456789").base_url(server.uri())
}

fn sender(server: &MockServer) -> LoopsSender {
    LoopsSender::from_config(&config(server))
}

fn success_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true }))
}

// ============================================================================
// Basic Delivery Tests
// ============================================================================

#[tokio::test]
async fn successful_delivery_returns_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactional"))
        .and(header("Authorization", "Bearer loops_123456789"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "transactionalId": "tmpl1",
            "email": "sam@x.com",
            "dataVariables": {
                "name": "Sam",
                "entry_id": "1",
                "subject": "Hi Sam"
            }
        })))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let result = sender(&server).send(&valid_payload()).await;
    assert!(result.is_ok());
    let delivery = result.unwrap();
    assert_eq!(delivery.provider_response, Some(json!({ "success": true })));
    assert_eq!(delivery.message_id, None);
}

#[tokio::test]
async fn non_json_success_body_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactional"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let result = sender(&server).send(&valid_payload()).await.unwrap();
    assert_eq!(result.provider_response, None);
}

#[tokio::test]
async fn empty_template_id_is_still_sent() {
    let server = MockServer::start().await;
    let payload = assemble(
        &ActionSettings::default(),
        TemplateVariables::new(),
        &Recipient::parse("sam@x.com").unwrap(),
    );

    Mock::given(method("POST"))
        .and(path("/transactional"))
        .and(body_json(json!({
            "transactionalId": "",
            "email": "sam@x.com",
            "dataVariables": {}
        })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "message": "transactionalId is required"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = sender(&server).send(&payload).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

// ============================================================================
// Error Response Tests
// ============================================================================

#[tokio::test]
async fn deliver_with_500_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactional"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(1)
        .mount(&server)
        .await;

    let result = sender(&server).send(&valid_payload()).await;
    assert_eq!(
        result.unwrap_err(),
        DeliveryError::RemoteRejected {
            status: 500,
            body: "server error".into()
        }
    );
}

#[tokio::test]
async fn non_200_success_status_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactional"))
        .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
        .expect(1)
        .mount(&server)
        .await;

    let err = sender(&server).send(&valid_payload()).await.unwrap_err();
    assert_eq!(err, DeliveryError::rejected(202, "queued"));
}

#[tokio::test]
async fn deliver_with_401_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactional"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"success":false,"message":"Invalid API key"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = sender(&server).send(&valid_payload()).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Invalid API key"));
}

// ============================================================================
// Transport Tests
// ============================================================================

#[tokio::test]
async fn timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactional"))
        .respond_with(success_response().set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let sender = LoopsSender::from_config(&config(&server).timeout(Duration::from_millis(100)));
    let err = sender.send(&valid_payload()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Nothing listens on port 1.
    let config = LoopsConfig::new("loops_123456789").base_url("http://127.0.0.1:1");
    let sender = LoopsSender::from_config(&config);
    let err = sender.send(&valid_payload()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Transport(_)), "got {:?}", err);
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[tokio::test]
async fn missing_key_never_calls_api() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(success_response())
        .expect(0)
        .mount(&server)
        .await;

    let config = LoopsConfig::default().base_url(server.uri());
    let sender = LoopsSender::from_config(&config);

    assert_eq!(sender.validate_config(), Err(DeliveryError::NotConfigured));
    assert_eq!(
        sender.send(&valid_payload()).await.unwrap_err(),
        DeliveryError::NotConfigured
    );
}

#[tokio::test]
async fn from_config_uses_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/transactional"))
        .and(header("Authorization", "Bearer key_from_config"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let config = LoopsConfig::new("key_from_config").base_url(format!("{}/api/v1", server.uri()));
    let result = LoopsSender::from_config(&config).send(&valid_payload()).await;
    assert!(result.is_ok());
}

// ============================================================================
// Provider Name Test
// ============================================================================

#[test]
fn provider_name_returns_loops() {
    let sender = LoopsSender::new("loops_123456789");
    assert_eq!(sender.provider_name(), "loops");
}
