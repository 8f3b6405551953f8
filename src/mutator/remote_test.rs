use super::*;
use crate::test_helpers::RecordingTransport;
use serde_json::json;

#[test]
fn request_body_uses_storefront_field_names() {
    let command = MutationCommand::add("p3");
    let body = serde_json::to_string(&UpdateItemRequest::from(&command)).unwrap();
    assert_eq!(body, r#"{"pizzaId":"p3","action":"add"}"#);
}

#[test]
fn acknowledgement_accepts_any_json() {
    assert_eq!(parse_acknowledgement(r#""Item Was Added""#).unwrap(), json!("Item Was Added"));
    assert_eq!(parse_acknowledgement(r#"{"ok":false}"#).unwrap(), json!({ "ok": false }));
    assert_eq!(parse_acknowledgement("null").unwrap(), serde_json::Value::Null);
}

#[test]
fn acknowledgement_rejects_non_json() {
    let err = parse_acknowledgement("<html>Server Error</html>").unwrap_err();
    assert!(matches!(err, CartError::Decode(_)));
}

#[test]
fn http_transport_targets_update_item() {
    let config = CartConfig { base_url: "http://shop.test".into(), ..CartConfig::default() };
    let transport = HttpTransport::new(&config).unwrap();
    assert_eq!(transport.endpoint(), "http://shop.test/update_item/");
}

#[tokio::test]
async fn add_posts_once_with_token() {
    let transport = Arc::new(RecordingTransport::ok());
    let mut remote = RemoteMutator::new(transport.clone(), "csrf-abc");

    let state = remote.apply_mutation(&MutationCommand::add("p3")).await.unwrap();

    assert_eq!(state, CartState::Remote { acknowledgement: json!("Item Was Added") });
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({ "pizzaId": "p3", "action": "add" }));
    assert_eq!(calls[0].csrf_token, "csrf-abc");
}

#[tokio::test]
async fn remove_of_unknown_item_is_left_to_the_server() {
    let transport = Arc::new(RecordingTransport::ok());
    let mut remote = RemoteMutator::new(transport.clone(), "csrf-abc");

    remote.apply_mutation(&MutationCommand::remove("p9")).await.unwrap();

    assert_eq!(transport.calls()[0].body, json!({ "pizzaId": "p9", "action": "remove" }));
}

#[tokio::test]
async fn server_failure_is_surfaced() {
    let transport = Arc::new(RecordingTransport::failing(500));
    let mut remote = RemoteMutator::new(transport.clone(), "csrf-abc");

    let err = remote.apply_mutation(&MutationCommand::add("p3")).await.unwrap_err();

    assert!(matches!(err, CartError::Status { status: 500, .. }));
    assert!(err.retryable());
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn strategy_is_remote() {
    let remote = RemoteMutator::new(Arc::new(RecordingTransport::ok()), "");
    assert_eq!(remote.strategy(), Strategy::Remote);
}
