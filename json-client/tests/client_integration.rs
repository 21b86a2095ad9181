//! HTTP-level tests for the JSON client against a mock bridge

use json_client::{JsonClient, JsonError};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_get_returns_parsed_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/testkey")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"config":{"name":"Philips hue"}}"#)
        .create_async()
        .await;

    let client = JsonClient::new();
    let value = client
        .get(&server.host_with_port(), "/api/testkey")
        .await
        .expect("GET should succeed");

    assert_eq!(value["config"]["name"], "Philips hue");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_put_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/testkey/lights/1/state")
        .match_body(Matcher::Json(json!({"on": true})))
        .with_status(200)
        .with_body(r#"[{"success":{"/lights/1/state/on":true}}]"#)
        .create_async()
        .await;

    let client = JsonClient::new();
    let value = client
        .put(
            &server.host_with_port(),
            "/api/testkey/lights/1/state",
            &json!({"on": true}),
        )
        .await
        .expect("PUT should succeed");

    assert!(value.is_array());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/testkey/groups")
        .match_body(Matcher::Json(json!({"name": "Bedroom", "lights": ["1", "2"]})))
        .with_status(200)
        .with_body(r#"[{"success":{"id":"1"}}]"#)
        .create_async()
        .await;

    let client = JsonClient::new();
    let value = client
        .post(
            &server.host_with_port(),
            "/api/testkey/groups",
            &json!({"name": "Bedroom", "lights": ["1", "2"]}),
        )
        .await
        .expect("POST should succeed");

    assert_eq!(value[0]["success"]["id"], "1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/testkey")
        .with_status(503)
        .create_async()
        .await;

    let client = JsonClient::new();
    let result = client.get(&server.host_with_port(), "/api/testkey").await;

    match result {
        Err(JsonError::Status(code)) => assert_eq!(code, 503),
        other => panic!("Expected JsonError::Status, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/testkey")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = JsonClient::new();
    let result = client.get(&server.host_with_port(), "/api/testkey").await;

    assert!(matches!(result, Err(JsonError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_host_is_a_network_error() {
    // Port 1 on loopback refuses connections immediately
    let client = JsonClient::new();
    let result = client.get("127.0.0.1:1", "/api/testkey").await;

    assert!(matches!(result, Err(JsonError::Network(_))));
}
