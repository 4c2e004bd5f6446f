//! End-to-end capture and operator-control tests.

use serde_json::{json, Value};
use webhook_relay::RelayConfig;

mod common;

#[tokio::test]
async fn test_default_ack_echoes_capture() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({"a": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Datos recibidos");
    assert_eq!(body["data"]["method"], "POST");
    assert_eq!(body["data"]["url"], "/webhook");
    assert_eq!(body["data"]["body"], json!({"a": 1}));
    assert!(body["data"]["timestamp"].is_string());

    shutdown.trigger();
}

#[tokio::test]
async fn test_arbitrary_method_and_subpath_are_captured() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("http://{}/webhook/github/push?ref=main", addr))
        .body("not json at all")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["method"], "PATCH");
    assert_eq!(body["data"]["url"], "/webhook/github/push?ref=main");
    // Unparseable body degrades to the raw string.
    assert_eq!(body["data"]["body"], "not json at all");

    shutdown.trigger();
}

#[tokio::test]
async fn test_plain_text_body_is_kept_raw() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{}/webhook", addr))
        .header("content-type", "text/plain; charset=utf-8")
        .body(r#"{"a":1}"#)
        .send()
        .await
        .unwrap();

    let body: Value = res.json().await.unwrap();
    // Declared plain text, so no JSON parse even though it would succeed.
    assert_eq!(body["data"]["body"], r#"{"a":1}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_text_override_round_trip() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("http://{}/api/response", addr))
        .json(&json!({"kind": "text", "body": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap()["success"], true);

    let res = client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({"ignored": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(res.text().await.unwrap(), "hello");

    // Reset: next capture reverts to the default acknowledgment.
    let res = client
        .delete(format!("http://{}/api/response", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap()["success"], true);

    let res = client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap()["message"], "Datos recibidos");

    shutdown.trigger();
}

#[tokio::test]
async fn test_json_override_round_trip() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("http://{}/api/response", addr))
        .json(&json!({"kind": "json", "body": r#"{"x":5}"#}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({"whatever": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"x": 5}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_override_is_rejected_and_prior_kept() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    client
        .put(format!("http://{}/api/response", addr))
        .json(&json!({"kind": "text", "body": "keep me"}))
        .send()
        .await
        .unwrap();

    let res = client
        .put(format!("http://{}/api/response", addr))
        .json(&json!({"kind": "json", "body": "{not valid"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("invalid override body"));

    // The earlier text override still answers captures.
    let res = client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "keep me");

    shutdown.trigger();
}

#[tokio::test]
async fn test_history_is_bounded_and_newest_first() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    for i in 0..12 {
        client
            .post(format!("http://{}/webhook?i={}", addr, i))
            .json(&json!({ "i": i }))
            .send()
            .await
            .unwrap();
    }

    let history: Vec<Value> = client
        .get(format!("http://{}/api/history", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(history.len(), 10);
    for (offset, entry) in history.iter().enumerate() {
        assert_eq!(entry["url"], format!("/webhook?i={}", 11 - offset));
    }

    let res = client
        .delete(format!("http://{}/api/history", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap()["success"], true);

    let history: Vec<Value> = client
        .get(format!("http://{}/api/history", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(history.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = RelayConfig::default();
    config.security.max_body_size = 64;
    let (addr, shutdown) = common::spawn_relay(config).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{}/webhook", addr))
        .body("x".repeat(1024))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 413);

    shutdown.trigger();
}

#[tokio::test]
async fn test_truncated_body_is_a_client_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;

    // Promise 100 bytes, send a few, then close the write half.
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"POST /webhook HTTP/1.1\r\n\
              Host: relay\r\n\
              Content-Type: application/json\r\n\
              Content-Length: 100\r\n\
              \r\n\
              {\"trunc",
        )
        .await
        .unwrap();
    stream.shutdown().await.unwrap();

    let mut buf = Vec::new();
    let _ = stream.read_to_end(&mut buf).await;
    let response = String::from_utf8_lossy(&buf);
    // A mid-read failure is the client's fault, not an oversized payload.
    assert!(
        response.starts_with("HTTP/1.1 400"),
        "expected 400, got: {}",
        response
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_dashboard_renders_history() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({"marker": "dashboard-entry"}))
        .send()
        .await
        .unwrap();

    let page = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("dashboard-entry"));
    assert!(page.contains("dataContainer"));

    shutdown.trigger();
}
