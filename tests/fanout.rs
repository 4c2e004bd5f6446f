//! Live viewer fan-out and replay tests.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream,
};
use webhook_relay::RelayConfig;

mod common;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect_viewer(addr: std::net::SocketAddr) -> WsStream {
    let (ws, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    // Give the server a moment to finish registering the viewer.
    tokio::time::sleep(Duration::from_millis(100)).await;
    ws
}

async fn next_text(ws: &mut WsStream) -> String {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return text.to_string();
        }
    }
}

#[tokio::test]
async fn test_capture_is_fanned_out_to_all_viewers() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;

    let mut viewer_a = connect_viewer(addr).await;
    let mut viewer_b = connect_viewer(addr).await;

    let client = reqwest::Client::new();
    client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({"event": "push"}))
        .send()
        .await
        .unwrap();

    let frame_a = next_text(&mut viewer_a).await;
    let frame_b = next_text(&mut viewer_b).await;

    // Byte-identical serialized content for every viewer.
    assert_eq!(frame_a, frame_b);
    let event: Value = serde_json::from_str(&frame_a).unwrap();
    assert_eq!(event["method"], "POST");
    assert_eq!(event["url"], "/webhook");
    assert_eq!(event["body"], json!({"event": "push"}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_events_arrive_in_capture_order() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let mut viewer = connect_viewer(addr).await;

    let client = reqwest::Client::new();
    for i in 0..5 {
        client
            .post(format!("http://{}/webhook?i={}", addr, i))
            .json(&json!({ "i": i }))
            .send()
            .await
            .unwrap();
    }

    for i in 0..5 {
        let event: Value = serde_json::from_str(&next_text(&mut viewer).await).unwrap();
        assert_eq!(event["url"], format!("/webhook?i={}", i));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_new_viewer_gets_history_replay_then_live_events() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;
    let client = reqwest::Client::new();

    for i in 0..2 {
        client
            .post(format!("http://{}/webhook?i={}", addr, i))
            .json(&json!({ "i": i }))
            .send()
            .await
            .unwrap();
    }

    // Replay arrives oldest-first so the client can prepend uniformly.
    let mut viewer = connect_viewer(addr).await;
    let first: Value = serde_json::from_str(&next_text(&mut viewer).await).unwrap();
    let second: Value = serde_json::from_str(&next_text(&mut viewer).await).unwrap();
    assert_eq!(first["url"], "/webhook?i=0");
    assert_eq!(second["url"], "/webhook?i=1");

    client
        .post(format!("http://{}/webhook?i=2", addr))
        .json(&json!({ "i": 2 }))
        .send()
        .await
        .unwrap();
    let live: Value = serde_json::from_str(&next_text(&mut viewer).await).unwrap();
    assert_eq!(live["url"], "/webhook?i=2");

    shutdown.trigger();
}

#[tokio::test]
async fn test_disconnected_viewer_does_not_affect_others() {
    let (addr, shutdown) = common::spawn_relay(RelayConfig::default()).await;

    let mut leaver = connect_viewer(addr).await;
    let mut stayer = connect_viewer(addr).await;

    leaver.send(Message::Close(None)).await.unwrap();
    drop(leaver);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::new();
    client
        .post(format!("http://{}/webhook", addr))
        .json(&json!({"still": "delivered"}))
        .send()
        .await
        .unwrap();

    let event: Value = serde_json::from_str(&next_text(&mut stayer).await).unwrap();
    assert_eq!(event["body"], json!({"still": "delivered"}));

    shutdown.trigger();
}
