//! WebSocket market-data integration tests. Connect to /ws/market-data and
//! assert the snapshot stream.

use std::net::SocketAddr;

use futures_util::StreamExt;
use market_replay::api::{self, AppState};
use market_replay::{Generator, GeneratorConfig, Session};

async fn spawn_app(seed_events: usize) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let generator = Generator::new(GeneratorConfig {
        seed: 42,
        ..Default::default()
    });
    let state = AppState::new(Session::new(generator, seed_events));
    let app = api::create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    addr
}

#[derive(serde::Deserialize)]
struct Snapshot {
    #[serde(rename = "type")]
    msg_type: String,
    mode: String,
    connected: bool,
    #[serde(rename = "bestBid")]
    best_bid: Option<rust_decimal::Decimal>,
    #[serde(rename = "bestAsk")]
    best_ask: Option<rust_decimal::Decimal>,
}

#[tokio::test]
async fn ws_sends_snapshot_on_connect() {
    let addr = spawn_app(20).await;
    let url = format!("ws://{}/ws/market-data", addr);
    let (mut ws, _) = tokio_tungstenite::connect_async(&url)
        .await
        .expect("connect");
    let raw = ws.next().await.expect("one message").expect("ws recv");
    let msg = raw.into_text().expect("text frame");
    let snapshot: Snapshot = serde_json::from_str(&msg).expect("json");
    assert_eq!(snapshot.msg_type, "snapshot");
    assert_eq!(snapshot.mode, "LIVE");
    assert!(snapshot.connected);
    // No live tick has run: the visible book starts empty.
    assert!(snapshot.best_bid.is_none());
    assert!(snapshot.best_ask.is_none());
}

#[tokio::test]
async fn ws_streams_periodic_snapshots() {
    let addr = spawn_app(0).await;
    let url = format!("ws://{}/ws/market-data", addr);
    let (mut ws, _) = tokio_tungstenite::connect_async(&url)
        .await
        .expect("connect");
    for _ in 0..2 {
        let raw = tokio::time::timeout(std::time::Duration::from_secs(2), ws.next())
            .await
            .expect("snapshot within interval")
            .expect("stream open")
            .expect("ws recv");
        let msg = raw.into_text().expect("text frame");
        let snapshot: Snapshot = serde_json::from_str(&msg).expect("json");
        assert_eq!(snapshot.msg_type, "snapshot");
    }
}

#[tokio::test]
async fn ws_snapshot_reflects_replay_seek() {
    let addr = spawn_app(15).await;
    let client = reqwest::Client::new();
    let seek_url = format!("http://{}/replay/seek", addr);
    let _ = client
        .post(&seek_url)
        .json(&serde_json::json!({ "index": 14 }))
        .send()
        .await
        .unwrap();

    let url = format!("ws://{}/ws/market-data", addr);
    let (mut ws, _) = tokio_tungstenite::connect_async(&url)
        .await
        .expect("connect");
    let raw = ws.next().await.expect("one message").expect("ws recv");
    let msg = raw.into_text().expect("text frame");
    let json: serde_json::Value = serde_json::from_str(&msg).expect("json");
    assert_eq!(json["replayIndex"], 14);
    assert_eq!(
        json["state"]["activeOrders"].as_array().unwrap().len(),
        15,
        "all seeded orders applied at the final index"
    );
    assert!(!json["bestBid"].is_null() || !json["bestAsk"].is_null());
}
