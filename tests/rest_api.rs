//! REST API integration tests. Spawn the server and call endpoints with reqwest.

use std::net::SocketAddr;
use std::sync::Arc;

use market_replay::api::{self, AppState};
use market_replay::{Generator, GeneratorConfig, InMemoryAuditSink, Session};

async fn spawn_app(seed: u64, seed_events: usize) -> (SocketAddr, InMemoryAuditSink) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let audit = InMemoryAuditSink::new();
    let generator = Generator::new(GeneratorConfig {
        seed,
        ..Default::default()
    });
    let state = AppState::with_audit(Session::new(generator, seed_events), Arc::new(audit.clone()));
    let app = api::create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (addr, audit)
}

#[tokio::test]
async fn health_returns_ok() {
    let (addr, _audit) = spawn_app(1, 0).await;
    let url = format!("http://{}/health", addr);
    let client = reqwest::Client::new();
    let response = client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn fresh_state_is_empty_at_reference_price() {
    let (addr, _audit) = spawn_app(2, 100).await;
    let url = format!("http://{}/state", addr);
    let client = reqwest::Client::new();
    let json: serde_json::Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(json["lastPrice"], "45000");
    assert_eq!(json["bids"].as_array().unwrap().len(), 0);
    assert_eq!(json["activeOrders"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn history_returns_seeded_events_sorted() {
    let (addr, _audit) = spawn_app(3, 40).await;
    let url = format!("http://{}/history", addr);
    let client = reqwest::Client::new();
    let events: Vec<serde_json::Value> =
        client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(events.len(), 40);
    let timestamps: Vec<u64> = events
        .iter()
        .map(|e| e["timestamp"].as_u64().unwrap())
        .collect();
    for pair in timestamps.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert!(events.iter().all(|e| e["type"] == "ORDER_ADDED"));
}

#[tokio::test]
async fn replay_seek_returns_reconstructed_state() {
    let (addr, _audit) = spawn_app(4, 30).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/replay/seek", addr);
    let json: serde_json::Value = client
        .post(&url)
        .json(&serde_json::json!({ "index": 9 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["index"], 9);
    assert_eq!(json["state"]["activeOrders"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn replay_seek_past_end_is_clamped_and_audited() {
    let (addr, audit) = spawn_app(5, 10).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/replay/seek", addr);
    let json: serde_json::Value = client
        .post(&url)
        .json(&serde_json::json!({ "index": 5000 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["index"], 9);
    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, "replay_seek");
    assert_eq!(events[0].outcome, "clamped");
}

#[tokio::test]
async fn replay_seek_is_deterministic_across_calls() {
    let (addr, _audit) = spawn_app(6, 25).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/replay/seek", addr);
    let mut snapshots = Vec::new();
    for index in [20, 3, 20] {
        let json: serde_json::Value = client
            .post(&url)
            .json(&serde_json::json!({ "index": index }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        snapshots.push(json["state"].clone());
    }
    assert_eq!(snapshots[0], snapshots[2], "same index, same state");
    assert_ne!(snapshots[0], snapshots[1]);
}

#[tokio::test]
async fn step_controls_clamp_at_bounds() {
    let (addr, _audit) = spawn_app(7, 3).await;
    let client = reqwest::Client::new();
    let back = format!("http://{}/replay/step-back", addr);
    let forward = format!("http://{}/replay/step-forward", addr);

    let json: serde_json::Value = client.post(&back).send().await.unwrap().json().await.unwrap();
    assert_eq!(json["index"], 0, "step back clamps at zero");

    for expected in [1, 2, 2] {
        let json: serde_json::Value = client
            .post(&forward)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(json["index"], expected);
    }
}

#[tokio::test]
async fn mode_and_connected_roundtrip() {
    let (addr, audit) = spawn_app(8, 0).await;
    let client = reqwest::Client::new();

    let url = format!("http://{}/mode", addr);
    let json: serde_json::Value = client
        .post(&url)
        .json(&serde_json::json!({ "mode": "REPLAY" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["mode"], "REPLAY");

    let url = format!("http://{}/connected", addr);
    let json: serde_json::Value = client
        .post(&url)
        .json(&serde_json::json!({ "connected": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["connected"], false);

    let actions: Vec<String> = audit.events().iter().map(|e| e.action.clone()).collect();
    assert_eq!(actions, vec!["mode_change", "connected_change"]);
}

#[tokio::test]
async fn play_pause_toggle_playing_flag() {
    let (addr, _audit) = spawn_app(9, 5).await;
    let client = reqwest::Client::new();

    let url = format!("http://{}/replay/play", addr);
    let json: serde_json::Value = client.post(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(json["playing"], true);

    let url = format!("http://{}/replay/pause", addr);
    let json: serde_json::Value = client.post(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(json["playing"], false);
}

#[tokio::test]
async fn analytics_reports_seeded_order_flow() {
    let (addr, _audit) = spawn_app(10, 50).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/analytics", addr);
    let json: serde_json::Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(json["totalEvents"], 50);
    assert_eq!(json["ordersAdded"], 50);
    assert_eq!(json["ordersCancelled"], 0);
    assert_eq!(json["ordersMatched"], 0);
    let buys = json["buyOrders"].as_u64().unwrap();
    let sells = json["sellOrders"].as_u64().unwrap();
    assert_eq!(buys + sells, 50);
    assert_eq!(json["executionRate"], 0.0);
}
