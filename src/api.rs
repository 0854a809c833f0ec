//! HTTP/WebSocket control surface for a market session.
//!
//! Used by the binary and by integration tests. Create shared state with
//! [`AppState::new`], the router with [`create_router`], and the two timer
//! drivers with [`spawn_live_driver`] / [`spawn_autoplay_driver`].
//! Uses Extension for state so the router is `Router<()>` and works with
//! `into_make_service()`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::ws::{Message, WebSocket},
    extract::{Extension, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::analytics::FlowStats;
use crate::audit::{AuditEvent, AuditSink, StdoutAuditSink};
use crate::book;
use crate::session::Session;
use crate::types::{MarketState, Mode};

/// Live feed cadence: one synthetic event per second.
pub const LIVE_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Replay auto-play cadence: one event every half second.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(500);

/// WebSocket snapshot cadence.
pub const SNAPSHOT_INTERVAL: Duration = Duration::from_millis(500);

/// Book levels included in the WebSocket depth view.
const DEPTH_ROWS: usize = 15;

/// Shared app state: one session per process.
#[derive(Clone)]
pub struct AppState {
    pub(crate) session: Arc<Mutex<Session>>,
    pub(crate) audit: Arc<dyn AuditSink>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self::with_audit(session, Arc::new(StdoutAuditSink))
    }

    pub fn with_audit(session: Session, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            audit,
        }
    }
}

/// Builds the router with state. Returns `Router<()>` so you can call
/// `.into_make_service()` for `axum::serve`.
pub fn create_router(state: AppState) -> Router<()> {
    Router::new()
        .route("/health", get(health))
        .route("/state", get(market_state))
        .route("/history", get(history))
        .route("/analytics", get(analytics))
        .route("/mode", post(set_mode))
        .route("/connected", post(set_connected))
        .route("/replay/seek", post(replay_seek))
        .route("/replay/play", post(replay_play))
        .route("/replay/pause", post(replay_pause))
        .route("/replay/step-forward", post(replay_step_forward))
        .route("/replay/step-back", post(replay_step_back))
        .route("/ws/market-data", get(ws_market_data))
        .layer(Extension(state))
}

/// Spawns the live ticker. The session gates internally on mode and
/// connectivity, so the driver itself never has to coordinate with the
/// autoplay driver. Abort the handle to tear the timer down.
pub fn spawn_live_driver(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIVE_TICK_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            state.session.lock().expect("lock").live_tick();
        }
    })
}

/// Spawns the replay auto-play ticker. No-op outside replay mode or while
/// paused. Abort the handle to tear the timer down.
pub fn spawn_autoplay_driver(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(AUTOPLAY_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            state.session.lock().expect("lock").replay_tick();
        }
    })
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn market_state(Extension(state): Extension<AppState>) -> Response {
    let guard = state.session.lock().expect("lock");
    (StatusCode::OK, Json(guard.state().clone())).into_response()
}

async fn history(Extension(state): Extension<AppState>) -> Response {
    let guard = state.session.lock().expect("lock");
    (StatusCode::OK, Json(guard.history().to_vec())).into_response()
}

async fn analytics(Extension(state): Extension<AppState>) -> Response {
    let stats = {
        let guard = state.session.lock().expect("lock");
        FlowStats::from_history(guard.history())
    };
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Out {
        #[serde(flatten)]
        stats: FlowStats,
        cancellation_ratio: f64,
        execution_rate: f64,
    }
    (
        StatusCode::OK,
        Json(Out {
            stats,
            cancellation_ratio: stats.cancellation_ratio(),
            execution_rate: stats.execution_rate(),
        }),
    )
        .into_response()
}

#[derive(serde::Deserialize)]
struct ModeRequest {
    mode: Mode,
}

async fn set_mode(
    Extension(state): Extension<AppState>,
    Json(body): Json<ModeRequest>,
) -> Response {
    state.session.lock().expect("lock").set_mode(body.mode);
    state.audit.emit(&AuditEvent::now(
        "mode_change",
        Some(serde_json::json!({ "mode": body.mode })),
        "applied",
    ));
    (StatusCode::OK, Json(serde_json::json!({ "mode": body.mode }))).into_response()
}

#[derive(serde::Deserialize)]
struct ConnectedRequest {
    connected: bool,
}

async fn set_connected(
    Extension(state): Extension<AppState>,
    Json(body): Json<ConnectedRequest>,
) -> Response {
    state
        .session
        .lock()
        .expect("lock")
        .set_connected(body.connected);
    state.audit.emit(&AuditEvent::now(
        "connected_change",
        Some(serde_json::json!({ "connected": body.connected })),
        "applied",
    ));
    (
        StatusCode::OK,
        Json(serde_json::json!({ "connected": body.connected })),
    )
        .into_response()
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CursorResponse {
    index: usize,
    state: MarketState,
}

#[derive(serde::Deserialize)]
struct SeekRequest {
    index: usize,
}

async fn replay_seek(
    Extension(state): Extension<AppState>,
    Json(body): Json<SeekRequest>,
) -> Response {
    let mut guard = state.session.lock().expect("lock");
    let index = guard.seek(body.index);
    let outcome = if index == body.index { "applied" } else { "clamped" };
    state.audit.emit(&AuditEvent::now(
        "replay_seek",
        Some(serde_json::json!({ "requested": body.index, "index": index })),
        outcome,
    ));
    (
        StatusCode::OK,
        Json(CursorResponse {
            index,
            state: guard.state().clone(),
        }),
    )
        .into_response()
}

async fn replay_play(Extension(state): Extension<AppState>) -> Response {
    state.session.lock().expect("lock").play();
    state
        .audit
        .emit(&AuditEvent::now("replay_play", None, "applied"));
    (StatusCode::OK, Json(serde_json::json!({ "playing": true }))).into_response()
}

async fn replay_pause(Extension(state): Extension<AppState>) -> Response {
    state.session.lock().expect("lock").pause();
    state
        .audit
        .emit(&AuditEvent::now("replay_pause", None, "applied"));
    (StatusCode::OK, Json(serde_json::json!({ "playing": false }))).into_response()
}

async fn replay_step_forward(Extension(state): Extension<AppState>) -> Response {
    let mut guard = state.session.lock().expect("lock");
    let index = guard.step_forward();
    state.audit.emit(&AuditEvent::now(
        "replay_step",
        Some(serde_json::json!({ "direction": "forward", "index": index })),
        "applied",
    ));
    (
        StatusCode::OK,
        Json(CursorResponse {
            index,
            state: guard.state().clone(),
        }),
    )
        .into_response()
}

async fn replay_step_back(Extension(state): Extension<AppState>) -> Response {
    let mut guard = state.session.lock().expect("lock");
    let index = guard.step_back();
    state.audit.emit(&AuditEvent::now(
        "replay_step",
        Some(serde_json::json!({ "direction": "back", "index": index })),
        "applied",
    ));
    (
        StatusCode::OK,
        Json(CursorResponse {
            index,
            state: guard.state().clone(),
        }),
    )
        .into_response()
}

async fn ws_market_data(
    Extension(state): Extension<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| stream_snapshots(socket, state))
}

/// Sends a snapshot on connect, then one per [`SNAPSHOT_INTERVAL`] until
/// the client goes away.
async fn stream_snapshots(mut socket: WebSocket, state: AppState) {
    let mut interval = tokio::time::interval(SNAPSHOT_INTERVAL);
    loop {
        interval.tick().await;
        let message = {
            let guard = state.session.lock().expect("lock");
            snapshot_message(&guard)
        };
        if socket.send(Message::Text(message)).await.is_err() {
            break;
        }
    }
}

fn snapshot_message(session: &Session) -> String {
    let market = session.state();
    serde_json::json!({
        "type": "snapshot",
        "mode": session.mode(),
        "connected": session.connected(),
        "replayIndex": session.replay_index(),
        "playing": session.is_playing(),
        "bestBid": book::best(&market.bids).map(|l| l.price),
        "bestAsk": book::best(&market.asks).map(|l| l.price),
        "spread": book::spread(&market.bids, &market.asks),
        "bidDepth": book::depth(&market.bids, DEPTH_ROWS),
        "askDepth": book::depth(&market.asks, DEPTH_ROWS),
        "state": market,
    })
    .to_string()
}
