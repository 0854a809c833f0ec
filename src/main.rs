//! HTTP server for the replay engine.
//!
//! Endpoints: session state, event history, analytics, mode/connection
//! toggles, replay controls, and a WebSocket market-data snapshot stream.

use market_replay::api::{self, AppState};
use market_replay::{Generator, GeneratorConfig, Session};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let _ = env_logger::try_init();
    let seed: u64 = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let seed_events: usize = std::env::var("HISTORY_SEED_COUNT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let generator = Generator::new(GeneratorConfig {
        seed,
        ..Default::default()
    });
    let state = AppState::new(Session::new(generator, seed_events));
    let app = api::create_router(state.clone());
    api::spawn_live_driver(state.clone());
    api::spawn_autoplay_driver(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.expect("bind");
    eprintln!("listening on http://{}", addr);
    axum::serve(listener, app.into_make_service())
        .await
        .expect("serve");
}
