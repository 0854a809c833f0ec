//! # Market Replay
//!
//! Deterministic, event-sourced market replay engine: a pure reducer folds
//! an ordered stream of market events into a materialized [`MarketState`]
//! snapshot, used identically for incremental live updates and for full
//! replay-from-scratch reconstruction at any seek index.
//!
//! ## Entry point
//!
//! Use [`Session`] as the single entry point: create with [`Session::new`],
//! then drive it with [`Session::live_tick`], [`Session::seek`], and the
//! replay controls. [`reduce`] and [`seek`] are also usable directly when
//! you manage the history yourself.
//!
//! ## Example
//!
//! ```rust
//! use market_replay::{seek, Generator, GeneratorConfig};
//!
//! let mut generator = Generator::new(GeneratorConfig { seed: 7, ..Default::default() });
//! let history = generator.history(25);
//! let state = seek(&history, history.len() - 1);
//! assert_eq!(state.active_orders.len(), 25);
//! assert_eq!(state.timestamp, history.last().unwrap().timestamp);
//! ```

pub mod analytics;
pub mod api;
pub mod audit;
pub mod book;
pub mod events;
pub mod generator;
pub mod reducer;
pub mod replay;
pub mod session;
pub mod types;

pub use analytics::FlowStats;
pub use audit::{AuditEvent, AuditSink, InMemoryAuditSink, StdoutAuditSink};
pub use events::{EventPayload, MarketEvent};
pub use generator::{Generator, GeneratorConfig};
pub use reducer::reduce;
pub use replay::{seek, ReplayCursor};
pub use session::Session;
pub use types::{
    Level, MarketState, Mode, Order, OrderId, OrderStatus, Side, Trade, TradeId,
};
