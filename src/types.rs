//! Core types and ids for the replay engine (market data models).
//!
//! All identifiers are newtype wrappers. [`Order`], [`Level`], [`Trade`], and
//! [`MarketState`] define the materialized snapshot the reducer produces.
//! Wire names are camelCase to match the dashboard's JSON.

use rust_decimal::Decimal;

/// Unique order identifier. Ids are issued by a monotonic counter, so two
/// live orders can never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub u64);

/// Trade identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TradeId(pub u64);

/// Order side. On a match event this is the *aggressor* side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side a match consumes liquidity from.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order lifecycle status.
///
/// The reducer only ever assigns `Active` (on add) and `Cancelled` (on
/// cancel). `Filled` and `Partial` are part of the upstream schema but are
/// never reached: matches consume book liquidity, not individual orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Active,
    Filled,
    Partial,
    Cancelled,
}

/// Session mode: live auto-advancing feed or deterministic replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Live,
    Replay,
}

/// A single order as tracked in the lifecycle tables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub original_qty: Decimal,
    pub remaining_qty: Decimal,
    pub timestamp: u64,
    pub status: OrderStatus,
}

/// One price point on one side of the book. At most one level per distinct
/// price per side; `quantity` aggregates all orders resting at that price.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub price: Decimal,
    pub quantity: Decimal,
    pub order_count: u32,
}

/// Immutable execution record, retained most-recent-first.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: TradeId,
    pub timestamp: u64,
    pub price: Decimal,
    pub quantity: Decimal,
    pub aggressor_side: Side,
}

/// Reference price the market drifts around; also the `last_price` of a
/// fresh [`MarketState`] before any trade prints.
pub const REFERENCE_PRICE: i64 = 45_000;

/// Recency window for the trade tape.
pub const RECENT_TRADES_CAP: usize = 50;

/// Recency window for the cancelled-orders table.
pub const RECENT_CANCELS_CAP: usize = 50;

/// Reference price as a [`Decimal`].
pub fn reference_price() -> Decimal {
    Decimal::from(REFERENCE_PRICE)
}

/// The full materialized market snapshot.
///
/// Invariants: `bids` sorted descending by price, `asks` ascending;
/// `trades` and `cancelled_orders` bounded most-recent-first windows;
/// `timestamp` is the timestamp of the most recently applied event.
/// `completed_orders` exists in the schema but stays empty (see
/// [`OrderStatus`]).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketState {
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
    pub trades: Vec<Trade>,
    pub active_orders: Vec<Order>,
    pub completed_orders: Vec<Order>,
    pub cancelled_orders: Vec<Order>,
    pub last_price: Decimal,
    pub timestamp: u64,
}

impl Default for MarketState {
    fn default() -> Self {
        Self {
            bids: Vec::new(),
            asks: Vec::new(),
            trades: Vec::new(),
            active_orders: Vec::new(),
            completed_orders: Vec::new(),
            cancelled_orders: Vec::new(),
            last_price: reference_price(),
            timestamp: 0,
        }
    }
}
