//! Synthetic market event source.
//!
//! Deterministic, configurable event stream for the live feed, replay
//! seeds, and tests. Same seed ⇒ same sequence of events. All mutable
//! simulation state (drifting base price, timestamp cursor, id counters)
//! lives in the [`Generator`] context; there is no module-level state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::events::{EventPayload, MarketEvent};
use crate::types::{OrderId, Side, TradeId, REFERENCE_PRICE};

/// Configuration for the synthetic event generator.
/// Same config + seed produces the same stream.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same event stream.
    pub seed: u64,
    /// Price the random walk starts from.
    pub base_price: f64,
    /// Bid/ask spread the walk keeps around the drifting price.
    pub spread: f64,
    /// Order quantities are drawn from `1..=max_quantity`, whole lots.
    pub max_quantity: u64,
    /// Timestamp (ms) of the stream's origin; events advance from here.
    pub start_timestamp: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_price: REFERENCE_PRICE as f64,
            spread: 2.0,
            max_quantity: 10,
            start_timestamp: 1_700_000_000_000,
        }
    }
}

/// Deterministic event stream. Create with [`Generator::new`]; each call
/// advances the internal state (RNG, base price, timestamp, id counters).
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    base_price: f64,
    last_timestamp: u64,
    next_order_id: u64,
    next_trade_id: u64,
}

impl Generator {
    /// Builds a generator with the given config. Same config (including
    /// seed) ⇒ same stream.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let base_price = config.base_price;
        let last_timestamp = config.start_timestamp;
        Self {
            rng,
            config,
            base_price,
            last_timestamp,
            next_order_id: 1,
            next_trade_id: 1,
        }
    }

    /// Generates the next `OrderAdded` event with a random side.
    pub fn order_event(&mut self) -> MarketEvent {
        let side = if self.rng.gen::<f64>() < 0.5 {
            Side::Buy
        } else {
            Side::Sell
        };
        self.order_event_for(side)
    }

    /// Generates the next `OrderAdded` event for the given side.
    ///
    /// The base price drifts by up to ±10 per event; buys price below the
    /// drifted price (floored), sells above it (ceiled), each offset by up
    /// to 5 plus half the spread. Timestamps advance by 100–599 ms.
    pub fn order_event_for(&mut self, side: Side) -> MarketEvent {
        let current = self.base_price + (self.rng.gen::<f64>() * 20.0 - 10.0);
        self.base_price = current;

        let offset = self.rng.gen::<f64>() * 5.0 + self.config.spread / 2.0;
        let price = match side {
            Side::Buy => (current - offset).floor() as i64,
            Side::Sell => (current + offset).ceil() as i64,
        };
        let quantity = self.rng.gen_range(1..=self.config.max_quantity.max(1));
        self.last_timestamp += self.rng.gen_range(100..600);

        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;

        MarketEvent {
            timestamp: self.last_timestamp,
            payload: EventPayload::OrderAdded {
                id,
                side,
                price: Decimal::from(price),
                quantity: Decimal::from(quantity),
            },
        }
    }

    /// Generates an `OrderMatched` event at the given price and quantity.
    /// `side` is the aggressor side.
    pub fn match_event(&mut self, price: Decimal, quantity: Decimal, side: Side) -> MarketEvent {
        self.last_timestamp += 10;
        let trade_id = TradeId(self.next_trade_id);
        self.next_trade_id += 1;
        MarketEvent {
            timestamp: self.last_timestamp,
            payload: EventPayload::OrderMatched {
                price,
                quantity,
                side,
                trade_id,
            },
        }
    }

    /// Generates an `OrderCancelled` event for the given order id.
    pub fn cancel_event(&mut self, order_id: OrderId) -> MarketEvent {
        self.last_timestamp += 50;
        MarketEvent {
            timestamp: self.last_timestamp,
            payload: EventPayload::OrderCancelled { order_id },
        }
    }

    /// Generates a seed history of `count` order events, sorted by
    /// timestamp (ties keep insertion order).
    pub fn history(&mut self, count: usize) -> Vec<MarketEvent> {
        let mut events: Vec<MarketEvent> = (0..count).map(|_| self.order_event()).collect();
        events.sort_by_key(|e| e.timestamp);
        events
    }
}
