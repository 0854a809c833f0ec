//! Event-flow statistics over a recorded history.
//!
//! Feeds the microstructure panel: event-type counts, order-flow
//! imbalance, and cancellation/execution ratios relative to new order flow.

use crate::events::{EventPayload, MarketEvent};
use crate::types::Side;

/// Aggregate counts derived from one pass over the history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStats {
    pub total_events: usize,
    pub orders_added: usize,
    pub orders_cancelled: usize,
    pub orders_matched: usize,
    pub buy_orders: usize,
    pub sell_orders: usize,
}

impl FlowStats {
    pub fn from_history(history: &[MarketEvent]) -> Self {
        let mut stats = FlowStats {
            total_events: history.len(),
            ..Default::default()
        };
        for event in history {
            match &event.payload {
                EventPayload::OrderAdded { side, .. } => {
                    stats.orders_added += 1;
                    match side {
                        Side::Buy => stats.buy_orders += 1,
                        Side::Sell => stats.sell_orders += 1,
                    }
                }
                EventPayload::OrderCancelled { .. } => stats.orders_cancelled += 1,
                EventPayload::OrderMatched { .. } => stats.orders_matched += 1,
                EventPayload::TradeExecuted | EventPayload::BookSnapshot => {}
            }
        }
        stats
    }

    /// Cancellations relative to new order flow, in `[0, 1]`-ish (can
    /// exceed 1 if cancels outnumber adds). Zero when no orders arrived.
    pub fn cancellation_ratio(&self) -> f64 {
        ratio(self.orders_cancelled, self.orders_added)
    }

    /// Matches relative to new order flow. Zero when no orders arrived.
    pub fn execution_rate(&self) -> f64 {
        ratio(self.orders_matched, self.orders_added)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
