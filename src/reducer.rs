//! Pure state reduction: fold one [`MarketEvent`] into a [`MarketState`].
//!
//! [`reduce`] is deterministic, side-effect-free, and total over the
//! declared event types. It never mutates its input and never fails: an
//! unknown order id on cancel is dropped silently, a match against an empty
//! opposite side terminates early, and dead event variants pass through as
//! a timestamp-only state copy. The same function serves the incremental
//! live path and the bulk replay fold.

use crate::book;
use crate::events::{EventPayload, MarketEvent};
use crate::types::{
    MarketState, Order, OrderStatus, Side, Trade, RECENT_CANCELS_CAP, RECENT_TRADES_CAP,
};

/// Applies `event` to `state`, returning the next snapshot.
pub fn reduce(state: &MarketState, event: &MarketEvent) -> MarketState {
    let mut next = state.clone();
    next.timestamp = event.timestamp;

    match &event.payload {
        EventPayload::OrderAdded {
            id,
            side,
            price,
            quantity,
        } => {
            next.active_orders.push(Order {
                id: *id,
                side: *side,
                price: *price,
                original_qty: *quantity,
                remaining_qty: *quantity,
                timestamp: event.timestamp,
                status: OrderStatus::Active,
            });
            let levels = match side {
                Side::Buy => &mut next.bids,
                Side::Sell => &mut next.asks,
            };
            book::add_liquidity(levels, *side, *price, *quantity);
        }

        EventPayload::OrderCancelled { order_id } => {
            if let Some(idx) = next.active_orders.iter().position(|o| o.id == *order_id) {
                let mut order = next.active_orders.remove(idx);
                order.status = OrderStatus::Cancelled;
                let levels = match order.side {
                    Side::Buy => &mut next.bids,
                    Side::Sell => &mut next.asks,
                };
                book::cancel_liquidity(levels, order.price, order.remaining_qty);
                next.cancelled_orders.insert(0, order);
                next.cancelled_orders.truncate(RECENT_CANCELS_CAP);
            }
        }

        EventPayload::OrderMatched {
            price,
            quantity,
            side,
            trade_id,
        } => {
            next.last_price = *price;
            next.trades.insert(
                0,
                Trade {
                    id: *trade_id,
                    timestamp: event.timestamp,
                    price: *price,
                    quantity: *quantity,
                    aggressor_side: *side,
                },
            );
            next.trades.truncate(RECENT_TRADES_CAP);
            // The aggressor consumes the opposite side. active_orders is
            // left untouched: matching is book-level, not order-level.
            let levels = match side {
                Side::Buy => &mut next.asks,
                Side::Sell => &mut next.bids,
            };
            book::consume_from_best(levels, *quantity);
        }

        EventPayload::TradeExecuted | EventPayload::BookSnapshot => {}
    }

    next
}
