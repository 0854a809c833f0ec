//! Price-ladder operations for one side of the book.
//!
//! The book is level-aggregated: each price holds one [`Level`] summing all
//! orders resting there. No intra-level FIFO queue is materialized; time
//! priority within a level is only implied by `order_count`.

use rust_decimal::Decimal;

use crate::types::{Level, Side};

/// One row of the derived depth view: a level plus the running cumulative
/// quantity from the best level outward. Display-only, never stored in
/// [`crate::types::MarketState`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthRow {
    #[serde(flatten)]
    pub level: Level,
    pub cumulative_qty: Decimal,
}

/// Re-sorts a side: bids descending by price (best bid first), asks
/// ascending (best ask first).
pub fn sort_levels(levels: &mut [Level], side: Side) {
    match side {
        Side::Buy => levels.sort_by(|a, b| b.price.cmp(&a.price)),
        Side::Sell => levels.sort_by(|a, b| a.price.cmp(&b.price)),
    }
}

/// Adds order quantity at a price: aggregates into an existing level or
/// inserts a new one, then re-sorts the side unconditionally.
pub fn add_liquidity(levels: &mut Vec<Level>, side: Side, price: Decimal, quantity: Decimal) {
    match levels.iter_mut().find(|l| l.price == price) {
        Some(level) => {
            level.quantity += quantity;
            level.order_count += 1;
        }
        None => levels.push(Level {
            price,
            quantity,
            order_count: 1,
        }),
    }
    sort_levels(levels, side);
}

/// Removes a cancelled order's remaining quantity from the level at its
/// price. Drops the level when its quantity falls to zero or below;
/// otherwise decrements the order count. A missing level is tolerated
/// silently (the book may already have been consumed past it by matches).
/// Removal preserves ordering, so no re-sort is needed.
pub fn cancel_liquidity(levels: &mut Vec<Level>, price: Decimal, quantity: Decimal) {
    let Some(idx) = levels.iter().position(|l| l.price == price) else {
        return;
    };
    let new_qty = levels[idx].quantity - quantity;
    if new_qty <= Decimal::ZERO {
        levels.remove(idx);
    } else {
        levels[idx].quantity = new_qty;
        levels[idx].order_count = levels[idx].order_count.saturating_sub(1);
    }
}

/// Greedily consumes fill quantity from the best level down. Fully consumed
/// levels are removed; the last one is partially reduced. Demand beyond the
/// available liquidity is discarded, not an error.
pub fn consume_from_best(levels: &mut Vec<Level>, quantity: Decimal) {
    let mut remaining = quantity;
    while remaining > Decimal::ZERO && !levels.is_empty() {
        if levels[0].quantity <= remaining {
            remaining -= levels[0].quantity;
            levels.remove(0);
        } else {
            levels[0].quantity -= remaining;
            remaining = Decimal::ZERO;
        }
    }
}

/// Best level of a side (first element; assumes the side is sorted).
pub fn best(levels: &[Level]) -> Option<&Level> {
    levels.first()
}

/// Total resting quantity across a side.
pub fn total_quantity(levels: &[Level]) -> Decimal {
    levels.iter().map(|l| l.quantity).sum()
}

/// Best-ask minus best-bid. `None` while either side is empty.
pub fn spread(bids: &[Level], asks: &[Level]) -> Option<Decimal> {
    match (best(bids), best(asks)) {
        (Some(bid), Some(ask)) => Some(ask.price - bid.price),
        _ => None,
    }
}

/// Top-`count` levels with running cumulative quantity from the best level
/// outward.
pub fn depth(levels: &[Level], count: usize) -> Vec<DepthRow> {
    let mut cumulative = Decimal::ZERO;
    levels
        .iter()
        .take(count)
        .map(|level| {
            cumulative += level.quantity;
            DepthRow {
                level: level.clone(),
                cumulative_qty: cumulative,
            }
        })
        .collect()
}
