//! Market event stream definitions.
//!
//! [`MarketEvent`] is one entry in the append-only history log. The payload
//! is a tagged sum type, one variant per event kind, so the reducer can
//! match exhaustively instead of probing an untyped bag. Wire format is
//! `{"type": "ORDER_ADDED", "timestamp": ..., "data": {...}}`.

use rust_decimal::Decimal;

use crate::types::{OrderId, Side, TradeId};

/// One market event. Events are immutable once created; the history log is
/// an append-only sequence ordered by timestamp (ties keep insertion order).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarketEvent {
    pub timestamp: u64,
    #[serde(flatten)]
    pub payload: EventPayload,
}

/// Event-specific payloads.
///
/// `TradeExecuted` and `BookSnapshot` are declared by the upstream feed
/// schema but never emitted by the generator; the reducer treats them as
/// timestamp-only no-ops.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EventPayload {
    /// A new limit order entered the book.
    #[serde(rename = "ORDER_ADDED", rename_all = "camelCase")]
    OrderAdded {
        id: OrderId,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    },

    /// A resting order was withdrawn.
    #[serde(rename = "ORDER_CANCELLED", rename_all = "camelCase")]
    OrderCancelled { order_id: OrderId },

    /// An execution against the book. `side` is the aggressor side; the
    /// fill consumes the opposite side from the best level down.
    #[serde(rename = "ORDER_MATCHED", rename_all = "camelCase")]
    OrderMatched {
        price: Decimal,
        quantity: Decimal,
        side: Side,
        trade_id: TradeId,
    },

    #[serde(rename = "TRADE_EXECUTED")]
    TradeExecuted,

    #[serde(rename = "BOOK_SNAPSHOT")]
    BookSnapshot,
}

impl MarketEvent {
    /// Event type as a string label for logging.
    pub fn label(&self) -> &'static str {
        match self.payload {
            EventPayload::OrderAdded { .. } => "ORDER_ADDED",
            EventPayload::OrderCancelled { .. } => "ORDER_CANCELLED",
            EventPayload::OrderMatched { .. } => "ORDER_MATCHED",
            EventPayload::TradeExecuted => "TRADE_EXECUTED",
            EventPayload::BookSnapshot => "BOOK_SNAPSHOT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_added_wire_format() {
        let event = MarketEvent {
            timestamp: 1_700_000_000_123,
            payload: EventPayload::OrderAdded {
                id: OrderId(1),
                side: Side::Buy,
                price: Decimal::from(44_997),
                quantity: Decimal::from(3),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ORDER_ADDED");
        assert_eq!(json["timestamp"], 1_700_000_000_123u64);
        assert_eq!(json["data"]["side"], "BUY");
        assert_eq!(json["data"]["quantity"], "3");
    }

    #[test]
    fn cancel_payload_uses_order_id_key() {
        let event = MarketEvent {
            timestamp: 5,
            payload: EventPayload::OrderCancelled { order_id: OrderId(9) },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ORDER_CANCELLED");
        assert_eq!(json["data"]["orderId"], 9);
    }

    #[test]
    fn serialization_round_trip() {
        let event = MarketEvent {
            timestamp: 42,
            payload: EventPayload::OrderMatched {
                price: Decimal::from(45_010),
                quantity: Decimal::from(3),
                side: Side::Buy,
                trade_id: TradeId(1),
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn label_matches_tag() {
        let event = MarketEvent {
            timestamp: 1,
            payload: EventPayload::BookSnapshot,
        };
        assert_eq!(event.label(), "BOOK_SNAPSHOT");
    }
}
