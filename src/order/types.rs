//! Value types describing order intents and the responses reported for them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price sentinel for a market order. Interpreted by the matching layer, not here.
pub const MARKET_PRICE: i64 = 0;

/// Counter-party value used when a response has no other side (e.g. a cancel)
pub const NO_COUNTER_PARTY: u32 = 0;

/// The intent carried by an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    /// Buy up to `amount` units at or below `price`
    Buy,
    /// Sell up to `amount` units at or above `price`
    Sell,
    /// Cancel the resting order with the same guid
    Delete,
}

impl OrderKind {
    /// Numeric code of this kind on the trading wire
    pub fn code(self) -> i32 {
        match self {
            OrderKind::Buy => 1,
            OrderKind::Sell => -1,
            OrderKind::Delete => 2,
        }
    }

    /// Decodes a wire code, returning `None` for unknown codes
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OrderKind::Buy),
            -1 => Some(OrderKind::Sell),
            2 => Some(OrderKind::Delete),
            _ => None,
        }
    }

    /// Returns true for kinds that rest in a price index (BUY and SELL)
    pub fn is_trade(self) -> bool {
        matches!(self, OrderKind::Buy | OrderKind::Sell)
    }

    /// The side a BUY or SELL matches against. DELETE maps to itself.
    pub fn opposite(self) -> Self {
        match self {
            OrderKind::Buy => OrderKind::Sell,
            OrderKind::Sell => OrderKind::Buy,
            OrderKind::Delete => OrderKind::Delete,
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Buy => write!(f, "BUY"),
            OrderKind::Sell => write!(f, "SELL"),
            OrderKind::Delete => write!(f, "DELETE"),
        }
    }
}

/// Outcome categories reported back to traders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseKind {
    /// A trade was executed
    Execute,
    /// A resting order was cancelled
    Cancel,
    /// The order was completely filled
    Full,
    /// The order was partially filled
    Partial,
    /// Informational response that does not change order state
    Transparent,
}

impl ResponseKind {
    /// Numeric code of this kind on the trading wire.
    ///
    /// `Execute` and `Full` share code 3 on the wire.
    pub fn code(self) -> i32 {
        match self {
            ResponseKind::Execute => 3,
            ResponseKind::Cancel => 2,
            ResponseKind::Full => 3,
            ResponseKind::Partial => 4,
            ResponseKind::Transparent => 5,
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKind::Execute => write!(f, "EXECUTE"),
            ResponseKind::Cancel => write!(f, "CANCEL"),
            ResponseKind::Full => write!(f, "FULL"),
            ResponseKind::Partial => write!(f, "PARTIAL"),
            ResponseKind::Transparent => write!(f, "TRANSPARENT"),
        }
    }
}

/// Price and amount of an order, for readable constructors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostData {
    /// The highest/lowest acceptable price for a buy/sell
    pub price: i64,
    /// The number of units desired to buy/sell
    pub amount: u32,
}

impl CostData {
    pub fn new(price: i64, amount: u32) -> Self {
        Self { price, amount }
    }
}

/// Identity of an order, for readable constructors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeData {
    /// Identifies the submitting trader
    pub trader_id: u32,
    /// Identifies this trade to the submitting trader
    pub trade_id: u32,
    /// Identifies the stock for trade
    pub stock_id: u32,
}

impl TradeData {
    pub fn new(trader_id: u32, trade_id: u32, stock_id: u32) -> Self {
        Self {
            trader_id,
            trade_id,
            stock_id,
        }
    }
}

/// A fill or cancel report populated by the matching layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// What happened to the order
    pub kind: ResponseKind,
    /// The actual trade price, negative if a purchase was made
    pub price: i64,
    /// The number of units actually bought or sold
    pub amount: u32,
    /// Links this response back to a previously submitted order
    pub trade_id: u32,
    /// The trader id of the other half of this trade
    pub counter_party: u32,
}

impl Response {
    pub fn new(
        kind: ResponseKind,
        price: i64,
        amount: u32,
        trade_id: u32,
        counter_party: u32,
    ) -> Self {
        Self {
            kind,
            price,
            amount,
            trade_id,
            counter_party,
        }
    }

    /// A cancel confirmation for `trade_id`, which has no counter party
    pub fn cancelled(trade_id: u32, amount: u32) -> Self {
        Self {
            kind: ResponseKind::Cancel,
            price: 0,
            amount,
            trade_id,
            counter_party: NO_COUNTER_PARTY,
        }
    }
}
