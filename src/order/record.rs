//! The order record with its two embedded index nodes

use super::guid;
use super::types::{CostData, OrderKind, TradeData};
use crate::error::IndexError;
use crate::tree::{IndexKind, Node};
use crate::utils::group_digits;
use std::fmt;

/// One trading intent.
///
/// The price and guid are not stored as plain fields. They are the keys of the
/// `price_node` and `guid_node`, which let the same record be linked into a
/// price-ordered tree and a guid-ordered tree at once.
#[derive(Debug, Clone)]
pub struct Order {
    amount: u32,
    stock_id: u32,
    kind: OrderKind,
    price_node: Node,
    guid_node: Node,
}

impl Order {
    /// Build a BUY order
    pub fn new_buy(cost: CostData, trade: TradeData) -> Result<Self, IndexError> {
        Self::new(cost, trade, OrderKind::Buy)
    }

    /// Build a SELL order
    pub fn new_sell(cost: CostData, trade: TradeData) -> Result<Self, IndexError> {
        Self::new(cost, trade, OrderKind::Sell)
    }

    /// Build a cancellation request. Only its guid is meaningful.
    pub fn new_delete(trade: TradeData) -> Self {
        Self::build(CostData::default(), trade, OrderKind::Delete)
    }

    /// Build an order of any kind.
    ///
    /// BUY and SELL require a non-zero amount. The cost of a DELETE is ignored and
    /// zeroed.
    pub fn new(cost: CostData, trade: TradeData, kind: OrderKind) -> Result<Self, IndexError> {
        match kind {
            OrderKind::Buy | OrderKind::Sell if cost.amount == 0 => {
                Err(IndexError::InvalidAmount { kind })
            }
            OrderKind::Delete => Ok(Self::build(CostData::default(), trade, kind)),
            _ => Ok(Self::build(cost, trade, kind)),
        }
    }

    fn build(cost: CostData, trade: TradeData, kind: OrderKind) -> Self {
        let guid = guid::pack(trade.trader_id, trade.trade_id);
        Self {
            amount: cost.amount,
            stock_id: trade.stock_id,
            kind,
            price_node: Node::new(IndexKind::Price, cost.price),
            guid_node: Node::new(IndexKind::Guid, guid),
        }
    }

    #[inline]
    pub fn price(&self) -> i64 {
        self.price_node.key()
    }

    #[inline]
    pub fn guid(&self) -> i64 {
        self.guid_node.key()
    }

    /// High 32 bits of the guid
    #[inline]
    pub fn trader_id(&self) -> u32 {
        guid::trader_of(self.guid())
    }

    /// Low 32 bits of the guid
    #[inline]
    pub fn trade_id(&self) -> u32 {
        guid::trade_of(self.guid())
    }

    #[inline]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    #[inline]
    pub fn stock_id(&self) -> u32 {
        self.stock_id
    }

    #[inline]
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    /// The embedded node used by trees of `kind`
    #[inline]
    pub fn node(&self, kind: IndexKind) -> &Node {
        match kind {
            IndexKind::Price => &self.price_node,
            IndexKind::Guid => &self.guid_node,
        }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, kind: IndexKind) -> &mut Node {
        match kind {
            IndexKind::Price => &mut self.price_node,
            IndexKind::Guid => &mut self.guid_node,
        }
    }

    /// Whether either embedded node is linked into a tree
    pub fn is_linked(&self) -> bool {
        self.price_node.is_linked() || self.guid_node.is_linked()
    }

    /// The trade identity this order was built from
    pub fn trade_data(&self) -> TradeData {
        TradeData::new(self.trader_id(), self.trade_id(), self.stock_id)
    }

    /// The cost this order was built from
    pub fn cost_data(&self) -> CostData {
        CostData::new(self.price(), self.amount)
    }

    pub(crate) fn reduce_amount(&mut self, amount: u32) -> Result<u32, IndexError> {
        if amount > self.amount {
            return Err(IndexError::InvalidOperation {
                message: format!(
                    "Cannot fill {} units of order {} with {} remaining",
                    amount,
                    self.guid(),
                    self.amount
                ),
            });
        }
        self.amount -= amount;
        Ok(self.amount)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, price {}, amount {}, trader {}, trade {}, stock {}",
            self.kind,
            group_digits(self.price(), ','),
            group_digits(i64::from(self.amount), ','),
            group_digits(i64::from(self.trader_id()), '-'),
            group_digits(i64::from(self.trade_id()), '-'),
            group_digits(i64::from(self.stock_id), '-'),
        )
    }
}

/// Diagnostic rendering that tolerates a missing order
pub fn describe(order: Option<&Order>) -> String {
    match order {
        Some(order) => order.to_string(),
        None => "<nil>".to_string(),
    }
}
