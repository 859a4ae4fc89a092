//! Aggregated price-level view of an index

use super::book::OrderIndex;
use crate::error::IndexError;
use crate::tree::{OrderArena, OrderHandle};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Resting interest at one price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: i64,
    /// Sum of the remaining amounts of all orders at this price
    pub amount: u64,
    /// Number of orders at this price
    pub orders: usize,
}

/// Price levels of both sides, best price first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Buy levels, highest price first
    pub buys: Vec<LevelSnapshot>,
    /// Sell levels, lowest price first
    pub sells: Vec<LevelSnapshot>,
    /// Total number of resting orders
    pub orders: usize,
}

impl IndexSnapshot {
    /// Best buy price and the amount resting there
    pub fn best_buy(&self) -> Option<(i64, u64)> {
        self.buys.first().map(|level| (level.price, level.amount))
    }

    /// Best sell price and the amount resting there
    pub fn best_sell(&self) -> Option<(i64, u64)> {
        self.sells.first().map(|level| (level.price, level.amount))
    }

    /// Best sell minus best buy, `None` if a side is empty or the difference
    /// does not fit an `i64`
    pub fn spread(&self) -> Option<i64> {
        match (self.best_buy(), self.best_sell()) {
            (Some((buy, _)), Some((sell, _))) => sell.checked_sub(buy),
            _ => None,
        }
    }

    /// Total amount resting on the buy side
    pub fn total_buy_amount(&self) -> u64 {
        self.buys.iter().map(|level| level.amount).sum()
    }

    /// Total amount resting on the sell side
    pub fn total_sell_amount(&self) -> u64 {
        self.sells.iter().map(|level| level.amount).sum()
    }

    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl OrderIndex {
    /// Aggregate up to `depth` price levels per side
    pub fn snapshot(&self, depth: usize) -> IndexSnapshot {
        let buys = aggregate(&self.arena, self.buys.iter_rev(&self.arena), depth);
        let sells = aggregate(&self.arena, self.sells.iter(&self.arena), depth);
        trace!(
            "Order index: snapshot with {} buy and {} sell levels",
            buys.len(),
            sells.len()
        );
        IndexSnapshot {
            buys,
            sells,
            orders: self.len(),
        }
    }
}

/// Groups consecutive equal prices of an ordered walk into levels
fn aggregate(
    arena: &OrderArena,
    handles: impl Iterator<Item = OrderHandle>,
    depth: usize,
) -> Vec<LevelSnapshot> {
    let mut levels: Vec<LevelSnapshot> = Vec::new();
    for handle in handles {
        let order = &arena[handle];
        match levels.last_mut() {
            Some(level) if level.price == order.price() => {
                level.amount += u64::from(order.amount());
                level.orders += 1;
            }
            _ => {
                if levels.len() == depth {
                    break;
                }
                levels.push(LevelSnapshot {
                    price: order.price(),
                    amount: u64::from(order.amount()),
                    orders: 1,
                });
            }
        }
    }
    levels
}
