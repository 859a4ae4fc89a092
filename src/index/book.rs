//! The owning container for one stock's resting orders and their two indices

use crate::error::IndexError;
use crate::order::{Order, OrderKind};
use crate::tree::{OrderArena, OrderHandle, Tree};
use tracing::trace;

/// Holds every resting order of a book exactly once, indexed twice.
///
/// Each order is linked into the price tree of its side (`buys` or `sells`) and
/// into the `guids` tree. All mutation goes through `&mut self`; callers that
/// share an index across threads serialize access themselves.
#[derive(Debug)]
pub struct OrderIndex {
    pub(super) arena: OrderArena,
    pub(super) buys: Tree,
    pub(super) sells: Tree,
    pub(super) guids: Tree,
}

impl OrderIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::from_arena(OrderArena::new())
    }

    /// Create an empty index with room for `capacity` orders before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        trace!("Order index: reserving capacity for {} orders", capacity);
        Self::from_arena(OrderArena::with_capacity(capacity))
    }

    fn from_arena(arena: OrderArena) -> Self {
        Self {
            arena,
            buys: Tree::price(),
            sells: Tree::price(),
            guids: Tree::guid(),
        }
    }

    /// Number of resting orders
    pub fn len(&self) -> usize {
        self.guids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guids.is_empty()
    }

    /// Get a resting order by handle
    pub fn get(&self, handle: OrderHandle) -> Option<&Order> {
        self.arena.get(handle)
    }

    /// Look up a resting order by its guid
    pub fn find_by_guid(&self, guid: i64) -> Option<OrderHandle> {
        self.guids.find(&self.arena, guid)
    }

    /// The oldest buy order at the highest buy price
    pub fn best_buy(&self) -> Option<OrderHandle> {
        let top = self.buys.max(&self.arena)?;
        self.buys.find(&self.arena, self.arena[top].price())
    }

    /// The oldest sell order at the lowest sell price
    pub fn best_sell(&self) -> Option<OrderHandle> {
        self.sells.min(&self.arena)
    }

    /// Price tree holding resting BUY orders
    pub fn buys(&self) -> &Tree {
        &self.buys
    }

    /// Price tree holding resting SELL orders
    pub fn sells(&self) -> &Tree {
        &self.sells
    }

    /// Guid tree holding every resting order
    pub fn guids(&self) -> &Tree {
        &self.guids
    }

    /// The arena backing all three trees, needed to walk them
    pub fn arena(&self) -> &OrderArena {
        &self.arena
    }

    /// The price tree an order of `kind` rests in
    pub fn side(&self, kind: OrderKind) -> Option<&Tree> {
        match kind {
            OrderKind::Buy => Some(&self.buys),
            OrderKind::Sell => Some(&self.sells),
            OrderKind::Delete => None,
        }
    }

    /// Check all three trees and that every stored order is linked into exactly
    /// its side's price tree and the guid tree
    pub fn verify(&self) -> Result<(), IndexError> {
        self.buys.verify(&self.arena)?;
        self.sells.verify(&self.arena)?;
        self.guids.verify(&self.arena)?;

        if self.arena.len() != self.guids.len() {
            return Err(IndexError::Corrupted {
                message: format!(
                    "arena holds {} orders but guid tree holds {}",
                    self.arena.len(),
                    self.guids.len()
                ),
            });
        }
        if self.buys.len() + self.sells.len() != self.guids.len() {
            return Err(IndexError::Corrupted {
                message: format!(
                    "price trees hold {} + {} orders but guid tree holds {}",
                    self.buys.len(),
                    self.sells.len(),
                    self.guids.len()
                ),
            });
        }
        for (handle, order) in self.arena.iter() {
            let in_side = self
                .side(order.kind())
                .is_some_and(|tree| tree.contains(&self.arena, handle));
            if !in_side || !self.guids.contains(&self.arena, handle) {
                return Err(IndexError::Corrupted {
                    message: format!("order {} at {} is not indexed", order.guid(), handle),
                });
            }
        }
        Ok(())
    }
}

impl Default for OrderIndex {
    fn default() -> Self {
        Self::new()
    }
}
