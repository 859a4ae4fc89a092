//! Index operations: adding, cancelling, filling and removing orders

use super::book::OrderIndex;
use crate::error::IndexError;
use crate::order::{Order, OrderKind};
use crate::tree::{IndexKind, OrderHandle};
use tracing::{debug, trace};

impl OrderIndex {
    /// Store an order and link it into the guid tree and its side's price tree.
    ///
    /// A duplicate guid is rejected before anything is allocated, so a failed
    /// insert leaves the index unchanged.
    pub fn insert(&mut self, order: Order) -> Result<OrderHandle, IndexError> {
        let kind = order.kind();
        if !kind.is_trade() {
            return Err(IndexError::InvalidOperation {
                message: format!("{} orders do not rest in the index", kind),
            });
        }
        let guid = order.guid();
        if self.guids.find(&self.arena, guid).is_some() {
            debug!("Order index: rejecting duplicate guid {}", guid);
            return Err(IndexError::DuplicateKey {
                index: IndexKind::Guid,
                key: guid,
            });
        }

        let handle = self.arena.insert(order);
        if let Err(err) = self.guids.insert(&mut self.arena, handle) {
            let released = self.arena.remove(handle);
            debug_assert!(released.is_ok(), "rollback left {} in the arena", handle);
            return Err(err);
        }
        let side = match kind {
            OrderKind::Buy => &mut self.buys,
            _ => &mut self.sells,
        };
        if let Err(err) = side.insert(&mut self.arena, handle) {
            let unlinked = self.guids.remove(&mut self.arena, handle);
            debug_assert!(unlinked.is_ok(), "rollback left {} in guid tree", handle);
            let released = self.arena.remove(handle);
            debug_assert!(released.is_ok(), "rollback left {} in the arena", handle);
            return Err(err);
        }

        trace!("Order index: added {} as {}", self.arena[handle], handle);
        Ok(handle)
    }

    /// Unlink an order from both trees and release it.
    ///
    /// Returns `None` if the handle is not a resting order of this index.
    pub fn remove(&mut self, handle: OrderHandle) -> Option<Order> {
        let kind = self.arena.get(handle)?.kind();
        if !self.guids.contains(&self.arena, handle) {
            return None;
        }
        let side = match kind {
            OrderKind::Buy => &mut self.buys,
            OrderKind::Sell => &mut self.sells,
            OrderKind::Delete => return None,
        };
        side.remove(&mut self.arena, handle).ok()?;
        self.guids.remove(&mut self.arena, handle).ok()?;

        let order = self.arena.remove(handle).ok()?;
        trace!("Order index: removed {} from {}", order, handle);
        Some(order)
    }

    /// Process a DELETE order: remove the resting order with the same guid.
    ///
    /// Returns `Ok(None)` when no such order rests in the index.
    pub fn cancel(&mut self, delete: &Order) -> Result<Option<Order>, IndexError> {
        if delete.kind() != OrderKind::Delete {
            return Err(IndexError::InvalidOperation {
                message: format!("cannot cancel with a {} order", delete.kind()),
            });
        }
        trace!(
            "Order index: cancelling trader {} trade {}",
            delete.trader_id(),
            delete.trade_id()
        );
        Ok(self
            .find_by_guid(delete.guid())
            .and_then(|handle| self.remove(handle)))
    }

    /// Take `amount` units off a resting order.
    ///
    /// When the order is fully consumed it is removed from both trees and
    /// returned. Filling more than the remaining amount is an error and changes
    /// nothing.
    pub fn fill(
        &mut self,
        handle: OrderHandle,
        amount: u32,
    ) -> Result<Option<Order>, IndexError> {
        let order = self
            .arena
            .get_mut(handle)
            .ok_or(IndexError::UnknownHandle(handle))?;
        let remaining = order.reduce_amount(amount)?;
        trace!(
            "Order index: filled {} units of {}, {} remaining",
            amount, handle, remaining
        );

        if remaining == 0 {
            Ok(self.remove(handle))
        } else {
            Ok(None)
        }
    }
}
