//! Slab-backed storage for orders. Handles into it are what tree links point at.

use super::node::{IndexKind, Node, NodeRef};
use crate::error::IndexError;
use crate::order::Order;
use serde::{Deserialize, Serialize};
use slab::Slab;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Integer handle of an order inside an [`OrderArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderHandle(usize);

impl OrderHandle {
    /// Raw slab index of the handle
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for OrderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Process-unique identity of an arena. A non-empty tree is bound to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(u32);

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

impl ArenaId {
    fn next() -> Self {
        ArenaId(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arena-{}", self.0)
    }
}

/// Owns every order record. Trees only ever hold handles into it.
#[derive(Debug)]
pub struct OrderArena {
    id: ArenaId,
    orders: Slab<Order>,
}

impl OrderArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            id: ArenaId::next(),
            orders: Slab::new(),
        }
    }

    /// Create an empty arena with room for `capacity` orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: ArenaId::next(),
            orders: Slab::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Move an order into the arena and stamp its handle into both embedded nodes
    pub fn insert(&mut self, order: Order) -> OrderHandle {
        let entry = self.orders.vacant_entry();
        let handle = OrderHandle(entry.key());
        let order = entry.insert(order);
        order.node_mut(IndexKind::Price).set_owner(Some(handle));
        order.node_mut(IndexKind::Guid).set_owner(Some(handle));
        trace!("Order arena: stored {} as {}", order.guid(), handle);
        handle
    }

    /// Release an order. Fails while either of its nodes is still linked.
    pub fn remove(&mut self, handle: OrderHandle) -> Result<Order, IndexError> {
        let order = self
            .orders
            .get(handle.0)
            .ok_or(IndexError::UnknownHandle(handle))?;
        if order.is_linked() {
            return Err(IndexError::StillLinked(handle));
        }

        let mut order = self.orders.remove(handle.0);
        order.node_mut(IndexKind::Price).set_owner(None);
        order.node_mut(IndexKind::Guid).set_owner(None);
        trace!("Order arena: released {} from {}", order.guid(), handle);
        Ok(order)
    }

    /// Get an order by handle
    pub fn get(&self, handle: OrderHandle) -> Option<&Order> {
        self.orders.get(handle.0)
    }

    pub(crate) fn get_mut(&mut self, handle: OrderHandle) -> Option<&mut Order> {
        self.orders.get_mut(handle.0)
    }

    /// Check whether the handle refers to a live order
    pub fn contains(&self, handle: OrderHandle) -> bool {
        self.orders.contains(handle.0)
    }

    /// Resolve an embedded node
    pub fn node(&self, node: NodeRef) -> Option<&Node> {
        self.get(node.order).map(|order| order.node(node.kind))
    }

    /// Resolve the sibling of an embedded node
    pub fn sibling(&self, node: NodeRef) -> Option<&Node> {
        self.node(node.sibling())
    }

    /// Number of orders stored
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterate over all stored orders in handle order
    pub fn iter(&self) -> impl Iterator<Item = (OrderHandle, &Order)> {
        self.orders
            .iter()
            .map(|(key, order)| (OrderHandle(key), order))
    }
}

impl Default for OrderArena {
    fn default() -> Self {
        Self::new()
    }
}

// Tree code indexes with handles it already holds as links, and only after
// checking the arena is the one it is bound to. Those handles are live since
// the arena refuses to release linked orders.
impl Index<OrderHandle> for OrderArena {
    type Output = Order;

    fn index(&self, handle: OrderHandle) -> &Order {
        &self.orders[handle.0]
    }
}

impl IndexMut<OrderHandle> for OrderArena {
    fn index_mut(&mut self, handle: OrderHandle) -> &mut Order {
        &mut self.orders[handle.0]
    }
}
