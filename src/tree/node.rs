//! The index node embedded in every order, once per index.

use super::arena::OrderHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Which of the two embedded nodes (and so which ordering) a tree uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    /// Ordered by limit price
    Price,
    /// Ordered by the packed trader/trade guid
    Guid,
}

impl IndexKind {
    /// The kind of the sibling node embedded in the same order
    #[inline]
    pub fn other(self) -> Self {
        match self {
            IndexKind::Price => IndexKind::Guid,
            IndexKind::Guid => IndexKind::Price,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Price => write!(f, "price"),
            IndexKind::Guid => write!(f, "guid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Process-unique identity of a tree instance.
///
/// Nodes remember the id of the tree they are linked into, so a node can only be
/// removed from the tree that actually holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u32);

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

impl TreeId {
    pub(crate) fn next() -> Self {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree-{}", self.0)
    }
}

/// Address of one embedded node: the owning order plus which of its two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Order embedding the node
    pub order: OrderHandle,
    /// Which of the order's nodes
    pub kind: IndexKind,
}

impl NodeRef {
    /// Address the `kind` node of `order`
    pub fn new(order: OrderHandle, kind: IndexKind) -> Self {
        Self { order, kind }
    }

    /// The other node embedded in the same order. O(1), no lookup involved.
    #[inline]
    pub fn sibling(self) -> Self {
        Self {
            order: self.order,
            kind: self.kind.other(),
        }
    }
}

/// A red-black tree node embedded in an [`Order`](crate::order::Order).
///
/// Links are arena handles of other orders; the tree knows which embedded node
/// of those orders to follow from its own [`IndexKind`]. A node never owns the
/// order it lives in, `owner` is just a back reference set by the arena.
#[derive(Debug)]
pub struct Node {
    key: i64,
    kind: IndexKind,
    owner: Option<OrderHandle>,
    pub(crate) parent: Option<OrderHandle>,
    pub(crate) left: Option<OrderHandle>,
    pub(crate) right: Option<OrderHandle>,
    pub(crate) color: Color,
    pub(crate) tree: Option<TreeId>,
}

/// A copy keeps the key and kind only. It is unowned and unlinked, since the
/// links describe the original's position in a tree.
impl Clone for Node {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.key)
    }
}

impl Node {
    pub(crate) fn new(kind: IndexKind, key: i64) -> Self {
        Self {
            key,
            kind,
            owner: None,
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            tree: None,
        }
    }

    /// The ordering key of this node
    #[inline]
    pub fn key(&self) -> i64 {
        self.key
    }

    /// The index this node belongs to
    #[inline]
    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Handle of the order holding this node, once it has been placed in an arena
    #[inline]
    pub fn owner(&self) -> Option<OrderHandle> {
        self.owner
    }

    /// Reference to the sibling node, if the owner is known
    pub fn sibling(&self) -> Option<NodeRef> {
        self.owner.map(|order| NodeRef::new(order, self.kind).sibling())
    }

    /// Whether the node is currently linked into some tree
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.tree.is_some()
    }

    /// The tree this node is linked into
    #[inline]
    pub fn tree(&self) -> Option<TreeId> {
        self.tree
    }

    pub(crate) fn set_owner(&mut self, owner: Option<OrderHandle>) {
        self.owner = owner;
    }

    pub(crate) fn link(&mut self, tree: TreeId) {
        self.parent = None;
        self.left = None;
        self.right = None;
        self.color = Color::Red;
        self.tree = Some(tree);
    }

    pub(crate) fn unlink(&mut self) {
        self.parent = None;
        self.left = None;
        self.right = None;
        self.color = Color::Red;
        self.tree = None;
    }
}
