//! Lookup and ordered traversal over a [`Tree`]

use super::arena::{OrderArena, OrderHandle};
use super::rbtree::Tree;

impl Tree {
    /// Find the order whose node in this tree has `key`.
    ///
    /// When several nodes share the key the oldest one is returned.
    pub fn find(&self, arena: &OrderArena, key: i64) -> Option<OrderHandle> {
        if !self.is_bound_to(arena) {
            return None;
        }
        let mut found = None;
        let mut cursor = self.root;
        while let Some(current) = cursor {
            let node = self.node(arena, current);
            cursor = if key < node.key() {
                node.left
            } else if key > node.key() {
                node.right
            } else {
                found = Some(current);
                node.left
            };
        }
        found
    }

    /// The entry with the smallest key
    pub fn min(&self, arena: &OrderArena) -> Option<OrderHandle> {
        let root = self.root.filter(|_| self.is_bound_to(arena))?;
        Some(self.subtree_min(arena, root))
    }

    /// The entry with the largest key. Among equal keys this is the newest.
    pub fn max(&self, arena: &OrderArena) -> Option<OrderHandle> {
        let root = self.root.filter(|_| self.is_bound_to(arena))?;
        Some(self.subtree_max(arena, root))
    }

    /// The next entry in key order, or `None` past the end or if `handle` is not in this tree
    pub fn successor(&self, arena: &OrderArena, handle: OrderHandle) -> Option<OrderHandle> {
        if !self.contains(arena, handle) {
            return None;
        }
        if let Some(right) = self.node(arena, handle).right {
            return Some(self.subtree_min(arena, right));
        }
        let mut child = handle;
        let mut parent = self.node(arena, handle).parent;
        while let Some(p) = parent {
            if self.node(arena, p).left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(arena, p).parent;
        }
        None
    }

    /// The previous entry in key order
    pub fn predecessor(&self, arena: &OrderArena, handle: OrderHandle) -> Option<OrderHandle> {
        if !self.contains(arena, handle) {
            return None;
        }
        if let Some(left) = self.node(arena, handle).left {
            return Some(self.subtree_max(arena, left));
        }
        let mut child = handle;
        let mut parent = self.node(arena, handle).parent;
        while let Some(p) = parent {
            if self.node(arena, p).right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(arena, p).parent;
        }
        None
    }

    /// Iterate over handles in ascending key order
    pub fn iter<'a>(&'a self, arena: &'a OrderArena) -> Iter<'a> {
        Iter {
            tree: self,
            arena,
            next: self.min(arena),
            forward: true,
        }
    }

    /// Iterate over handles in descending key order
    pub fn iter_rev<'a>(&'a self, arena: &'a OrderArena) -> Iter<'a> {
        Iter {
            tree: self,
            arena,
            next: self.max(arena),
            forward: false,
        }
    }

    /// Keys in ascending order
    pub fn keys(&self, arena: &OrderArena) -> Vec<i64> {
        self.iter(arena)
            .map(|handle| self.node(arena, handle).key())
            .collect()
    }

    pub(super) fn subtree_min(&self, arena: &OrderArena, mut handle: OrderHandle) -> OrderHandle {
        while let Some(left) = self.node(arena, handle).left {
            handle = left;
        }
        handle
    }

    pub(super) fn subtree_max(&self, arena: &OrderArena, mut handle: OrderHandle) -> OrderHandle {
        while let Some(right) = self.node(arena, handle).right {
            handle = right;
        }
        handle
    }
}

/// In-order walk over a tree, driven by successor/predecessor links
pub struct Iter<'a> {
    tree: &'a Tree,
    arena: &'a OrderArena,
    next: Option<OrderHandle>,
    forward: bool,
}

impl Iterator for Iter<'_> {
    type Item = OrderHandle;

    fn next(&mut self) -> Option<OrderHandle> {
        let current = self.next?;
        self.next = if self.forward {
            self.tree.successor(self.arena, current)
        } else {
            self.tree.predecessor(self.arena, current)
        };
        Some(current)
    }
}
