//! Intrusive red-black tree over the nodes embedded in arena-resident orders.
//!
//! A `Tree` owns no order data. It holds a root handle and a count, and every
//! link it follows lives in the `Node` of its [`IndexKind`] inside some order
//! of the arena. Rotations and recolouring only ever touch nodes of that kind,
//! so the sibling node of each order (linked into another tree) is never
//! disturbed.

use super::arena::{ArenaId, OrderArena, OrderHandle};
use super::node::{Color, IndexKind, Node, TreeId};
use crate::error::IndexError;
use tracing::{debug, trace};

/// What to do when an inserted key is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep equal keys, ordered by insertion (oldest first)
    Allow,
    /// Refuse the insert and leave the tree unchanged
    Reject,
}

/// A balanced ordered index over one kind of embedded node.
///
/// While it holds nodes, a tree is bound to the arena they live in and refuses
/// any other. The links are stored in the orders, so a tree that still holds
/// nodes must be [`clear`](Tree::clear)ed before it is dropped, or those orders
/// stay marked as linked into it.
#[derive(Debug)]
pub struct Tree {
    pub(super) id: TreeId,
    pub(super) kind: IndexKind,
    pub(super) policy: DuplicatePolicy,
    pub(super) arena: Option<ArenaId>,
    pub(super) root: Option<OrderHandle>,
    pub(super) len: usize,
}

impl Tree {
    /// Create an empty tree
    pub fn new(kind: IndexKind, policy: DuplicatePolicy) -> Self {
        Self {
            id: TreeId::next(),
            kind,
            policy,
            arena: None,
            root: None,
            len: 0,
        }
    }

    /// A price tree. Several orders may rest at the same price.
    pub fn price() -> Self {
        Self::new(IndexKind::Price, DuplicatePolicy::Allow)
    }

    /// A guid tree. Guids are unique.
    pub fn guid() -> Self {
        Self::new(IndexKind::Guid, DuplicatePolicy::Reject)
    }

    #[inline]
    pub fn id(&self) -> TreeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    #[inline]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn root(&self) -> Option<OrderHandle> {
        self.root
    }

    /// The arena holding this tree's nodes, if it holds any
    #[inline]
    pub fn arena(&self) -> Option<ArenaId> {
        self.arena
    }

    /// Whether this tree may read `arena`. An empty tree accepts any arena.
    #[inline]
    pub fn is_bound_to(&self, arena: &OrderArena) -> bool {
        self.arena.is_none_or(|id| id == arena.id())
    }

    pub(super) fn check_arena(&self, arena: &OrderArena) -> Result<(), IndexError> {
        if self.is_bound_to(arena) {
            Ok(())
        } else {
            Err(IndexError::ForeignArena { index: self.kind })
        }
    }

    /// Whether the order's node of this tree's kind is linked into this tree
    pub fn contains(&self, arena: &OrderArena, handle: OrderHandle) -> bool {
        if !self.is_bound_to(arena) {
            return false;
        }
        arena
            .get(handle)
            .is_some_and(|order| order.node(self.kind).tree() == Some(self.id))
    }

    /// Link an order into the tree by its key.
    ///
    /// Nothing is modified when the insert fails.
    pub fn insert(
        &mut self,
        arena: &mut OrderArena,
        handle: OrderHandle,
    ) -> Result<(), IndexError> {
        self.check_arena(arena)?;
        let node = arena
            .get(handle)
            .map(|order| order.node(self.kind))
            .ok_or(IndexError::UnknownHandle(handle))?;
        let key = node.key();
        if node.is_linked() {
            debug!(
                "Tree {}: refusing {} node {} already linked into {:?}",
                self.id,
                self.kind,
                key,
                node.tree()
            );
            return Err(IndexError::AlreadyLinked {
                index: self.kind,
                key,
            });
        }

        // Upper-bound descent: equal keys go right, so in-order stays FIFO.
        let mut parent = None;
        let mut go_left = false;
        let mut cursor = self.root;
        while let Some(current) = cursor {
            let current_key = self.node(arena, current).key();
            if key == current_key && self.policy == DuplicatePolicy::Reject {
                debug!(
                    "Tree {}: rejecting duplicate {} key {}",
                    self.id, self.kind, key
                );
                return Err(IndexError::DuplicateKey {
                    index: self.kind,
                    key,
                });
            }
            parent = Some(current);
            go_left = key < current_key;
            cursor = if go_left {
                self.node(arena, current).left
            } else {
                self.node(arena, current).right
            };
        }

        let tree_id = self.id;
        {
            let node = self.node_mut(arena, handle);
            node.link(tree_id);
            node.parent = parent;
        }
        match parent {
            None => self.root = Some(handle),
            Some(p) if go_left => self.node_mut(arena, p).left = Some(handle),
            Some(p) => self.node_mut(arena, p).right = Some(handle),
        }

        self.insert_fixup(arena, handle);
        self.arena = Some(arena.id());
        self.len += 1;
        trace!(
            "Tree {}: inserted {} key {} as {} ({} entries)",
            self.id, self.kind, key, handle, self.len
        );
        Ok(())
    }

    /// Unlink an order's node from this tree and rebalance.
    ///
    /// The order itself stays in the arena and its sibling node is untouched.
    pub fn remove(
        &mut self,
        arena: &mut OrderArena,
        handle: OrderHandle,
    ) -> Result<(), IndexError> {
        self.check_arena(arena)?;
        let node = arena
            .get(handle)
            .map(|order| order.node(self.kind))
            .ok_or(IndexError::UnknownHandle(handle))?;
        if node.tree() != Some(self.id) {
            return Err(IndexError::NotLinked {
                index: self.kind,
                key: node.key(),
            });
        }
        let key = node.key();

        self.delete(arena, handle);
        self.node_mut(arena, handle).unlink();
        self.len -= 1;
        if self.len == 0 {
            self.arena = None;
        }
        trace!(
            "Tree {}: removed {} key {} at {} ({} entries)",
            self.id, self.kind, key, handle, self.len
        );
        Ok(())
    }

    /// Unlink every node and leave the tree empty. Returns how many were unlinked.
    ///
    /// The orders stay in the arena, free to be linked again or released.
    pub fn clear(&mut self, arena: &mut OrderArena) -> Result<usize, IndexError> {
        self.check_arena(arena)?;
        let mut pending: Vec<OrderHandle> = self.root.into_iter().collect();
        let mut cleared = 0;
        while let Some(handle) = pending.pop() {
            let node = self.node_mut(arena, handle);
            pending.extend(node.left);
            pending.extend(node.right);
            node.unlink();
            cleared += 1;
        }

        self.root = None;
        self.len = 0;
        self.arena = None;
        debug!("Tree {}: cleared {} nodes", self.id, cleared);
        Ok(cleared)
    }

    #[inline]
    pub(super) fn node<'a>(&self, arena: &'a OrderArena, handle: OrderHandle) -> &'a Node {
        arena[handle].node(self.kind)
    }

    #[inline]
    fn node_mut<'a>(&self, arena: &'a mut OrderArena, handle: OrderHandle) -> &'a mut Node {
        arena[handle].node_mut(self.kind)
    }

    #[inline]
    fn parent(&self, arena: &OrderArena, handle: OrderHandle) -> Option<OrderHandle> {
        self.node(arena, handle).parent
    }

    #[inline]
    fn left(&self, arena: &OrderArena, handle: OrderHandle) -> Option<OrderHandle> {
        self.node(arena, handle).left
    }

    #[inline]
    fn right(&self, arena: &OrderArena, handle: OrderHandle) -> Option<OrderHandle> {
        self.node(arena, handle).right
    }

    /// Missing children count as black leaves
    #[inline]
    pub(super) fn is_red(&self, arena: &OrderArena, handle: Option<OrderHandle>) -> bool {
        handle.is_some_and(|h| self.node(arena, h).color == Color::Red)
    }

    #[inline]
    fn paint(&self, arena: &mut OrderArena, handle: Option<OrderHandle>, color: Color) {
        if let Some(h) = handle {
            self.node_mut(arena, h).color = color;
        }
    }

    fn set_parent(
        &self,
        arena: &mut OrderArena,
        child: Option<OrderHandle>,
        parent: Option<OrderHandle>,
    ) {
        if let Some(c) = child {
            self.node_mut(arena, c).parent = parent;
        }
    }

    /// Point `parent`'s link that referenced `old` at `new`, or the root if `parent` is none
    fn replace_child(
        &mut self,
        arena: &mut OrderArena,
        parent: Option<OrderHandle>,
        old: OrderHandle,
        new: Option<OrderHandle>,
    ) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = self.node_mut(arena, p);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    fn rotate_left(&mut self, arena: &mut OrderArena, x: OrderHandle) {
        let Some(y) = self.right(arena, x) else {
            return;
        };
        let y_left = self.left(arena, y);
        self.node_mut(arena, x).right = y_left;
        self.set_parent(arena, y_left, Some(x));

        let x_parent = self.parent(arena, x);
        self.node_mut(arena, y).parent = x_parent;
        self.replace_child(arena, x_parent, x, Some(y));

        self.node_mut(arena, y).left = Some(x);
        self.node_mut(arena, x).parent = Some(y);
    }

    fn rotate_right(&mut self, arena: &mut OrderArena, x: OrderHandle) {
        let Some(y) = self.left(arena, x) else {
            return;
        };
        let y_right = self.right(arena, y);
        self.node_mut(arena, x).left = y_right;
        self.set_parent(arena, y_right, Some(x));

        let x_parent = self.parent(arena, x);
        self.node_mut(arena, y).parent = x_parent;
        self.replace_child(arena, x_parent, x, Some(y));

        self.node_mut(arena, y).right = Some(x);
        self.node_mut(arena, x).parent = Some(y);
    }

    fn insert_fixup(&mut self, arena: &mut OrderArena, mut z: OrderHandle) {
        while let Some(p) = self.parent(arena, z) {
            if !self.is_red(arena, Some(p)) {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(g) = self.parent(arena, p) else {
                break;
            };

            if self.left(arena, g) == Some(p) {
                let uncle = self.right(arena, g);
                if self.is_red(arena, uncle) {
                    self.paint(arena, Some(p), Color::Black);
                    self.paint(arena, uncle, Color::Black);
                    self.paint(arena, Some(g), Color::Red);
                    z = g;
                } else {
                    let mut p = p;
                    if self.right(arena, p) == Some(z) {
                        z = p;
                        self.rotate_left(arena, z);
                        p = self.parent(arena, z).unwrap_or(p);
                    }
                    self.paint(arena, Some(p), Color::Black);
                    self.paint(arena, Some(g), Color::Red);
                    self.rotate_right(arena, g);
                }
            } else {
                let uncle = self.left(arena, g);
                if self.is_red(arena, uncle) {
                    self.paint(arena, Some(p), Color::Black);
                    self.paint(arena, uncle, Color::Black);
                    self.paint(arena, Some(g), Color::Red);
                    z = g;
                } else {
                    let mut p = p;
                    if self.left(arena, p) == Some(z) {
                        z = p;
                        self.rotate_right(arena, z);
                        p = self.parent(arena, z).unwrap_or(p);
                    }
                    self.paint(arena, Some(p), Color::Black);
                    self.paint(arena, Some(g), Color::Red);
                    self.rotate_left(arena, g);
                }
            }
        }
        let root = self.root;
        self.paint(arena, root, Color::Black);
    }

    /// Structural removal of `z`. Nodes are relinked, never have their keys swapped,
    /// since a key belongs to the order that embeds the node.
    fn delete(&mut self, arena: &mut OrderArena, z: OrderHandle) {
        let z_left = self.left(arena, z);
        let z_right = self.right(arena, z);
        let z_parent = self.parent(arena, z);
        let mut removed_color = self.node(arena, z).color;

        let x;
        let x_parent;
        match (z_left, z_right) {
            (None, _) => {
                x = z_right;
                x_parent = z_parent;
                self.replace_child(arena, z_parent, z, z_right);
                self.set_parent(arena, z_right, z_parent);
            }
            (Some(_), None) => {
                x = z_left;
                x_parent = z_parent;
                self.replace_child(arena, z_parent, z, z_left);
                self.set_parent(arena, z_left, z_parent);
            }
            (Some(zl), Some(zr)) => {
                let y = self.subtree_min(arena, zr);
                removed_color = self.node(arena, y).color;
                x = self.right(arena, y);

                if y == zr {
                    x_parent = Some(y);
                } else {
                    let y_parent = self.parent(arena, y);
                    x_parent = y_parent;
                    self.replace_child(arena, y_parent, y, x);
                    self.set_parent(arena, x, y_parent);
                    self.node_mut(arena, y).right = Some(zr);
                    self.node_mut(arena, zr).parent = Some(y);
                }

                self.replace_child(arena, z_parent, z, Some(y));
                let z_color = self.node(arena, z).color;
                {
                    let y_node = self.node_mut(arena, y);
                    y_node.parent = z_parent;
                    y_node.left = Some(zl);
                    y_node.color = z_color;
                }
                self.node_mut(arena, zl).parent = Some(y);
            }
        }

        if removed_color == Color::Black {
            self.delete_fixup(arena, x, x_parent);
        }
    }

    fn delete_fixup(
        &mut self,
        arena: &mut OrderArena,
        mut x: Option<OrderHandle>,
        mut x_parent: Option<OrderHandle>,
    ) {
        while x != self.root && !self.is_red(arena, x) {
            let Some(p) = x_parent else {
                break;
            };

            if self.left(arena, p) == x {
                let mut w = self.right(arena, p);
                if self.is_red(arena, w) {
                    self.paint(arena, w, Color::Black);
                    self.paint(arena, Some(p), Color::Red);
                    self.rotate_left(arena, p);
                    w = self.right(arena, p);
                }
                let Some(mut sibling) = w else {
                    x = Some(p);
                    x_parent = self.parent(arena, p);
                    continue;
                };

                let near = self.left(arena, sibling);
                let far = self.right(arena, sibling);
                if !self.is_red(arena, near) && !self.is_red(arena, far) {
                    self.paint(arena, Some(sibling), Color::Red);
                    x = Some(p);
                    x_parent = self.parent(arena, p);
                } else {
                    if !self.is_red(arena, far) {
                        self.paint(arena, near, Color::Black);
                        self.paint(arena, Some(sibling), Color::Red);
                        self.rotate_right(arena, sibling);
                        sibling = self.right(arena, p).unwrap_or(sibling);
                    }
                    let p_color = self.node(arena, p).color;
                    self.paint(arena, Some(sibling), p_color);
                    self.paint(arena, Some(p), Color::Black);
                    let far = self.right(arena, sibling);
                    self.paint(arena, far, Color::Black);
                    self.rotate_left(arena, p);
                    x = self.root;
                    x_parent = None;
                }
            } else {
                let mut w = self.left(arena, p);
                if self.is_red(arena, w) {
                    self.paint(arena, w, Color::Black);
                    self.paint(arena, Some(p), Color::Red);
                    self.rotate_right(arena, p);
                    w = self.left(arena, p);
                }
                let Some(mut sibling) = w else {
                    x = Some(p);
                    x_parent = self.parent(arena, p);
                    continue;
                };

                let near = self.right(arena, sibling);
                let far = self.left(arena, sibling);
                if !self.is_red(arena, near) && !self.is_red(arena, far) {
                    self.paint(arena, Some(sibling), Color::Red);
                    x = Some(p);
                    x_parent = self.parent(arena, p);
                } else {
                    if !self.is_red(arena, far) {
                        self.paint(arena, near, Color::Black);
                        self.paint(arena, Some(sibling), Color::Red);
                        self.rotate_left(arena, sibling);
                        sibling = self.left(arena, p).unwrap_or(sibling);
                    }
                    let p_color = self.node(arena, p).color;
                    self.paint(arena, Some(sibling), p_color);
                    self.paint(arena, Some(p), Color::Black);
                    let far = self.left(arena, sibling);
                    self.paint(arena, far, Color::Black);
                    self.rotate_right(arena, p);
                    x = self.root;
                    x_parent = None;
                }
            }
        }
        self.paint(arena, x, Color::Black);
    }
}
