//! Structural self-check of a tree

use super::arena::{OrderArena, OrderHandle};
use super::node::Color;
use super::rbtree::{DuplicatePolicy, Tree};
use crate::error::IndexError;

impl Tree {
    /// Check search order, red-black rules, parent links, tree membership and
    /// the entry count. Walks the whole tree, so this is O(n).
    pub fn verify(&self, arena: &OrderArena) -> Result<(), IndexError> {
        self.check_arena(arena)?;
        if self.arena.is_some() != (self.len > 0) {
            return Err(corrupted(format!(
                "tree {} holds {} entries but has arena binding {:?}",
                self.id, self.len, self.arena
            )));
        }
        if self.is_red(arena, self.root) {
            return Err(corrupted(format!("tree {} has a red root", self.id)));
        }
        if let Some(root) = self.root {
            if self.node(arena, root).parent.is_some() {
                return Err(corrupted(format!("tree {} root has a parent", self.id)));
            }
        }

        let mut count = 0;
        self.verify_subtree(arena, self.root, None, &mut count)?;
        if count != self.len {
            return Err(corrupted(format!(
                "tree {} counts {} entries but holds {}",
                self.id, self.len, count
            )));
        }

        let mut previous: Option<i64> = None;
        for handle in self.iter(arena) {
            let key = self.node(arena, handle).key();
            if let Some(prev) = previous {
                let ordered = match self.policy {
                    DuplicatePolicy::Allow => prev <= key,
                    DuplicatePolicy::Reject => prev < key,
                };
                if !ordered {
                    return Err(corrupted(format!(
                        "tree {} has key {} after {}",
                        self.id, key, prev
                    )));
                }
            }
            previous = Some(key);
        }
        Ok(())
    }

    /// Returns the black height of the subtree
    fn verify_subtree(
        &self,
        arena: &OrderArena,
        handle: Option<OrderHandle>,
        parent: Option<OrderHandle>,
        count: &mut usize,
    ) -> Result<usize, IndexError> {
        let Some(handle) = handle else {
            return Ok(1);
        };
        if !arena.contains(handle) {
            return Err(corrupted(format!("tree {} links dead handle {}", self.id, handle)));
        }
        let node = self.node(arena, handle);
        if node.tree() != Some(self.id) {
            return Err(corrupted(format!(
                "node {} in tree {} is marked as {:?}",
                handle,
                self.id,
                node.tree()
            )));
        }
        if node.parent != parent {
            return Err(corrupted(format!("node {} has a stale parent link", handle)));
        }
        if node.owner() != Some(handle) {
            return Err(corrupted(format!("node {} has a stale owner", handle)));
        }
        let red_child = self.is_red(arena, node.left) || self.is_red(arena, node.right);
        if node.color == Color::Red && red_child {
            return Err(corrupted(format!("red node {} has a red child", handle)));
        }

        *count += 1;
        let left = self.verify_subtree(arena, node.left, Some(handle), count)?;
        let right = self.verify_subtree(arena, node.right, Some(handle), count)?;
        if left != right {
            return Err(corrupted(format!(
                "node {} has black heights {} and {}",
                handle, left, right
            )));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}

fn corrupted(message: String) -> IndexError {
    IndexError::Corrupted { message }
}
