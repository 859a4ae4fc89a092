//! Intrusive dual-index trees.
//!
//! Orders live in an [`OrderArena`]; each carries one [`Node`] per [`IndexKind`].
//! A [`Tree`] links the nodes of a single kind, so the price tree and guid tree
//! share order storage without sharing any link field.

mod arena;
mod node;
mod rbtree;
mod traversal;
mod verify;

pub use arena::{ArenaId, OrderArena, OrderHandle};
pub use node::{IndexKind, Node, NodeRef, TreeId};
pub use rbtree::{DuplicatePolicy, Tree};
pub use traversal::Iter;
