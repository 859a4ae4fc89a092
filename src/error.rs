//! Error types for order construction and the dual index

use crate::order::OrderKind;
use crate::tree::{IndexKind, OrderHandle};
use std::fmt;

/// Errors that can occur while building orders or maintaining their indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A BUY or SELL order was built with a zero amount
    InvalidAmount {
        /// Kind of the rejected order
        kind: OrderKind,
    },

    /// A node with an equal key is already present in a tree that rejects duplicates
    DuplicateKey {
        /// Index the insert was attempted on
        index: IndexKind,
        /// The colliding key
        key: i64,
    },

    /// The node is already linked into a tree of this kind
    AlreadyLinked {
        /// Index the node belongs to
        index: IndexKind,
        /// Key of the node
        key: i64,
    },

    /// The node is not linked into the tree it was removed from
    NotLinked {
        /// Index the removal was attempted on
        index: IndexKind,
        /// Key of the node
        key: i64,
    },

    /// The handle does not refer to a live order in the arena
    UnknownHandle(OrderHandle),

    /// The tree holds nodes of a different arena than the one passed in
    ForeignArena {
        /// Index of the tree
        index: IndexKind,
    },

    /// The order is still linked into at least one tree and cannot be released
    StillLinked(OrderHandle),

    /// Operation not permitted for the given order
    InvalidOperation {
        /// Description of the error
        message: String,
    },

    /// A structural check on a tree failed
    Corrupted {
        /// Description of the broken invariant
        message: String,
    },

    /// Snapshot (de)serialization failed
    SerializationError {
        /// Underlying error message
        message: String,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::InvalidAmount { kind } => {
                write!(
                    f,
                    "Invalid amount: {} order requires a non-zero amount",
                    kind
                )
            }
            IndexError::DuplicateKey { index, key } => {
                write!(f, "Duplicate key: {} index already contains {}", index, key)
            }
            IndexError::AlreadyLinked { index, key } => {
                write!(f, "Node already linked: {} node with key {}", index, key)
            }
            IndexError::NotLinked { index, key } => {
                write!(
                    f,
                    "Node not linked: {} node with key {} is not in this tree",
                    index, key
                )
            }
            IndexError::UnknownHandle(handle) => write!(f, "Unknown order handle: {}", handle),
            IndexError::ForeignArena { index } => {
                write!(f, "Foreign arena: {} tree is bound to another arena", index)
            }
            IndexError::StillLinked(handle) => {
                write!(f, "Order {} is still linked into an index", handle)
            }
            IndexError::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
            IndexError::Corrupted { message } => write!(f, "Corrupted tree: {}", message),
            IndexError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for IndexError {}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::SerializationError {
            message: err.to_string(),
        }
    }
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
