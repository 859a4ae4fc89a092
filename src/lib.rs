//! # Dual-Keyed Order Index
//!
//! Building blocks for a limit order book in which every order is a live member of
//! two balanced search trees at the same time: one ordered by limit price, used to
//! walk the book while matching, and one ordered by the order's guid, used for
//! cancellation and lookup.
//!
//! ## Key Features
//!
//! - **Embedded Nodes**: Each [`Order`] carries two red-black tree nodes as plain
//!   struct fields, one per index. There is no wrapper allocation per membership
//!   and no copy of the payload.
//!
//! - **Arena Handles Instead of Pointers**: Orders live in an [`OrderArena`] backed by
//!   a slab. Tree links are [`OrderHandle`]s, so nodes reference their owner and each
//!   other without lifetimes or `unsafe`, and the sibling node of any node is found in
//!   constant time.
//!
//! - **Independent Balancing**: A [`Tree`] only reads and writes the node of its own
//!   [`IndexKind`]. Rotating the price tree never touches guid links and vice versa.
//!
//! - **Tracked Linkage**: Every node records the [`TreeId`] it is linked into. Double
//!   inserts, removals from the wrong tree and releasing a still-indexed order are
//!   reported as errors instead of corrupting a tree.
//!
//! - **Price-Time Order**: Price trees keep equal prices in arrival order, so the
//!   oldest order at a price is always found first.
//!
//! ## Guids
//!
//! An order's guid packs the submitting trader id in the high 32 bits and the
//! trader's own trade id in the low 32 bits. See [`order::guid`].
//!
//! ## Example
//!
//! ```
//! use ordertree_rs::{CostData, Order, OrderIndex, TradeData};
//!
//! let mut index = OrderIndex::new();
//! let buy = Order::new_buy(CostData::new(100, 10), TradeData::new(7, 1, 3)).unwrap();
//! let handle = index.insert(buy).unwrap();
//!
//! assert_eq!(index.best_buy(), Some(handle));
//!
//! let cancel = Order::new_delete(TradeData::new(7, 1, 3));
//! let removed = index.cancel(&cancel).unwrap().unwrap();
//! assert_eq!(removed.price(), 100);
//! assert!(index.is_empty());
//! ```
//!
//! ## Concurrency
//!
//! Everything here is single-writer and synchronous. Mutations take `&mut self`;
//! an owner that needs shared access serializes it, for example behind a command
//! queue or a lock.

mod error;
pub mod index;
pub mod order;
pub mod tree;

mod utils;

pub use error::{IndexError, IndexResult};
pub use index::{IndexSnapshot, LevelSnapshot, OrderIndex};
pub use order::{
    CostData, MARKET_PRICE, NO_COUNTER_PARTY, Order, OrderKind, Response, ResponseKind, TradeData,
};
pub use tree::{
    ArenaId, DuplicatePolicy, IndexKind, Node, NodeRef, OrderArena, OrderHandle, Tree, TreeId,
};
pub use utils::{group_digits, setup_logger};
