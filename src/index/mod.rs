//! Single-writer container that keeps orders dually indexed by price and guid.

pub mod book;
mod operations;
mod snapshot;

pub use book::OrderIndex;
pub use snapshot::{IndexSnapshot, LevelSnapshot};
