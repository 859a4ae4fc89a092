//! Order records and the value types they are built from.

pub mod guid;
mod record;
mod types;

pub use record::{Order, describe};
pub use types::{
    CostData, MARKET_PRICE, NO_COUNTER_PARTY, OrderKind, Response, ResponseKind, TradeData,
};
