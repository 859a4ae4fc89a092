//! Packing of trader and trade identifiers into a single 64-bit guid.
//!
//! The trader id occupies the high 32 bits and the trade id the low 32 bits.

const LOW_MASK: u64 = 0xFFFF_FFFF;

/// Packs a trader id and trade id into a guid
#[inline]
pub fn pack(trader_id: u32, trade_id: u32) -> i64 {
    ((u64::from(trader_id) << 32) | u64::from(trade_id)) as i64
}

/// Extracts the trader id (high 32 bits) from a guid
#[inline]
pub fn trader_of(guid: i64) -> u32 {
    ((guid as u64) >> 32) as u32
}

/// Extracts the trade id (low 32 bits) from a guid
#[inline]
pub fn trade_of(guid: i64) -> u32 {
    ((guid as u64) & LOW_MASK) as u32
}
