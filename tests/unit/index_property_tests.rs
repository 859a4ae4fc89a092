//! Property tests for the owning index

use ordertree_rs::{CostData, Order, OrderIndex, OrderKind, TradeData};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Add {
        buy: bool,
        price: i64,
        amount: u32,
        trade_id: u32,
    },
    Cancel { trade_id: u32 },
    Fill { trade_id: u32, amount: u32 },
}

fn add((buy, price, amount, trade_id): (bool, i64, u32, u32)) -> Op {
    Op::Add {
        buy,
        price,
        amount,
        trade_id,
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), 90i64..110, 1u32..20, 0u32..40).prop_map(add),
        (0u32..40).prop_map(|trade_id| Op::Cancel { trade_id }),
        (0u32..40, 1u32..10).prop_map(|(trade_id, amount)| Op::Fill { trade_id, amount }),
    ]
}

#[cfg(test)]
mod index_property_tests {
    use super::*;

    const TRADER: u32 = 5;

    proptest! {
        #[test]
        fn index_matches_model(ops in prop::collection::vec(op_strategy(), 1..200)) {
            let mut index = OrderIndex::new();
            let mut model: HashMap<u32, (OrderKind, i64, u32)> = HashMap::new();

            for op in ops {
                match op {
                    Op::Add { buy, price, amount, trade_id } => {
                        let kind = if buy { OrderKind::Buy } else { OrderKind::Sell };
                        let order = Order::new(CostData::new(price, amount), TradeData::new(TRADER, trade_id, 1), kind).unwrap();
                        let result = index.insert(order);
                        if model.contains_key(&trade_id) {
                            prop_assert!(result.is_err());
                        } else {
                            prop_assert!(result.is_ok());
                            model.insert(trade_id, (kind, price, amount));
                        }
                    }
                    Op::Cancel { trade_id } => {
                        let delete = Order::new_delete(TradeData::new(TRADER, trade_id, 1));
                        let removed = index.cancel(&delete).unwrap();
                        prop_assert_eq!(removed.map(|o| o.trade_id()), model.remove(&trade_id).map(|_| trade_id));
                    }
                    Op::Fill { trade_id, amount } => {
                        let guid = (i64::from(TRADER) << 32) | i64::from(trade_id);
                        if let Some(handle) = index.find_by_guid(guid) {
                            let entry = model.get_mut(&trade_id).unwrap();
                            let result = index.fill(handle, amount);
                            if amount > entry.2 {
                                prop_assert!(result.is_err());
                            } else if amount == entry.2 {
                                prop_assert!(result.unwrap().is_some());
                                model.remove(&trade_id);
                            } else {
                                prop_assert!(result.unwrap().is_none());
                                entry.2 -= amount;
                            }
                        }
                    }
                }
                prop_assert!(index.verify().is_ok());
                prop_assert_eq!(index.len(), model.len());
            }

            let best_buy = model.values().filter(|o| o.0 == OrderKind::Buy).map(|o| o.1).max();
            let best_sell = model.values().filter(|o| o.0 == OrderKind::Sell).map(|o| o.1).min();
            prop_assert_eq!(index.best_buy().map(|h| index.get(h).unwrap().price()), best_buy);
            prop_assert_eq!(index.best_sell().map(|h| index.get(h).unwrap().price()), best_sell);
        }
    }
}
