//! Property tests for the intrusive trees

use ordertree_rs::{CostData, IndexError, Order, OrderArena, OrderHandle, TradeData, Tree};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[cfg(test)]
mod tree_property_tests {
    use super::*;

    fn stored(arena: &mut OrderArena, trader_id: u32, trade_id: u32, price: i64) -> OrderHandle {
        let trade = TradeData::new(trader_id, trade_id, 1);
        let order = Order::new_sell(CostData::new(price, 1), trade).unwrap();
        arena.insert(order)
    }

    proptest! {
        #[test]
        fn guid_round_trip(price in any::<i64>(), amount in 1u32.., trader_id in any::<u32>(), trade_id in any::<u32>(), stock_id in any::<u32>()) {
            let order = Order::new_buy(CostData::new(price, amount), TradeData::new(trader_id, trade_id, stock_id)).unwrap();

            prop_assert_eq!(order.guid(), (((trader_id as u64) << 32) | trade_id as u64) as i64);
            prop_assert_eq!(order.trader_id(), trader_id);
            prop_assert_eq!(order.trade_id(), trade_id);
            prop_assert_eq!(order.price(), price);
            prop_assert_eq!(order.amount(), amount);
            prop_assert_eq!(order.stock_id(), stock_id);
        }

        #[test]
        fn price_tree_in_order_is_sorted(prices in prop::collection::vec(-1_000i64..1_000, 0..200)) {
            let mut arena = OrderArena::new();
            let mut tree = Tree::price();
            for (i, &price) in prices.iter().enumerate() {
                let handle = stored(&mut arena, 0, i as u32, price);
                tree.insert(&mut arena, handle).unwrap();
            }

            prop_assert!(tree.verify(&arena).is_ok());
            let keys = tree.keys(&arena);
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
            let mut expected = prices.clone();
            expected.sort();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn guid_tree_rejects_collisions(trade_ids in prop::collection::vec(0u32..64, 1..150)) {
            let mut arena = OrderArena::new();
            let mut tree = Tree::guid();
            let mut seen = BTreeSet::new();

            for &trade_id in &trade_ids {
                let handle = stored(&mut arena, 0, trade_id, 0);
                let before = tree.keys(&arena);
                let result = tree.insert(&mut arena, handle);
                if seen.insert(trade_id) {
                    prop_assert!(result.is_ok());
                } else {
                    let is_duplicate = matches!(result, Err(IndexError::DuplicateKey { .. }));
                    prop_assert!(is_duplicate);
                    prop_assert_eq!(tree.keys(&arena), before);
                    prop_assert!(arena.remove(handle).is_ok());
                }
            }

            prop_assert!(tree.verify(&arena).is_ok());
            prop_assert_eq!(tree.len(), seen.len());
            let expected: Vec<i64> = seen.iter().map(|&id| i64::from(id)).collect();
            prop_assert_eq!(tree.keys(&arena), expected);
        }

        #[test]
        fn interleaved_inserts_and_removes_stay_balanced(ops in prop::collection::vec((0i64..50, any::<bool>()), 1..300)) {
            let mut arena = OrderArena::new();
            let mut tree = Tree::price();
            let mut live: Vec<OrderHandle> = Vec::new();

            for (i, &(price, remove)) in ops.iter().enumerate() {
                if remove && !live.is_empty() {
                    let victim = live.swap_remove(price as usize % live.len());
                    tree.remove(&mut arena, victim).unwrap();
                    arena.remove(victim).unwrap();
                } else {
                    let handle = stored(&mut arena, 0, i as u32, price);
                    tree.insert(&mut arena, handle).unwrap();
                    live.push(handle);
                }
                prop_assert!(tree.verify(&arena).is_ok());
                prop_assert_eq!(tree.len(), live.len());
            }
        }

        #[test]
        fn removing_from_one_tree_leaves_the_other(prices in prop::collection::vec(0i64..100, 1..100), picks in prop::collection::vec(any::<prop::sample::Index>(), 0..50)) {
            let mut arena = OrderArena::new();
            let mut price_tree = Tree::price();
            let mut guid_tree = Tree::guid();
            let mut handles = Vec::new();
            for (i, &price) in prices.iter().enumerate() {
                let handle = stored(&mut arena, 1, i as u32, price);
                price_tree.insert(&mut arena, handle).unwrap();
                guid_tree.insert(&mut arena, handle).unwrap();
                handles.push(handle);
            }
            let guid_order: Vec<OrderHandle> = guid_tree.iter(&arena).collect();

            let mut removed = BTreeSet::new();
            for pick in picks {
                let handle = handles[pick.index(handles.len())];
                if removed.insert(handle) {
                    price_tree.remove(&mut arena, handle).unwrap();
                }
            }

            prop_assert!(price_tree.verify(&arena).is_ok());
            prop_assert!(guid_tree.verify(&arena).is_ok());
            prop_assert_eq!(guid_tree.iter(&arena).collect::<Vec<_>>(), guid_order);
            for handle in &handles {
                prop_assert!(guid_tree.contains(&arena, *handle));
                prop_assert_eq!(price_tree.contains(&arena, *handle), !removed.contains(handle));
            }
        }

        #[test]
        fn removing_guids_leaves_price_order(prices in prop::collection::vec(0i64..20, 1..100), picks in prop::collection::vec(any::<prop::sample::Index>(), 0..50)) {
            let mut arena = OrderArena::new();
            let mut price_tree = Tree::price();
            let mut guid_tree = Tree::guid();
            let mut handles = Vec::new();
            for (i, &price) in prices.iter().enumerate() {
                let handle = stored(&mut arena, 2, i as u32, price);
                price_tree.insert(&mut arena, handle).unwrap();
                guid_tree.insert(&mut arena, handle).unwrap();
                handles.push(handle);
            }
            let price_order: Vec<OrderHandle> = price_tree.iter(&arena).collect();
            let price_root = price_tree.root();

            let mut removed = BTreeSet::new();
            for pick in picks {
                let handle = handles[pick.index(handles.len())];
                if removed.insert(handle) {
                    guid_tree.remove(&mut arena, handle).unwrap();
                }
            }

            prop_assert!(guid_tree.verify(&arena).is_ok());
            prop_assert!(price_tree.verify(&arena).is_ok());
            prop_assert_eq!(price_tree.iter(&arena).collect::<Vec<_>>(), price_order);
            prop_assert_eq!(price_tree.root(), price_root);
            prop_assert_eq!(guid_tree.len(), handles.len() - removed.len());
            for handle in &handles {
                prop_assert!(price_tree.contains(&arena, *handle));
                prop_assert_eq!(guid_tree.contains(&arena, *handle), !removed.contains(handle));
            }
        }

        #[test]
        fn cleared_tree_releases_its_orders(prices in prop::collection::vec(any::<i64>(), 0..100)) {
            let mut arena = OrderArena::new();
            let mut tree = Tree::price();
            let mut handles = Vec::new();
            for (i, &price) in prices.iter().enumerate() {
                let handle = stored(&mut arena, 3, i as u32, price);
                tree.insert(&mut arena, handle).unwrap();
                handles.push(handle);
            }

            prop_assert_eq!(tree.clear(&mut arena).unwrap(), prices.len());
            prop_assert!(tree.verify(&arena).is_ok());
            for handle in handles {
                prop_assert!(arena.remove(handle).is_ok());
            }
            prop_assert!(arena.is_empty());
        }
    }
}
