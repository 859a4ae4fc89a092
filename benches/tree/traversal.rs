use criterion::Criterion;
use ordertree_rs::{CostData, Order, OrderArena, TradeData, Tree};
use std::hint::black_box;

/// Register benchmarks for lookups and ordered walks
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tree - Traversal");

    let mut arena = OrderArena::with_capacity(10_000);
    let mut prices = Tree::price();
    let mut guids = Tree::guid();
    for i in 0..10_000u32 {
        let trade = TradeData::new(2, i, 1);
        let order = Order::new_sell(CostData::new(i64::from(i % 500), 1), trade)
            .expect("non-zero amount");
        let handle = arena.insert(order);
        let _ = prices.insert(&mut arena, handle);
        let _ = guids.insert(&mut arena, handle);
    }

    group.bench_function("find_guid", |b| {
        let mut key = 0i64;
        b.iter(|| {
            key = (key + 7_919) % 10_000;
            black_box(guids.find(&arena, (2i64 << 32) | key))
        })
    });

    group.bench_function("find_price", |b| {
        b.iter(|| black_box(prices.find(&arena, black_box(250))))
    });

    group.bench_function("walk_price_tree", |b| {
        b.iter(|| black_box(prices.iter(&arena).count()))
    });

    group.bench_function("min_max", |b| {
        b.iter(|| black_box((prices.min(&arena), prices.max(&arena))))
    });

    group.finish();
}
