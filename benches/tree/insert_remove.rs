use criterion::{BenchmarkId, Criterion};
use ordertree_rs::{CostData, Order, OrderArena, OrderHandle, TradeData, Tree};
use std::hint::black_box;

fn fill_arena(count: u32) -> (OrderArena, Vec<OrderHandle>) {
    let mut arena = OrderArena::with_capacity(count as usize);
    let handles = (0..count)
        .map(|i| {
            // Scatter prices so inserts are not purely ascending
            let price = i64::from(i.wrapping_mul(2_654_435_761) % 10_000);
            let order = Order::new_buy(CostData::new(price, 10), TradeData::new(1, i, 1))
                .expect("non-zero amount");
            arena.insert(order)
        })
        .collect();
    (arena, handles)
}

/// Register benchmarks for linking and unlinking nodes
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tree - Insert/Remove");

    for size in [100u32, 1_000, 10_000] {
        let id = BenchmarkId::new("insert_price_and_guid", size);
        group.bench_with_input(id, &size, |b, &size| {
            b.iter_batched(
                || fill_arena(size),
                |(mut arena, handles)| {
                    let mut prices = Tree::price();
                    let mut guids = Tree::guid();
                    for handle in handles {
                        let _ = black_box(prices.insert(&mut arena, handle));
                        let _ = black_box(guids.insert(&mut arena, handle));
                    }
                    (arena, prices, guids)
                },
                criterion::BatchSize::LargeInput,
            )
        });

        let id = BenchmarkId::new("insert_then_remove_price", size);
        group.bench_with_input(id, &size, |b, &size| {
            b.iter_batched(
                || fill_arena(size),
                |(mut arena, handles)| {
                    let mut prices = Tree::price();
                    for &handle in &handles {
                        let _ = prices.insert(&mut arena, handle);
                    }
                    for &handle in &handles {
                        let _ = black_box(prices.remove(&mut arena, handle));
                    }
                    arena
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}
